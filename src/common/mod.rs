//! Common types and error definitions for unicycle_tracking
//!
//! This module provides the foundational building blocks used across
//! the simulation pipeline.

pub mod types;
pub mod error;

pub use types::*;
pub use error::*;
