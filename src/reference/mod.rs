//! Reference trajectory module
//!
//! Evaluates the desired trajectory and its time derivatives from
//! polynomial-in-time coordinate curves.

pub mod cubic;

pub use cubic::*;
