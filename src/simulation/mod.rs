//! Simulation module
//!
//! Drives the per-step pipeline (reference evaluation, feedforward, LQR
//! synthesis, explicit-Euler integration) over the whole time grid.

pub mod tracking;

pub use tracking::*;
