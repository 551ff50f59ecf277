//! unicycle_tracking - trajectory-tracking LQR simulation for a unicycle robot
//!
//! This crate simulates a wheeled vehicle tracking a reference trajectory
//! given by two cubic polynomials in time. Each simulation step evaluates
//! the reference, synthesizes a feedforward input, linearizes the unicycle
//! kinematics about the reference point, solves a continuous-time LQR
//! problem for a feedback gain, and integrates the nonlinear kinematics
//! one explicit-Euler step.

// Core modules
pub mod common;
pub mod utils;

// Simulation pipeline modules
pub mod reference;
pub mod control;
pub mod simulation;

// Re-export common types for convenience
pub use common::{wrap_to_2pi, ControlInput, Pose2D, Trajectory};
pub use common::{TrackingError, TrackingResult};
pub use reference::{CubicReference, ReferencePoint};
pub use simulation::{NoiseConfig, SimConfig, TrackingOutput, TrackingSimulator};
