//! Control synthesis module
//!
//! Feedforward inputs from the reference derivatives, local linearization
//! of the unicycle kinematics, and per-step LQR gain synthesis.

pub mod feedforward;
pub mod lqr;

pub use feedforward::*;
pub use lqr::*;
