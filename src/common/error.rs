//! Error types for unicycle_tracking

use std::fmt;

/// Main error type for the tracking simulation
///
/// Stage failures carry the time-step index at which the run aborted.
#[derive(Debug)]
pub enum TrackingError {
    /// Feedforward speed vanished (path cusp), heading rate undefined
    SingularFeedforward { step: usize, time: f64 },
    /// LQR synthesis failed to produce a stabilizing gain
    ControlSynthesis { step: usize, msg: String },
    /// Numerical computation failed (matrix inversion, Riccati iteration, etc.)
    NumericalError(String),
    /// Invalid parameter
    InvalidParameter(String),
    /// Visualization error
    Visualization(String),
    /// I/O error
    IoError(std::io::Error),
}

impl fmt::Display for TrackingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrackingError::SingularFeedforward { step, time } => write!(
                f,
                "Singular feedforward: reference speed vanished at step {} (t={:.3})",
                step, time
            ),
            TrackingError::ControlSynthesis { step, msg } => {
                write!(f, "Control synthesis error at step {}: {}", step, msg)
            }
            TrackingError::NumericalError(msg) => write!(f, "Numerical error: {}", msg),
            TrackingError::InvalidParameter(msg) => write!(f, "Invalid parameter: {}", msg),
            TrackingError::Visualization(msg) => write!(f, "Visualization error: {}", msg),
            TrackingError::IoError(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for TrackingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TrackingError::IoError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for TrackingError {
    fn from(e: std::io::Error) -> Self {
        TrackingError::IoError(e)
    }
}

/// Result type alias for tracking operations
pub type TrackingResult<T> = Result<T, TrackingError>;
