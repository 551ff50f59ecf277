//! Feedforward synthesis from the reference trajectory
//!
//! Converts desired-trajectory derivatives into the nominal forward speed
//! and turn rate that would track the reference exactly with zero error.

use crate::common::{ControlInput, TrackingError, TrackingResult};
use crate::reference::ReferencePoint;

/// Reference speeds below this are treated as a path cusp.
pub const V_SINGULAR_EPS: f64 = 1e-6;

/// Compute the feedforward input (v_f, w_f) at a reference point.
///
/// v_f = dx*cos(theta) + dy*sin(theta)
/// w_f = (ddy*cos(theta) - ddx*sin(theta)) / v_f
///
/// The heading rate is undefined where the reference speed vanishes;
/// that is reported as a hard error for the given step rather than
/// letting Inf/NaN reach the state history.
pub fn feedforward(r: &ReferencePoint, step: usize, time: f64) -> TrackingResult<ControlInput> {
    let (sin_t, cos_t) = r.theta.sin_cos();
    let v_f = r.dx * cos_t + r.dy * sin_t;

    if v_f.abs() < V_SINGULAR_EPS {
        return Err(TrackingError::SingularFeedforward { step, time });
    }

    let w_f = (r.ddy * cos_t - r.ddx * sin_t) / v_f;
    Ok(ControlInput::new(v_f, w_f))
}
