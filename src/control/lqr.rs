//! Continuous-time LQR synthesis about the reference point
//!
//! The unicycle kinematics are linearized about the current feedforward
//! reference, and an infinite-horizon continuous LQR gain is solved fresh
//! for every step. The Riccati solution is obtained by integrating the
//! Riccati ODE to its stationary point, and the resulting closed loop is
//! checked for strict stability rather than assumed stabilizable.

use nalgebra::{Matrix2, Matrix2x3, Matrix3, Matrix3x2};

use crate::common::{TrackingError, TrackingResult};

const RICCATI_STEP: f64 = 0.01;
const RICCATI_EPS: f64 = 1e-9;
const RICCATI_MAX_ITER: usize = 200_000;

/// Linearize the unicycle kinematics about a reference point.
///
/// With state (x, y, theta) and input (v, w), the error dynamics about
/// the feedforward reference (v_f, theta_des) are d/dt e = A e + B u.
pub fn linearize(v_f: f64, theta_des: f64) -> (Matrix3<f64>, Matrix3x2<f64>) {
    let (sin_t, cos_t) = theta_des.sin_cos();

    let a = Matrix3::new(
        0.0, 0.0, -v_f * sin_t,
        0.0, 0.0, v_f * cos_t,
        0.0, 0.0, 0.0,
    );
    let b = Matrix3x2::new(
        cos_t, 0.0,
        sin_t, 0.0,
        0.0, 1.0,
    );
    (a, b)
}

/// Solve the continuous-time algebraic Riccati equation
/// A'P + PA - PBR^-1B'P + Q = 0
/// by integrating the Riccati ODE forward until the residual vanishes.
pub fn solve_care(
    a: &Matrix3<f64>,
    b: &Matrix3x2<f64>,
    q: &Matrix3<f64>,
    r: &Matrix2<f64>,
) -> TrackingResult<Matrix3<f64>> {
    let r_inv = r.try_inverse().ok_or_else(|| {
        TrackingError::NumericalError("input cost matrix R is not invertible".to_string())
    })?;

    let mut p = *q;
    for _ in 0..RICCATI_MAX_ITER {
        let residual =
            a.transpose() * p + p * a - p * b * r_inv * b.transpose() * p + q;
        if residual.abs().max() < RICCATI_EPS {
            return Ok(p);
        }
        p += residual * RICCATI_STEP;
    }
    Err(TrackingError::NumericalError(
        "Riccati iteration did not converge".to_string(),
    ))
}

/// Compute the LQR state-feedback gain K = R^-1 B' P and verify that
/// A - BK is strictly stable. A non-stabilizing result is reported as a
/// control-synthesis failure for the given step.
pub fn lqr_gain(
    a: &Matrix3<f64>,
    b: &Matrix3x2<f64>,
    q: &Matrix3<f64>,
    r: &Matrix2<f64>,
    step: usize,
) -> TrackingResult<Matrix2x3<f64>> {
    let p = solve_care(a, b, q, r).map_err(|e| TrackingError::ControlSynthesis {
        step,
        msg: format!("{}", e),
    })?;

    let r_inv = r.try_inverse().ok_or_else(|| TrackingError::ControlSynthesis {
        step,
        msg: "input cost matrix R is not invertible".to_string(),
    })?;
    let k = r_inv * b.transpose() * p;

    let closed_loop = a - b * k;
    let eigenvalues = closed_loop.complex_eigenvalues();
    if eigenvalues.iter().any(|ev| ev.re >= 0.0) {
        return Err(TrackingError::ControlSynthesis {
            step,
            msg: "closed loop A - B*K is not strictly stable".to_string(),
        });
    }

    Ok(k)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linearize_structure() {
        let v_f = 2.0;
        let theta = 0.3;
        let (a, b) = linearize(v_f, theta);

        assert!((a[(0, 2)] + v_f * theta.sin()).abs() < 1e-12);
        assert!((a[(1, 2)] - v_f * theta.cos()).abs() < 1e-12);
        for i in 0..3 {
            assert_eq!(a[(i, 0)], 0.0);
            assert_eq!(a[(i, 1)], 0.0);
        }
        assert_eq!(a[(2, 2)], 0.0);

        assert!((b[(0, 0)] - theta.cos()).abs() < 1e-12);
        assert!((b[(1, 0)] - theta.sin()).abs() < 1e-12);
        assert_eq!(b[(2, 0)], 0.0);
        assert_eq!(b[(0, 1)], 0.0);
        assert_eq!(b[(1, 1)], 0.0);
        assert_eq!(b[(2, 1)], 1.0);
    }

    #[test]
    fn test_care_residual_small() {
        let (a, b) = linearize(1.0, 0.0);
        let q = Matrix3::identity();
        let r = Matrix2::identity();

        let p = solve_care(&a, &b, &q, &r).unwrap();
        let residual = a.transpose() * p + p * a
            - p * b * r.try_inverse().unwrap() * b.transpose() * p
            + q;
        assert!(residual.abs().max() < 1e-6);
    }

    #[test]
    fn test_care_solution_symmetric() {
        let (a, b) = linearize(0.5, -1.2);
        let p = solve_care(&a, &b, &Matrix3::identity(), &Matrix2::identity()).unwrap();
        assert!((p - p.transpose()).abs().max() < 1e-6);
    }

    #[test]
    fn test_gain_stabilizes_closed_loop() {
        let q = Matrix3::identity();
        let r = Matrix2::identity();
        for &(v_f, theta) in &[(1.0, 0.0), (0.5, 0.3), (2.0, -1.2), (0.16, -1.25)] {
            let (a, b) = linearize(v_f, theta);
            let k = lqr_gain(&a, &b, &q, &r, 0).unwrap();
            let eigenvalues = (a - b * k).complex_eigenvalues();
            for ev in eigenvalues.iter() {
                assert!(ev.re < -1e-6, "unstable mode {:?} at v_f={}", ev, v_f);
            }
        }
    }

    #[test]
    fn test_singular_r_is_error() {
        let (a, b) = linearize(1.0, 0.0);
        let result = solve_care(&a, &b, &Matrix3::identity(), &Matrix2::zeros());
        assert!(matches!(result, Err(TrackingError::NumericalError(_))));
    }
}
