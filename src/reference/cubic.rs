//! Cubic polynomial reference trajectory
//!
//! The desired trajectory is given by two cubic polynomials in time,
//! x(t) = a0 + a1*t + a2*t^2 + a3*t^3 and likewise y(t). The evaluator
//! is a pure function of (t, avec, bvec) and is the single authoritative
//! source of the desired state, including its heading.

use nalgebra::Vector4;

use crate::common::Pose2D;

/// Reference state at a given time: desired position, its first and
/// second time-derivatives, and the desired heading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReferencePoint {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
    pub ddx: f64,
    pub ddy: f64,
    /// Desired heading, defined as atan2(y, x): the polar angle of the
    /// desired position seen from the origin, not the heading of the
    /// velocity vector. The feedforward and linearization downstream are
    /// derived assuming this definition.
    pub theta: f64,
}

impl ReferencePoint {
    pub fn pose(&self) -> Pose2D {
        Pose2D::new(self.x, self.y, self.theta)
    }
}

/// Cubic polynomial reference curve pair
#[derive(Debug, Clone)]
pub struct CubicReference {
    avec: Vector4<f64>,
    bvec: Vector4<f64>,
}

impl CubicReference {
    /// Create from cubic coefficient vectors for x(t) and y(t),
    /// lowest order first.
    pub fn new(avec: [f64; 4], bvec: [f64; 4]) -> Self {
        Self {
            avec: Vector4::from_column_slice(&avec),
            bvec: Vector4::from_column_slice(&bvec),
        }
    }

    /// Monomial basis [1, t, t^2, t^3]
    fn basis(t: f64) -> Vector4<f64> {
        Vector4::new(1.0, t, t * t, t * t * t)
    }

    /// First derivative of the basis, [0, 1, 2t, 3t^2]
    fn d_basis(t: f64) -> Vector4<f64> {
        Vector4::new(0.0, 1.0, 2.0 * t, 3.0 * t * t)
    }

    /// Second derivative of the basis, [0, 0, 2, 6t]
    fn dd_basis(t: f64) -> Vector4<f64> {
        Vector4::new(0.0, 0.0, 2.0, 6.0 * t)
    }

    /// Evaluate the reference at time t.
    pub fn evaluate(&self, t: f64) -> ReferencePoint {
        let basis = Self::basis(t);
        let d_basis = Self::d_basis(t);
        let dd_basis = Self::dd_basis(t);

        let x = self.avec.dot(&basis);
        let y = self.bvec.dot(&basis);

        ReferencePoint {
            x,
            y,
            dx: self.avec.dot(&d_basis),
            dy: self.bvec.dot(&d_basis),
            ddx: self.avec.dot(&dd_basis),
            ddy: self.bvec.dot(&dd_basis),
            theta: y.atan2(x),
        }
    }

    /// Desired pose at time t.
    pub fn desired_pose(&self, t: f64) -> Pose2D {
        self.evaluate(t).pose()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Central finite difference of a scalar function
    fn central_diff<F: Fn(f64) -> f64>(f: F, t: f64, h: f64) -> f64 {
        (f(t + h) - f(t - h)) / (2.0 * h)
    }

    #[test]
    fn test_basis_derivative_identities() {
        let h = 1e-6;
        for &t in &[0.0, 0.3, 1.0, 2.7, 5.0] {
            for i in 0..4 {
                let d_analytic = CubicReference::d_basis(t)[i];
                let d_numeric = central_diff(|s| CubicReference::basis(s)[i], t, h);
                assert!(
                    (d_analytic - d_numeric).abs() < 1e-5,
                    "d_basis[{}] at t={}: {} vs {}",
                    i, t, d_analytic, d_numeric
                );

                let dd_analytic = CubicReference::dd_basis(t)[i];
                let dd_numeric = central_diff(|s| CubicReference::d_basis(s)[i], t, h);
                assert!(
                    (dd_analytic - dd_numeric).abs() < 1e-5,
                    "dd_basis[{}] at t={}: {} vs {}",
                    i, t, dd_analytic, dd_numeric
                );
            }
        }
    }

    #[test]
    fn test_evaluate_cubic_values() {
        // x(t) = 1 + 2t + 3t^2 + 4t^3, y(t) = -1 + t^2
        let reference = CubicReference::new([1.0, 2.0, 3.0, 4.0], [-1.0, 0.0, 1.0, 0.0]);
        let t = 2.0;
        let r = reference.evaluate(t);
        assert!((r.x - (1.0 + 4.0 + 12.0 + 32.0)).abs() < 1e-12);
        assert!((r.dx - (2.0 + 12.0 + 48.0)).abs() < 1e-12);
        assert!((r.ddx - (6.0 + 48.0)).abs() < 1e-12);
        assert!((r.y - 3.0).abs() < 1e-12);
        assert!((r.dy - 4.0).abs() < 1e-12);
        assert!((r.ddy - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_theta_is_polar_angle() {
        let reference = CubicReference::new([1.0, 0.5, 0.0, 0.0], [-3.0, 0.0, 0.0, 0.0]);
        for &t in &[0.0, 0.5, 1.0, 4.0] {
            let r = reference.evaluate(t);
            assert!((r.theta - r.y.atan2(r.x)).abs() < 1e-15);
            // y stays negative, so the polar angle is in the lower half plane
            assert!(r.theta < 0.0);
        }
    }

    #[test]
    fn test_theta_with_negative_coefficients() {
        let reference = CubicReference::new([-1.0, -0.2, 0.0, -0.1], [-2.0, 0.3, 0.0, 0.0]);
        let r = reference.evaluate(1.5);
        assert!((r.theta - r.y.atan2(r.x)).abs() < 1e-15);
    }

    #[test]
    fn test_straight_line_reference() {
        // x_des = t, y_des = 0 => theta_des = 0 for t > 0
        let reference = CubicReference::new([0.0, 1.0, 0.0, 0.0], [0.0, 0.0, 0.0, 0.0]);
        for &t in &[0.5, 1.0, 3.0] {
            let r = reference.evaluate(t);
            assert!((r.x - t).abs() < 1e-12);
            assert_eq!(r.y, 0.0);
            assert_eq!(r.theta, 0.0);
            assert!((r.dx - 1.0).abs() < 1e-12);
            assert_eq!(r.dy, 0.0);
        }
    }

    #[test]
    fn test_desired_pose_matches_evaluate() {
        let reference = CubicReference::new([1.0, 0.5, 0.0, 0.0], [-3.0, 0.0, 0.0, 0.0]);
        let r = reference.evaluate(2.5);
        let pose = reference.desired_pose(2.5);
        assert_eq!(pose.x, r.x);
        assert_eq!(pose.y, r.y);
        assert_eq!(pose.theta, r.theta);
    }
}
