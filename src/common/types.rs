//! Common types used throughout unicycle_tracking

use nalgebra::{Vector2, Vector3};

/// Normalize an angle into [0, 2*pi).
///
/// Applied at control-law evaluation only; the stored state heading is
/// kept unwrapped so that integrating the turn rate stays consistent.
pub fn wrap_to_2pi(mut angle: f64) -> f64 {
    let two_pi = 2.0 * std::f64::consts::PI;
    angle %= two_pi;
    if angle < 0.0 {
        angle += two_pi;
    }
    angle
}

/// Unicycle pose (position + heading)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose2D {
    pub x: f64,
    pub y: f64,
    pub theta: f64,
}

impl Pose2D {
    pub fn new(x: f64, y: f64, theta: f64) -> Self {
        Self { x, y, theta }
    }

    pub fn origin() -> Self {
        Self { x: 0.0, y: 0.0, theta: 0.0 }
    }

    pub fn to_vector(&self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.theta)
    }

    /// Heading wrapped into [0, 2*pi); the stored value is left untouched.
    pub fn wrapped_theta(&self) -> f64 {
        wrap_to_2pi(self.theta)
    }
}

impl From<Vector3<f64>> for Pose2D {
    fn from(v: Vector3<f64>) -> Self {
        Self { x: v[0], y: v[1], theta: v[2] }
    }
}

/// Control input for the unicycle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlInput {
    pub v: f64,     // linear velocity
    pub omega: f64, // angular velocity
}

impl ControlInput {
    pub fn new(v: f64, omega: f64) -> Self {
        Self { v, omega }
    }

    pub fn zero() -> Self {
        Self { v: 0.0, omega: 0.0 }
    }

    pub fn to_vector(&self) -> Vector2<f64> {
        Vector2::new(self.v, self.omega)
    }
}

impl From<Vector2<f64>> for ControlInput {
    fn from(v: Vector2<f64>) -> Self {
        Self { v: v[0], omega: v[1] }
    }
}

/// Trajectory represented as a time-ordered sequence of poses
#[derive(Debug, Clone)]
pub struct Trajectory {
    pub poses: Vec<Pose2D>,
}

impl Trajectory {
    pub fn new() -> Self {
        Self { poses: Vec::new() }
    }

    pub fn with_capacity(n: usize) -> Self {
        Self { poses: Vec::with_capacity(n) }
    }

    pub fn push(&mut self, pose: Pose2D) {
        self.poses.push(pose);
    }

    pub fn len(&self) -> usize {
        self.poses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    pub fn x_coords(&self) -> Vec<f64> {
        self.poses.iter().map(|p| p.x).collect()
    }

    pub fn y_coords(&self) -> Vec<f64> {
        self.poses.iter().map(|p| p.y).collect()
    }

    pub fn headings(&self) -> Vec<f64> {
        self.poses.iter().map(|p| p.theta).collect()
    }

    pub fn points(&self) -> Vec<(f64, f64)> {
        self.poses.iter().map(|p| (p.x, p.y)).collect()
    }
}

impl Default for Trajectory {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_wrap_to_2pi_range() {
        for &angle in &[-7.0, -2.0, -0.1, 0.0, 0.5, 3.2, 6.3, 15.0] {
            let wrapped = wrap_to_2pi(angle);
            assert!(wrapped >= 0.0 && wrapped < 2.0 * PI, "angle {} -> {}", angle, wrapped);
            // same direction up to a multiple of 2*pi
            assert!(((wrapped - angle) / (2.0 * PI)).fract().abs() < 1e-12);
        }
    }

    #[test]
    fn test_wrap_to_2pi_negative() {
        assert!((wrap_to_2pi(-2.0) - (2.0 * PI - 2.0)).abs() < 1e-12);
        assert!((wrap_to_2pi(-PI) - PI).abs() < 1e-12);
    }

    #[test]
    fn test_pose2d_vector_round_trip() {
        let pose = Pose2D::new(1.0, -3.0, -2.0);
        let back = Pose2D::from(pose.to_vector());
        assert_eq!(pose, back);
    }

    #[test]
    fn test_pose2d_wrapped_theta_leaves_state() {
        let pose = Pose2D::new(0.0, 0.0, -2.0);
        let wrapped = pose.wrapped_theta();
        assert!(wrapped >= 0.0 && wrapped < 2.0 * PI);
        assert_eq!(pose.theta, -2.0);
    }

    #[test]
    fn test_trajectory_coords() {
        let mut traj = Trajectory::new();
        traj.push(Pose2D::new(0.0, 1.0, 0.1));
        traj.push(Pose2D::new(2.0, 3.0, 0.2));
        assert_eq!(traj.len(), 2);
        assert_eq!(traj.x_coords(), vec![0.0, 2.0]);
        assert_eq!(traj.y_coords(), vec![1.0, 3.0]);
        assert_eq!(traj.points(), vec![(0.0, 1.0), (2.0, 3.0)]);
    }
}
