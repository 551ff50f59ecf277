//! Trajectory-tracking simulation loop
//!
//! Each step is a pure function of the previous state plus fixed
//! parameters: evaluate the reference at t_i, synthesize the feedforward
//! input, linearize about the reference and solve the LQR gain, then apply
//! the combined feedback + feedforward input to the nonlinear unicycle
//! kinematics with one explicit-Euler step. Any stage failure aborts the
//! run and reports the step index.

use nalgebra::{Matrix2, Matrix2x3, Matrix3, Vector3};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use crate::common::{
    wrap_to_2pi, ControlInput, Pose2D, TrackingError, TrackingResult, Trajectory,
};
use crate::control::{feedforward, linearize, lqr_gain};
use crate::reference::CubicReference;

/// Additive Gaussian process noise on the state update, disabled by
/// default. Seeded so that noisy runs are reproducible.
#[derive(Debug, Clone, Copy)]
pub struct NoiseConfig {
    pub std_dev: f64,
    pub seed: u64,
}

/// Simulation configuration
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Final time [s]
    pub tf: f64,
    /// Time step [s]
    pub dt: f64,
    /// Initial state (x, y, theta)
    pub x0: Pose2D,
    /// State cost matrix
    pub q: Matrix3<f64>,
    /// Input cost matrix
    pub r: Matrix2<f64>,
    /// Optional process noise
    pub noise: Option<NoiseConfig>,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tf: 5.0,
            dt: 0.01,
            x0: Pose2D::new(1.0, -3.0, -2.0),
            q: Matrix3::identity(),
            r: Matrix2::identity(),
            noise: None,
        }
    }
}

/// Full simulation history. The actual and desired trajectories have the
/// same length N = tf/dt + 1; controls are only synthesized for the first
/// N-1 samples.
#[derive(Debug, Clone)]
pub struct TrackingOutput {
    pub time: Vec<f64>,
    pub actual: Trajectory,
    pub desired: Trajectory,
    pub controls: Vec<ControlInput>,
}

impl TrackingOutput {
    pub fn len(&self) -> usize {
        self.time.len()
    }

    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    pub fn final_pose(&self) -> Option<&Pose2D> {
        self.actual.poses.last()
    }
}

/// Combine state feedback and feedforward into the control input.
///
/// The state heading is wrapped into [0, 2*pi) for this evaluation only;
/// the stored state keeps the unwrapped value.
pub fn control_input(
    state: &Pose2D,
    desired: &Pose2D,
    k: &Matrix2x3<f64>,
    ff: &ControlInput,
) -> ControlInput {
    let error = Vector3::new(
        state.x - desired.x,
        state.y - desired.y,
        wrap_to_2pi(state.theta) - desired.theta,
    );
    ControlInput::from(ff.to_vector() - k * error)
}

/// One explicit-Euler step of the nonlinear unicycle kinematics
/// dx/dt = v cos(theta), dy/dt = v sin(theta), dtheta/dt = w.
pub fn euler_step(state: &Pose2D, u: &ControlInput, dt: f64) -> Pose2D {
    Pose2D::new(
        state.x + dt * u.v * state.theta.cos(),
        state.y + dt * u.v * state.theta.sin(),
        state.theta + dt * u.omega,
    )
}

/// Trajectory-tracking simulator
pub struct TrackingSimulator {
    config: SimConfig,
}

impl TrackingSimulator {
    /// Create a simulator, validating the configuration.
    pub fn new(config: SimConfig) -> TrackingResult<Self> {
        if !(config.tf.is_finite() && config.tf > 0.0) {
            return Err(TrackingError::InvalidParameter(format!(
                "final time must be positive, got {}",
                config.tf
            )));
        }
        if !(config.dt.is_finite() && config.dt > 0.0) {
            return Err(TrackingError::InvalidParameter(format!(
                "time step must be positive, got {}",
                config.dt
            )));
        }
        if config.dt > config.tf {
            return Err(TrackingError::InvalidParameter(format!(
                "time step {} exceeds final time {}",
                config.dt, config.tf
            )));
        }
        if let Some(noise) = &config.noise {
            if !(noise.std_dev.is_finite() && noise.std_dev >= 0.0) {
                return Err(TrackingError::InvalidParameter(format!(
                    "noise std_dev must be non-negative, got {}",
                    noise.std_dev
                )));
            }
        }
        Ok(Self { config })
    }

    /// Create with default configuration.
    pub fn with_defaults() -> Self {
        Self { config: SimConfig::default() }
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Run the simulation over the whole time grid.
    pub fn run(&self, reference: &CubicReference) -> TrackingResult<TrackingOutput> {
        let cfg = &self.config;
        let n = (cfg.tf / cfg.dt).round() as usize + 1;

        let mut time = Vec::with_capacity(n);
        for i in 0..n {
            time.push(i as f64 * cfg.dt);
        }

        let mut noise = match &cfg.noise {
            Some(nc) => {
                let normal = Normal::new(0.0, nc.std_dev).map_err(|e| {
                    TrackingError::InvalidParameter(format!("noise distribution: {}", e))
                })?;
                Some((StdRng::seed_from_u64(nc.seed), normal))
            }
            None => None,
        };

        let mut actual = Trajectory::with_capacity(n);
        let mut desired = Trajectory::with_capacity(n);
        let mut controls = Vec::with_capacity(n - 1);

        let mut state = cfg.x0;
        actual.push(state);

        for i in 0..n - 1 {
            let r_pt = reference.evaluate(time[i]);
            desired.push(r_pt.pose());

            let ff = feedforward(&r_pt, i, time[i])?;
            let (a, b) = linearize(ff.v, r_pt.theta);
            let k = lqr_gain(&a, &b, &cfg.q, &cfg.r, i)?;

            let u = control_input(&state, &r_pt.pose(), &k, &ff);
            state = euler_step(&state, &u, cfg.dt);

            if let Some((rng, normal)) = noise.as_mut() {
                let scale = cfg.dt.sqrt();
                state.x += normal.sample(rng) * scale;
                state.y += normal.sample(rng) * scale;
                state.theta += normal.sample(rng) * scale;
            }

            controls.push(u);
            actual.push(state);
        }

        // No control is synthesized for the very last sample; its desired
        // pose comes from the same evaluator as the in-loop ones.
        desired.push(reference.desired_pose(time[n - 1]));

        Ok(TrackingOutput { time, actual, desired, controls })
    }
}
