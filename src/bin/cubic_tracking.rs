//
// Trajectory tracking simulation with per-step LQR feedback and
// polynomial feedforward on unicycle kinematics.
//

use unicycle_tracking::utils::{colors, Visualizer};
use unicycle_tracking::{CubicReference, Pose2D, SimConfig, TrackingSimulator};

fn main() {
    // Reference: x(t) = 1 + 0.5 t, y(t) = -3
    let reference = CubicReference::new([1.0, 0.5, 0.0, 0.0], [-3.0, 0.0, 0.0, 0.0]);

    let config = SimConfig {
        tf: 5.0,
        dt: 0.01,
        x0: Pose2D::new(1.0, -3.0, -2.0),
        ..SimConfig::default()
    };

    println!("Starting unicycle trajectory tracking simulation...");
    let simulator = TrackingSimulator::new(config).unwrap();
    let output = simulator.run(&reference).unwrap();

    let end = output.final_pose().unwrap();
    println!("Simulation finished: {} steps", output.len() - 1);
    println!(
        "Final state: x={:.3} [m], y={:.3} [m], theta={:.1} [deg]",
        end.x,
        end.y,
        end.theta.to_degrees()
    );

    let mut vis = Visualizer::new("Unicycle LQR Trajectory Tracking");
    vis.add_trajectory(&output.desired, colors::DESIRED, "desired");
    vis.add_trajectory(&output.actual, colors::ACTUAL, "actual");
    vis.save("img/cubic_tracking.png").unwrap();
    println!("Saved plot to img/cubic_tracking.png");
}
