//! Visualization utilities for unicycle_tracking
//!
//! Provides a small gnuplot-based sink for rendering the actual and
//! desired trajectories. Rendering is a side effect at the end of a run,
//! not part of the simulation's data contract.

use gnuplot::{AutoOption, AxesCommon, Caption, Color, Figure, LineWidth};

use crate::common::{TrackingError, TrackingResult, Trajectory};

/// Color palette for consistent styling
pub mod colors {
    pub const DESIRED: &str = "#000000";
    pub const ACTUAL: &str = "#35C788";
}

struct LineSeries {
    xs: Vec<f64>,
    ys: Vec<f64>,
    color: String,
    caption: String,
}

/// Accumulates named line series and renders them to a PNG file.
pub struct Visualizer {
    title: String,
    x_label: String,
    y_label: String,
    series: Vec<LineSeries>,
}

impl Visualizer {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            x_label: "x [m]".to_string(),
            y_label: "y [m]".to_string(),
            series: Vec::new(),
        }
    }

    pub fn set_labels(&mut self, x_label: &str, y_label: &str) {
        self.x_label = x_label.to_string();
        self.y_label = y_label.to_string();
    }

    /// Add a trajectory's xy-path as a line series.
    pub fn add_trajectory(&mut self, trajectory: &Trajectory, color: &str, caption: &str) {
        self.series.push(LineSeries {
            xs: trajectory.x_coords(),
            ys: trajectory.y_coords(),
            color: color.to_string(),
            caption: caption.to_string(),
        });
    }

    /// Add a raw line series.
    pub fn add_line(&mut self, xs: Vec<f64>, ys: Vec<f64>, color: &str, caption: &str) {
        self.series.push(LineSeries {
            xs,
            ys,
            color: color.to_string(),
            caption: caption.to_string(),
        });
    }

    /// Render all series to a PNG at the given path.
    pub fn save(&self, path: &str) -> TrackingResult<()> {
        if let Some(dir) = std::path::Path::new(path).parent() {
            if !dir.as_os_str().is_empty() {
                std::fs::create_dir_all(dir)?;
            }
        }

        let mut fg = Figure::new();
        {
            let axes = fg
                .axes2d()
                .set_title(&self.title, &[])
                .set_x_label(&self.x_label, &[])
                .set_y_label(&self.y_label, &[])
                .set_aspect_ratio(AutoOption::Fix(1.0));

            for s in &self.series {
                axes.lines(
                    &s.xs,
                    &s.ys,
                    &[
                        Caption(s.caption.as_str()),
                        Color(s.color.as_str()),
                        LineWidth(2.0),
                    ],
                );
            }
        }

        fg.set_terminal("pngcairo size 800,600", path);
        fg.show()
            .map_err(|e| TrackingError::Visualization(format!("{:?}", e)))?;
        Ok(())
    }
}
