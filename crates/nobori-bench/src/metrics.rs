//! Run metrics: data collected during a scenario run.

use serde::{Deserialize, Serialize};

/// Metrics collected from a scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunMetrics {
    /// Scenario name.
    pub scenario: String,
    /// Particle count.
    pub particle_count: usize,
    /// Constraint count.
    pub constraint_count: usize,
    /// Triangle count of the display mesh.
    pub triangle_count: usize,
    /// Number of frames executed (warm-up excluded).
    pub frames: u32,
    /// Total wall-clock time (seconds).
    pub total_wall_time: f64,
    /// Average wall-clock time per frame step (seconds).
    pub avg_step_time: f64,
    /// Minimum step time.
    pub min_step_time: f64,
    /// Maximum step time.
    pub max_step_time: f64,
    /// Lowest particle Y after the last frame.
    pub min_y: f32,
    /// Largest distance of any particle from its rest position.
    pub max_displacement: f32,
    /// Largest constraint `distance / rest_distance` after the last frame.
    pub max_stretch: f32,
    /// Floor clamps summed over all frames.
    pub floor_contacts: u64,
}

impl RunMetrics {
    /// CSV header row.
    pub fn to_csv_header() -> String {
        "scenario,particles,constraints,triangles,frames,total_wall_time_s,avg_step_ms,min_step_ms,max_step_ms,min_y,max_displacement,max_stretch,floor_contacts".to_string()
    }

    /// Format this metrics instance as a CSV data row.
    pub fn to_csv_row(&self) -> String {
        format!(
            "{},{},{},{},{},{:.6},{:.4},{:.4},{:.4},{:.4},{:.4},{:.6},{}",
            self.scenario,
            self.particle_count,
            self.constraint_count,
            self.triangle_count,
            self.frames,
            self.total_wall_time,
            self.avg_step_time * 1000.0,
            self.min_step_time * 1000.0,
            self.max_step_time * 1000.0,
            self.min_y,
            self.max_displacement,
            self.max_stretch,
            self.floor_contacts,
        )
    }

    /// Format multiple metrics as a complete CSV string.
    pub fn to_csv(metrics: &[RunMetrics]) -> String {
        let mut csv = Self::to_csv_header();
        for m in metrics {
            csv.push('\n');
            csv.push_str(&m.to_csv_row());
        }
        csv
    }
}
