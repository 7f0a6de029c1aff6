//! Scenario runner: the headless host loop.

use std::time::Instant;

use glam::Vec3;

use nobori_mesh::normals::compute_vertex_normals;
use nobori_mesh::TriangleMesh;
use nobori_solver::{ClothSimulation, StepReport};
use nobori_types::NoboriResult;

use crate::metrics::RunMetrics;
use crate::scenarios::ScenarioConfig;

/// Host clock at the first warm-up frame (ms).
const WARMUP_START_MS: f64 = 500.0;
/// Host clock decrement per warm-up frame (ms).
const WARMUP_STEP_MS: f64 = 10.0;

/// Drives one cloth frame by frame, standing in for the renderer.
pub struct ScenarioRunner {
    name: String,
    simulation: ClothSimulation,
    mesh: TriangleMesh,
    /// Reused across frames.
    normals: Vec<Vec3>,
    frame_interval_ms: f64,
    clock_frame: u64,
}

impl ScenarioRunner {
    /// Builds the simulation and display mesh for `config`.
    pub fn new(config: &ScenarioConfig) -> NoboriResult<Self> {
        let (simulation, mesh) = config.build()?;
        let normals = Vec::with_capacity(mesh.vertex_count());
        Ok(Self {
            name: config.name.clone(),
            simulation,
            mesh,
            normals,
            frame_interval_ms: config.frame_interval_ms,
            clock_frame: 0,
        })
    }

    #[inline]
    pub fn simulation(&self) -> &ClothSimulation {
        &self.simulation
    }

    #[inline]
    pub fn mesh(&self) -> &TriangleMesh {
        &self.mesh
    }

    /// Consumes the runner, returning the display mesh in its final state.
    pub fn into_mesh(self) -> TriangleMesh {
        self.mesh
    }

    /// One host frame: step with last frame's normals, copy positions
    /// into the mesh, recompute normals for the next frame.
    pub fn advance(&mut self, now: f64) -> NoboriResult<StepReport> {
        self.mesh.read_normals(&mut self.normals);
        let report = self.simulation.step(now, &self.mesh.indices, &self.normals)?;
        self.simulation.write_positions(&mut self.mesh)?;
        compute_vertex_normals(&mut self.mesh);
        Ok(report)
    }

    /// Settles the cloth before display with `frames` steps on a clock
    /// running backwards from 500 ms in 10 ms decrements.
    pub fn warm_up(&mut self, frames: u32) -> NoboriResult<()> {
        for i in 0..frames {
            let now = WARMUP_START_MS - WARMUP_STEP_MS * i as f64;
            self.advance(now)?;
        }
        if frames > 0 {
            tracing::debug!(scenario = %self.name, frames, "warm-up complete");
        }
        Ok(())
    }

    /// Runs `frames` frames on the regular clock and collects metrics.
    ///
    /// The clock continues from where a previous `run` stopped.
    pub fn run(&mut self, frames: u32) -> NoboriResult<RunMetrics> {
        let mut step_times: Vec<f64> = Vec::with_capacity(frames as usize);
        let mut floor_contacts: u64 = 0;

        let total_start = Instant::now();
        for _ in 0..frames {
            let now = self.clock_frame as f64 * self.frame_interval_ms;
            let report = self.advance(now)?;
            self.clock_frame += 1;
            step_times.push(report.wall_time);
            floor_contacts += report.floor_contacts as u64;
        }
        let total_wall_time = total_start.elapsed().as_secs_f64();

        let topology = self.simulation.topology();
        let max_displacement = topology
            .particles()
            .iter()
            .map(|p| p.position.distance(p.original))
            .fold(0.0f32, f32::max);

        let avg_step = if step_times.is_empty() {
            0.0
        } else {
            step_times.iter().sum::<f64>() / step_times.len() as f64
        };
        let min_step = step_times.iter().copied().fold(f64::MAX, f64::min);
        let max_step = step_times.iter().copied().fold(0.0, f64::max);

        let metrics = RunMetrics {
            scenario: self.name.clone(),
            particle_count: topology.particle_count(),
            constraint_count: topology.constraint_count(),
            triangle_count: self.mesh.triangle_count(),
            frames,
            total_wall_time,
            avg_step_time: avg_step,
            min_step_time: if step_times.is_empty() { 0.0 } else { min_step },
            max_step_time: max_step,
            min_y: self.mesh.min_y().unwrap_or(0.0),
            max_displacement,
            max_stretch: topology.max_stretch(),
            floor_contacts,
        };

        tracing::info!(
            scenario = %metrics.scenario,
            frames,
            wall_time = metrics.total_wall_time,
            max_stretch = metrics.max_stretch,
            "scenario run complete"
        );
        Ok(metrics)
    }

    /// Builds, warms up and runs `config` end to end.
    pub fn run_config(config: &ScenarioConfig) -> NoboriResult<(RunMetrics, TriangleMesh)> {
        let mut runner = Self::new(config)?;
        runner.warm_up(config.warmup_frames)?;
        let metrics = runner.run(config.frames)?;
        Ok((metrics, runner.into_mesh()))
    }
}
