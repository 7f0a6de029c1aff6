//! The frame step.
//!
//! Once per host frame:
//! 1. **Wind**: project the wind force onto each triangle-vertex normal
//! 2. **Gravity + integrate**: damped Verlet step for every particle
//! 3. **Relax**: `relaxation_passes` passes over all constraints
//! 4. **Floor**: clamp `y` to the floor height
//! 5. **Pins**: restore pinned particles to their rest position
//!
//! Normals come from the renderer and describe the previous frame's
//! geometry. The one-frame lag is accepted: normals change slowly
//! relative to the timestep.

use std::time::Instant;

use glam::Vec3;
use nobori_mesh::TriangleMesh;
use nobori_types::{NoboriError, NoboriResult, ParticleId};

use crate::config::SolverConfig;
use crate::pins::PinSet;
use crate::topology::ClothTopology;

/// Summary of one completed frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    /// Frame number (0-indexed).
    pub frame: u64,
    /// Particles clamped to the floor this frame.
    pub floor_contacts: usize,
    /// Relaxation passes performed.
    pub relaxation_passes: u32,
    /// Wall-clock time for this step (seconds).
    pub wall_time: f64,
}

/// A single simulated cloth: topology, configuration and pins.
///
/// All state is owned here; `step` takes `&mut self`, so one cloth is
/// only ever advanced by one caller at a time.
#[derive(Debug, Clone)]
pub struct ClothSimulation {
    topology: ClothTopology,
    config: SolverConfig,
    pins: PinSet,
    frame: u64,
}

impl ClothSimulation {
    /// Validates `config` and takes ownership of the cloth. No pins are set.
    pub fn new(topology: ClothTopology, config: SolverConfig) -> NoboriResult<Self> {
        config.validate()?;
        if config.relaxation_passes > 1 {
            tracing::warn!(
                passes = config.relaxation_passes,
                "multiple relaxation passes per frame: cloth will be stiffer \
                 than the single-pass default"
            );
        }
        tracing::debug!(
            particles = topology.particle_count(),
            constraints = topology.constraint_count(),
            timestep = config.timestep,
            "cloth simulation created"
        );
        Ok(Self {
            topology,
            config,
            pins: PinSet::empty(),
            frame: 0,
        })
    }

    /// Builder form of [`set_pins`](Self::set_pins).
    pub fn with_pins(mut self, pins: PinSet) -> NoboriResult<Self> {
        self.set_pins(pins)?;
        Ok(self)
    }

    /// Replaces the pin set. Pinned particles snap to rest immediately.
    pub fn set_pins(&mut self, pins: PinSet) -> NoboriResult<()> {
        pins.validate(self.topology.particle_count())?;
        self.pins = pins;
        self.enforce_pins();
        Ok(())
    }

    #[inline]
    pub fn pins(&self) -> &PinSet {
        &self.pins
    }

    #[inline]
    pub fn topology(&self) -> &ClothTopology {
        &self.topology
    }

    /// Direct access for hosts that drag particles around between frames.
    #[inline]
    pub fn topology_mut(&mut self) -> &mut ClothTopology {
        &mut self.topology
    }

    #[inline]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Number of frames stepped so far.
    #[inline]
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advances the cloth by one fixed timestep.
    ///
    /// - `now`: host clock in milliseconds; drives the wind only.
    /// - `indices`: flat triangle list, three particle slots per triangle.
    /// - `normals`: one normal per particle slot.
    ///
    /// Inputs are checked before any particle is touched, so a failed call
    /// leaves the cloth exactly as it was.
    pub fn step(
        &mut self,
        now: f64,
        indices: &[u32],
        normals: &[Vec3],
    ) -> NoboriResult<StepReport> {
        let start = Instant::now();
        self.check_frame_inputs(indices, normals)?;

        self.apply_wind(now, indices, normals);
        self.apply_gravity_and_integrate();
        for _ in 0..self.config.relaxation_passes {
            self.topology.relax();
        }
        let floor_contacts = self.clamp_to_floor();
        self.enforce_pins();

        let report = StepReport {
            frame: self.frame,
            floor_contacts,
            relaxation_passes: self.config.relaxation_passes,
            wall_time: start.elapsed().as_secs_f64(),
        };
        self.frame += 1;

        tracing::trace!(
            frame = report.frame,
            now,
            floor_contacts,
            "cloth frame stepped"
        );
        Ok(report)
    }

    /// Current particle positions in slot order.
    pub fn positions(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.topology.particles().iter().map(|p| p.position)
    }

    /// Copies particle positions into the render mesh.
    pub fn write_positions(&self, mesh: &mut TriangleMesh) -> NoboriResult<()> {
        let n = self.topology.particle_count();
        if mesh.vertex_count() != n {
            return Err(NoboriError::ShapeMismatch(format!(
                "Mesh vertex count ({}) != particle count ({})",
                mesh.vertex_count(),
                n
            )));
        }
        for (i, p) in self.positions().enumerate() {
            mesh.set_position(i, p);
        }
        Ok(())
    }

    fn check_frame_inputs(&self, indices: &[u32], normals: &[Vec3]) -> NoboriResult<()> {
        let n = self.topology.particle_count();
        if normals.len() != n {
            return Err(NoboriError::ShapeMismatch(format!(
                "Normal count ({}) != particle count ({})",
                normals.len(),
                n
            )));
        }
        if indices.len() % 3 != 0 {
            return Err(NoboriError::ShapeMismatch(format!(
                "Triangle index count ({}) is not divisible by 3",
                indices.len()
            )));
        }
        if let Some(&bad) = indices.iter().find(|&&i| i as usize >= n) {
            return Err(NoboriError::IndexOutOfBounds {
                index: bad as usize,
                count: n,
            });
        }
        Ok(())
    }

    /// Each triangle contributes independently, so a vertex shared by
    /// several faces receives one push per face.
    fn apply_wind(&mut self, now: f64, indices: &[u32], normals: &[Vec3]) {
        let wind = self.config.wind.force_at(now);
        let particles = self.topology.particles_mut();
        for &i in indices {
            let normal = normals[i as usize];
            let push = normal.normalize_or_zero() * normal.dot(wind);
            particles[i as usize].add_force(push);
        }
    }

    fn apply_gravity_and_integrate(&mut self) {
        let dt_squared = self.config.dt_squared();
        let damping = self.config.damping;
        let gravity = Vec3::new(0.0, -self.config.gravity, 0.0);
        for particle in self.topology.particles_mut() {
            let weight = gravity * particle.mass();
            particle.add_force(weight);
            particle.integrate(dt_squared, damping);
        }
    }

    /// Returns the number of particles clamped.
    fn clamp_to_floor(&mut self) -> usize {
        let floor_y = self.config.floor_y;
        let mut contacts = 0;
        for particle in self.topology.particles_mut() {
            if particle.position.y < floor_y {
                particle.position.y = floor_y;
                contacts += 1;
            }
        }
        contacts
    }

    fn enforce_pins(&mut self) {
        let Self { topology, pins, .. } = self;
        let particles = topology.particles_mut();
        for &ParticleId(slot) in pins.ids() {
            particles[slot as usize].restore();
        }
    }
}
