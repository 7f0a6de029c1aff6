//! Cloth topology: the particle pool and its structural constraints.
//!
//! Particles are laid out row-major on a `(w + 1) × (h + 1)` grid,
//! slot `u + v * (w + 1)`, matching the render mesh vertex order.
//! Only structural constraints are built: one to the `+v` neighbor and
//! one to the `+u` neighbor wherever that neighbor exists. Relaxation
//! with structural constraints alone is enough for a plausible drape,
//! so there are no shear or bend constraints.

use nobori_mesh::Surface;
use nobori_types::{NoboriError, NoboriResult, ParticleId};

use crate::constraint::Constraint;
use crate::particle::Particle;

/// The particle pool and constraint list for one cloth.
///
/// Sized once at construction and never grown during a run.
#[derive(Debug, Clone)]
pub struct ClothTopology {
    width_segments: u32,
    height_segments: u32,
    particles: Vec<Particle>,
    constraints: Vec<Constraint>,
}

impl ClothTopology {
    /// Builds the cloth by sampling `surface` at `(u / w, v / h)` for every
    /// grid coordinate.
    ///
    /// Constraint creation order (the relaxation order):
    /// 1. every cell `(u, v)` with `u < w, v < h`: `(u,v)-(u,v+1)`, `(u,v)-(u+1,v)`
    /// 2. right column `u = w`: `(w,v)-(w,v+1)`
    /// 3. last row `v = h`: `(u,h)-(u+1,h)`
    ///
    /// Fails on zero segment counts, grids with more slots than a
    /// [`ParticleId`] can address, invalid mass or invalid rest distance.
    pub fn new<S: Surface + ?Sized>(
        width_segments: u32,
        height_segments: u32,
        rest_distance: f32,
        mass: f32,
        surface: &S,
    ) -> NoboriResult<Self> {
        if width_segments == 0 || height_segments == 0 {
            return Err(NoboriError::InvalidConfig(format!(
                "Grid must have at least one segment per axis (got {}×{})",
                width_segments, height_segments
            )));
        }
        let slots = (u64::from(width_segments) + 1) * (u64::from(height_segments) + 1);
        if slots > u64::from(u32::MAX) {
            return Err(NoboriError::InvalidConfig(format!(
                "Grid {}×{} has {} particles; slots are limited to {}",
                width_segments,
                height_segments,
                slots,
                u32::MAX
            )));
        }
        if !(rest_distance.is_finite() && rest_distance > 0.0) {
            return Err(NoboriError::InvalidRestDistance { rest_distance });
        }

        // Every slot fits in u32 from here on; the constraint count may not.
        let (w, h) = (width_segments, height_segments);
        let particle_count = slots as usize;

        let mut particles = Vec::with_capacity(particle_count);
        for v in 0..=h {
            for u in 0..=w {
                let p = surface.point(u as f32 / w as f32, v as f32 / h as f32);
                particles.push(Particle::new(p, mass)?);
            }
        }

        let slot = |u: u32, v: u32| ParticleId(u + v * (w + 1));
        let (wu, hu) = (w as usize, h as usize);
        let constraint_count = wu * (hu + 1) + hu * (wu + 1);
        let mut constraints = Vec::with_capacity(constraint_count);

        for v in 0..h {
            for u in 0..w {
                constraints.push(Constraint::new(slot(u, v), slot(u, v + 1), rest_distance)?);
                constraints.push(Constraint::new(slot(u, v), slot(u + 1, v), rest_distance)?);
            }
        }
        for v in 0..h {
            constraints.push(Constraint::new(slot(w, v), slot(w, v + 1), rest_distance)?);
        }
        for u in 0..w {
            constraints.push(Constraint::new(slot(u, h), slot(u + 1, h), rest_distance)?);
        }

        tracing::debug!(
            width_segments = w,
            height_segments = h,
            particles = particles.len(),
            constraints = constraints.len(),
            "cloth topology built"
        );

        Ok(Self {
            width_segments,
            height_segments,
            particles,
            constraints,
        })
    }

    #[inline]
    pub fn width_segments(&self) -> u32 {
        self.width_segments
    }

    #[inline]
    pub fn height_segments(&self) -> u32 {
        self.height_segments
    }

    #[inline]
    pub fn particle_count(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn constraint_count(&self) -> usize {
        self.constraints.len()
    }

    /// Slot of grid coordinate `(u, v)`.
    pub fn index(&self, u: u32, v: u32) -> NoboriResult<ParticleId> {
        if u > self.width_segments || v > self.height_segments {
            return Err(NoboriError::GridOutOfBounds {
                u,
                v,
                width: self.width_segments,
                height: self.height_segments,
            });
        }
        Ok(ParticleId(u + v * (self.width_segments + 1)))
    }

    /// Grid coordinate `(u, v)` of a slot. Inverse of [`index`](Self::index).
    pub fn coords(&self, id: ParticleId) -> NoboriResult<(u32, u32)> {
        self.check(id)?;
        let row = self.width_segments + 1;
        Ok((id.0 % row, id.0 / row))
    }

    pub fn particle(&self, id: ParticleId) -> NoboriResult<&Particle> {
        self.check(id)?;
        Ok(&self.particles[id.index()])
    }

    pub fn particle_mut(&mut self, id: ParticleId) -> NoboriResult<&mut Particle> {
        self.check(id)?;
        Ok(&mut self.particles[id.index()])
    }

    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub(crate) fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    #[inline]
    pub fn constraints(&self) -> &[Constraint] {
        &self.constraints
    }

    /// One relaxation pass over every constraint in creation order.
    pub fn relax(&mut self) {
        for constraint in &self.constraints {
            constraint.relax(&mut self.particles);
        }
    }

    /// Largest `distance / rest_distance` over all constraints.
    pub fn max_stretch(&self) -> f32 {
        self.constraints
            .iter()
            .map(|c| c.stretch(&self.particles))
            .fold(0.0, f32::max)
    }

    fn check(&self, id: ParticleId) -> NoboriResult<()> {
        if id.index() >= self.particles.len() {
            return Err(NoboriError::IndexOutOfBounds {
                index: id.index(),
                count: self.particles.len(),
            });
        }
        Ok(())
    }
}
