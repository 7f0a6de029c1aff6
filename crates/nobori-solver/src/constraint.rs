//! Distance constraints and their relaxation.

use nobori_types::{NoboriError, NoboriResult, ParticleId};

use crate::particle::Particle;

/// Keeps two particles `rest_distance` apart.
///
/// Endpoints are slots in the owning particle pool, not references.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Constraint {
    a: ParticleId,
    b: ParticleId,
    rest_distance: f32,
}

impl Constraint {
    /// Fails with [`NoboriError::InvalidRestDistance`] unless `rest_distance`
    /// is positive and finite.
    pub fn new(a: ParticleId, b: ParticleId, rest_distance: f32) -> NoboriResult<Self> {
        if !(rest_distance.is_finite() && rest_distance > 0.0) {
            return Err(NoboriError::InvalidRestDistance { rest_distance });
        }
        Ok(Self { a, b, rest_distance })
    }

    #[inline]
    pub fn a(&self) -> ParticleId {
        self.a
    }

    #[inline]
    pub fn b(&self) -> ParticleId {
        self.b
    }

    #[inline]
    pub fn rest_distance(&self) -> f32 {
        self.rest_distance
    }

    /// Current endpoint distance divided by the rest distance.
    pub fn stretch(&self, particles: &[Particle]) -> f32 {
        let d = particles[self.b.index()].position - particles[self.a.index()].position;
        d.length() / self.rest_distance
    }

    /// Moves both endpoints halfway toward satisfying the rest distance.
    ///
    /// The correction is split 50/50 regardless of particle mass.
    /// Coincident endpoints are left untouched.
    ///
    /// # Panics
    /// If either endpoint is outside `particles`.
    pub fn relax(&self, particles: &mut [Particle]) {
        let (ia, ib) = (self.a.index(), self.b.index());
        let delta = particles[ib].position - particles[ia].position;
        let current = delta.length();
        if current == 0.0 {
            return;
        }
        let half = delta * (1.0 - self.rest_distance / current) * 0.5;
        particles[ia].position += half;
        particles[ib].position -= half;
    }
}
