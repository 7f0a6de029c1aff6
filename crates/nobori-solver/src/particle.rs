//! Verlet particles.
//!
//! Velocity is never stored: it is implied by `position - previous`.

use glam::Vec3;
use nobori_types::{NoboriError, NoboriResult};

/// A point mass in the cloth.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Current location, rewritten every frame.
    pub position: Vec3,
    /// Location one timestep ago.
    pub previous: Vec3,
    /// Rest location from the surface function. Pins restore to it.
    pub original: Vec3,
    /// Force / mass accumulated since the last integration step.
    pub acceleration: Vec3,
    mass: f32,
    inv_mass: f32,
}

impl Particle {
    /// Creates a particle at rest at `position`.
    ///
    /// Fails with [`NoboriError::InvalidMass`] unless `mass` is positive and finite.
    pub fn new(position: Vec3, mass: f32) -> NoboriResult<Self> {
        if !(mass.is_finite() && mass > 0.0) {
            return Err(NoboriError::InvalidMass { mass });
        }
        Ok(Self {
            position,
            previous: position,
            original: position,
            acceleration: Vec3::ZERO,
            mass,
            inv_mass: 1.0 / mass,
        })
    }

    #[inline]
    pub fn mass(&self) -> f32 {
        self.mass
    }

    #[inline]
    pub fn inv_mass(&self) -> f32 {
        self.inv_mass
    }

    /// Accumulates `force / mass` into the acceleration.
    #[inline]
    pub fn add_force(&mut self, force: Vec3) {
        self.acceleration += force * self.inv_mass;
    }

    /// One damped Verlet step.
    ///
    /// `damping` is the fraction of implied velocity dropped this step;
    /// `dt_squared` is the square of the fixed timestep. Acceleration is
    /// consumed and reset to zero.
    #[inline]
    pub fn integrate(&mut self, dt_squared: f32, damping: f32) {
        let displacement = (self.position - self.previous) * (1.0 - damping);
        let next = self.position + displacement + self.acceleration * dt_squared;
        self.previous = self.position;
        self.position = next;
        self.acceleration = Vec3::ZERO;
    }

    /// Snaps back to the rest location with zero implied velocity.
    #[inline]
    pub fn restore(&mut self) {
        self.position = self.original;
        self.previous = self.original;
    }

    /// Displacement over the last step (`position - previous`).
    #[inline]
    pub fn implied_velocity(&self) -> Vec3 {
        self.position - self.previous
    }
}
