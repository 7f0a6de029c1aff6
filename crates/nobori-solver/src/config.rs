//! Solver configuration.
//!
//! Set once per run. Every field has a default, so TOML files only need
//! the values they change.

use nobori_types::constants;
use nobori_types::{NoboriError, NoboriResult};
use serde::{Deserialize, Serialize};

use crate::wind::Wind;

/// Configuration for the cloth solver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Fixed integration timestep (seconds).
    pub timestep: f32,

    /// Gravitational acceleration magnitude, applied along -Y.
    pub gravity: f32,

    /// Fraction of implied velocity removed each step (0 = none, 1 = all).
    pub damping: f32,

    /// Particles are clamped to `y >= floor_y`.
    pub floor_y: f32,

    /// Relaxation passes over all constraints per frame.
    /// More passes give stiffer, less stretchy cloth.
    pub relaxation_passes: u32,

    /// Wind model.
    pub wind: Wind,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            timestep: constants::TIMESTEP,
            gravity: constants::GRAVITY,
            damping: constants::DAMPING,
            floor_y: constants::FLOOR_Y,
            relaxation_passes: constants::DEFAULT_RELAXATION_PASSES,
            wind: Wind::Gusting,
        }
    }
}

impl SolverConfig {
    /// No gravity and no wind. Useful for isolating constraint behavior.
    pub fn still() -> Self {
        Self {
            gravity: 0.0,
            wind: Wind::Calm,
            ..Default::default()
        }
    }

    pub fn with_relaxation_passes(mut self, passes: u32) -> Self {
        self.relaxation_passes = passes;
        self
    }

    pub fn with_wind(mut self, wind: Wind) -> Self {
        self.wind = wind;
        self
    }

    /// Square of the fixed timestep, as consumed by integration.
    #[inline]
    pub fn dt_squared(&self) -> f32 {
        self.timestep * self.timestep
    }

    /// Checks that every parameter is usable.
    pub fn validate(&self) -> NoboriResult<()> {
        if !(self.timestep.is_finite() && self.timestep > 0.0) {
            return Err(NoboriError::InvalidConfig(format!(
                "timestep must be positive and finite (got {})",
                self.timestep
            )));
        }
        if !(0.0..=1.0).contains(&self.damping) {
            return Err(NoboriError::InvalidConfig(format!(
                "damping must be in [0, 1] (got {})",
                self.damping
            )));
        }
        if self.relaxation_passes == 0 {
            return Err(NoboriError::InvalidConfig(
                "relaxation_passes must be at least 1".into(),
            ));
        }
        if !self.gravity.is_finite() {
            return Err(NoboriError::InvalidConfig("gravity must be finite".into()));
        }
        if !self.floor_y.is_finite() {
            return Err(NoboriError::InvalidConfig("floor_y must be finite".into()));
        }
        if let Wind::Steady { force } = self.wind {
            if force.iter().any(|c| !c.is_finite()) {
                return Err(NoboriError::InvalidConfig("wind force must be finite".into()));
            }
        }
        Ok(())
    }
}
