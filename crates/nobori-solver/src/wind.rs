//! Wind models.
//!
//! `now` is the host's frame clock in milliseconds. It only drives the
//! wind oscillation and carries no other physical meaning.

use glam::Vec3;
use nobori_types::constants::{
    WIND_BASE_STRENGTH, WIND_DIRECTION_PERIODS_MS, WIND_STRENGTH_AMPLITUDE,
    WIND_STRENGTH_PERIOD_MS,
};
use serde::{Deserialize, Serialize};

/// Wind acting on the cloth surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Wind {
    /// No wind.
    Calm,
    /// Fixed force vector.
    Steady { force: [f32; 3] },
    /// Slowly rotating, pulsing wind.
    #[default]
    Gusting,
}

impl Wind {
    /// Wind force vector at host time `now` (ms).
    pub fn force_at(&self, now: f64) -> Vec3 {
        match *self {
            Wind::Calm => Vec3::ZERO,
            Wind::Steady { force } => Vec3::from_array(force),
            Wind::Gusting => gust_direction(now) * gust_strength(now),
        }
    }
}

/// `cos(now / 7000) * 20 + 40`, in `[20, 60]`.
pub fn gust_strength(now: f64) -> f32 {
    ((now / WIND_STRENGTH_PERIOD_MS).cos() as f32) * WIND_STRENGTH_AMPLITUDE + WIND_BASE_STRENGTH
}

/// Unit vector `normalize(sin(now/2000), cos(now/3000), sin(now/1000))`.
pub fn gust_direction(now: f64) -> Vec3 {
    let [px, py, pz] = WIND_DIRECTION_PERIODS_MS;
    Vec3::new(
        (now / px).sin() as f32,
        (now / py).cos() as f32,
        (now / pz).sin() as f32,
    )
    .normalize_or_zero()
}
