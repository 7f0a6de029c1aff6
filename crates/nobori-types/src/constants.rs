//! Physical constants and simulation defaults.
//!
//! Units follow the scene: distances are in scene units (the banner is
//! 135 × 435 units), time in seconds for integration and milliseconds for
//! the wind clock.

use crate::scalar::Scalar;

/// Fraction of implicit velocity removed per integration step.
pub const DAMPING: Scalar = 0.09;

/// Fixed integration timestep (seconds).
pub const TIMESTEP: Scalar = 18.0 / 1000.0;

/// Default gravitational acceleration (scene units / s²).
pub const GRAVITY: Scalar = 300.0;

/// Default floor height. Particles are clamped to `y >= FLOOR_Y`.
pub const FLOOR_Y: Scalar = -250.0;

/// Relaxation passes per frame.
pub const DEFAULT_RELAXATION_PASSES: u32 = 1;

/// Interval between host frames (milliseconds), one display refresh at 60 Hz.
pub const FRAME_INTERVAL_MS: f64 = 1000.0 / 60.0;

/// Mean wind strength.
pub const WIND_BASE_STRENGTH: Scalar = 40.0;

/// Amplitude of the slow wind strength oscillation.
pub const WIND_STRENGTH_AMPLITUDE: Scalar = 20.0;

/// Period divisor (ms) for the wind strength oscillation.
pub const WIND_STRENGTH_PERIOD_MS: f64 = 7000.0;

/// Period divisors (ms) for the x, y and z wind direction components.
pub const WIND_DIRECTION_PERIODS_MS: [f64; 3] = [2000.0, 3000.0, 1000.0];
