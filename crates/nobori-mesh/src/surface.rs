//! Parametric surfaces.
//!
//! A surface maps grid parameters `(u, v) ∈ [0, 1]²` to a rest position.
//! The same surface is evaluated once per particle by the solver and once
//! per vertex by the display mesh generator, so implementations must be
//! deterministic.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// A deterministic `(u, v) → position` mapping.
pub trait Surface {
    /// Returns the rest position at grid parameters `(u, v)`.
    fn point(&self, u: f32, v: f32) -> Vec3;
}

impl<F> Surface for F
where
    F: Fn(f32, f32) -> Vec3,
{
    #[inline]
    fn point(&self, u: f32, v: f32) -> Vec3 {
        self(u, v)
    }
}

/// A flat rectangle in the XY plane at `z = 0`.
///
/// `x = (u - offset_u) * width`, `y = (v - offset_v) * height`.
/// The offsets position the cloth relative to its attachment pole.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaneSurface {
    /// Extent along X.
    pub width: f32,
    /// Extent along Y.
    pub height: f32,
    /// Value of `u` that maps to `x = 0`.
    pub offset_u: f32,
    /// Value of `v` that maps to `y = 0`.
    pub offset_v: f32,
}

impl PlaneSurface {
    /// Plane sized so every grid segment is exactly `rest_distance` long.
    pub fn for_grid(
        rest_distance: f32,
        width_segments: u32,
        height_segments: u32,
        offset_u: f32,
        offset_v: f32,
    ) -> Self {
        Self {
            width: rest_distance * width_segments as f32,
            height: rest_distance * height_segments as f32,
            offset_u,
            offset_v,
        }
    }
}

impl Default for PlaneSurface {
    fn default() -> Self {
        Self {
            width: 1.0,
            height: 1.0,
            offset_u: 0.0,
            offset_v: 0.0,
        }
    }
}

impl Surface for PlaneSurface {
    #[inline]
    fn point(&self, u: f32, v: f32) -> Vec3 {
        Vec3::new(
            (u - self.offset_u) * self.width,
            (v - self.offset_v) * self.height,
            0.0,
        )
    }
}
