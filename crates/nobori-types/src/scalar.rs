//! Scalar type alias for the simulation.
//!
//! Positions are stored as `f32` to match the `glam::Vec3` layout the
//! renderer copies from every frame.

/// The floating-point type used for particle state.
pub type Scalar = f32;
