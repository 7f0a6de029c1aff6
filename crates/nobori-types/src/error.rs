//! Error types for the Nobori simulator.
//!
//! All crates return `NoboriResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for the Nobori simulator.
#[derive(Debug, Error)]
pub enum NoboriError {
    /// Particle mass is zero, negative or not finite.
    #[error("Invalid particle mass: {mass} (must be positive and finite)")]
    InvalidMass { mass: f32 },

    /// Constraint rest distance is zero, negative or not finite.
    #[error("Invalid rest distance: {rest_distance} (must be positive and finite)")]
    InvalidRestDistance { rest_distance: f32 },

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Grid coordinate outside `[0, width] × [0, height]`.
    #[error("Grid coordinate ({u}, {v}) out of bounds (grid: {width}×{height} segments)")]
    GridOutOfBounds {
        u: u32,
        v: u32,
        width: u32,
        height: u32,
    },

    /// Particle index outside the particle pool.
    #[error("Particle index {index} out of bounds (count: {count})")]
    IndexOutOfBounds { index: usize, count: usize },

    /// Per-frame input arrays disagree with the particle pool.
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// Mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, NoboriError>`.
pub type NoboriResult<T> = Result<T, NoboriError>;
