//! # nobori-types
//!
//! Shared types, identifiers, error types, and physical constants
//! for the Nobori cloth simulator.
//!
//! This crate has zero domain logic: it defines the vocabulary
//! that all other Nobori crates share.

pub mod constants;
pub mod error;
pub mod ids;
pub mod scalar;

pub use error::{NoboriError, NoboriResult};
pub use ids::ParticleId;
pub use scalar::Scalar;
