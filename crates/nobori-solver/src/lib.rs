//! # nobori-solver
//!
//! Verlet integration and relaxed-constraint (Jakobsen) cloth solver.
//!
//! ## Key Types
//!
//! - [`Particle`]: point mass with position history for Verlet integration
//! - [`Constraint`]: pairwise rest-length relation between two particle slots
//! - [`ClothTopology`]: particle pool + structural constraints built from a surface
//! - [`PinSet`]: particle slots restored to their rest position every frame
//! - [`SolverConfig`] / [`Wind`]: per-run parameters
//! - [`ClothSimulation`]: owns everything above and advances one frame per `step`

pub mod config;
pub mod constraint;
pub mod particle;
pub mod pins;
pub mod simulation;
pub mod topology;
pub mod wind;

pub use config::SolverConfig;
pub use constraint::Constraint;
pub use particle::Particle;
pub use pins::PinSet;
pub use simulation::{ClothSimulation, StepReport};
pub use topology::ClothTopology;
pub use wind::Wind;
