//! # nobori-bench
//!
//! Scenario presets, the headless host loop, and run metrics for the
//! Nobori cloth simulator.
//!
//! The runner plays the renderer's part each frame: it copies particle
//! positions into the display mesh and recomputes the normals the solver
//! needs for the next frame's wind.

pub mod metrics;
pub mod runner;
pub mod scenarios;

pub use metrics::RunMetrics;
pub use runner::ScenarioRunner;
pub use scenarios::{PinLayout, ScenarioConfig, ScenarioKind};
