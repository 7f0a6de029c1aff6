//! Scenarios: grid, surface placement, pins, solver config and run length.
//!
//! Two presets:
//! 1. **Banner**: a tall nobori flag held along its pole and top bar
//! 2. **Curtain**: a square sheet hanging from one edge
//!
//! Any scenario can also be written as TOML; every field is optional.
//! Omitted fields take the banner's values, except that pins default to
//! row 0 and the name to `custom`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use nobori_mesh::generators::parametric_grid;
use nobori_mesh::{PlaneSurface, TriangleMesh};
use nobori_solver::{ClothSimulation, ClothTopology, PinSet, SolverConfig};
use nobori_types::constants::FRAME_INTERVAL_MS;
use nobori_types::{NoboriError, NoboriResult};

/// Banner pins: the pole side (`u = 0`, bottom to top) then the top bar
/// (`v = 29`, right to left).
const BANNER_PINS: [u32; 39] = [
    0, 10, 20, 30, 40, 50, 60, 70, 80, 90, 100, 110, 120, 130, 140, 150, 160, 170, 180, 190, 200,
    210, 220, 230, 240, 250, 260, 270, 280, 299, 298, 297, 296, 295, 294, 293, 292, 291, 290,
];

/// Which preset to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioKind {
    /// 9×29 banner pinned along pole and top bar.
    Banner,
    /// 10×10 curtain pinned along one edge.
    Curtain,
}

impl ScenarioKind {
    /// Returns all scenario kinds.
    pub fn all() -> &'static [ScenarioKind] {
        &[ScenarioKind::Banner, ScenarioKind::Curtain]
    }

    /// Returns a human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioKind::Banner => "banner",
            ScenarioKind::Curtain => "curtain",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|k| k.name() == name)
    }

    pub fn config(&self) -> ScenarioConfig {
        match self {
            ScenarioKind::Banner => ScenarioConfig::banner(),
            ScenarioKind::Curtain => ScenarioConfig::curtain(),
        }
    }
}

/// Which particles are pinned.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PinLayout {
    /// Free fall.
    #[default]
    None,
    /// Whole grid row `v`.
    Row { v: u32 },
    /// Whole grid column `u`.
    Column { u: u32 },
    /// Explicit particle slots.
    Indices { indices: Vec<u32> },
}

impl PinLayout {
    pub fn resolve(&self, topology: &ClothTopology) -> NoboriResult<PinSet> {
        match self {
            PinLayout::None => Ok(PinSet::empty()),
            PinLayout::Row { v } => PinSet::row(topology, *v),
            PinLayout::Column { u } => PinSet::column(topology, *u),
            PinLayout::Indices { indices } => {
                PinSet::from_indices(indices, topology.particle_count())
            }
        }
    }
}

/// A fully specified scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    /// Label used in logs and metrics.
    pub name: String,
    /// Grid segments along `u`.
    pub width_segments: u32,
    /// Grid segments along `v`.
    pub height_segments: u32,
    /// Rest length of every structural constraint.
    pub rest_distance: f32,
    /// Mass of every particle.
    pub mass: f32,
    /// Plane surface offsets; the plane is sized from the grid.
    pub offset_u: f32,
    pub offset_v: f32,
    /// Frames to simulate.
    pub frames: u32,
    /// Host clock advance per frame (ms).
    pub frame_interval_ms: f64,
    /// Frames run before the measured run, on a reversed clock
    /// (`now = 500 - 10 * i`).
    pub warmup_frames: u32,
    /// Pinned particles.
    pub pins: PinLayout,
    /// Solver parameters.
    pub solver: SolverConfig,
}

/// Banner cloth and solver values, hung from row 0 so the pin layout
/// fits whatever grid a file asks for.
impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            name: "custom".to_string(),
            pins: PinLayout::Row { v: 0 },
            ..Self::banner()
        }
    }
}

impl ScenarioConfig {
    /// The nobori banner: 9×29 segments of 15 units, light cloth, gentle gravity.
    pub fn banner() -> Self {
        Self {
            name: ScenarioKind::Banner.name().to_string(),
            width_segments: 9,
            height_segments: 29,
            rest_distance: 15.0,
            mass: 0.2,
            offset_u: 1.0,
            offset_v: 0.3,
            frames: 600,
            frame_interval_ms: FRAME_INTERVAL_MS,
            warmup_frames: 0,
            pins: PinLayout::Indices {
                indices: BANNER_PINS.to_vec(),
            },
            solver: SolverConfig::default(),
        }
    }

    /// The square curtain: 10×10 segments of 25 units hanging from row 0.
    pub fn curtain() -> Self {
        Self {
            name: ScenarioKind::Curtain.name().to_string(),
            width_segments: 10,
            height_segments: 10,
            rest_distance: 25.0,
            mass: 0.1,
            offset_u: 0.5,
            offset_v: -0.5,
            frames: 600,
            frame_interval_ms: FRAME_INTERVAL_MS,
            warmup_frames: 0,
            pins: PinLayout::Row { v: 0 },
            solver: SolverConfig {
                gravity: 981.0 * 1.4,
                ..SolverConfig::default()
            },
        }
    }

    pub fn from_toml_str(text: &str) -> NoboriResult<Self> {
        toml::from_str(text).map_err(|e| NoboriError::Serialization(e.to_string()))
    }

    pub fn load(path: impl AsRef<Path>) -> NoboriResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    pub fn to_toml_string(&self) -> NoboriResult<String> {
        toml::to_string_pretty(self).map_err(|e| NoboriError::Serialization(e.to_string()))
    }

    /// Plane sized so every segment is exactly `rest_distance`.
    pub fn surface(&self) -> PlaneSurface {
        PlaneSurface::for_grid(
            self.rest_distance,
            self.width_segments,
            self.height_segments,
            self.offset_u,
            self.offset_v,
        )
    }

    /// Checks run parameters. Grid, mass and solver values are checked
    /// when the simulation is built.
    pub fn validate(&self) -> NoboriResult<()> {
        if !(self.frame_interval_ms.is_finite() && self.frame_interval_ms >= 0.0) {
            return Err(NoboriError::InvalidConfig(format!(
                "frame_interval_ms must be finite and non-negative (got {})",
                self.frame_interval_ms
            )));
        }
        self.solver.validate()
    }

    /// Builds the simulation (pins installed) and its display mesh.
    pub fn build(&self) -> NoboriResult<(ClothSimulation, TriangleMesh)> {
        self.validate()?;
        let surface = self.surface();
        let topology = ClothTopology::new(
            self.width_segments,
            self.height_segments,
            self.rest_distance,
            self.mass,
            &surface,
        )?;
        let pins = self.pins.resolve(&topology)?;
        let simulation = ClothSimulation::new(topology, self.solver.clone())?.with_pins(pins)?;
        let mesh = parametric_grid(&surface, self.width_segments, self.height_segments);
        Ok((simulation, mesh))
    }
}
