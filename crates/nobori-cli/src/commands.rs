//! CLI command implementations.

use nobori_bench::metrics::RunMetrics;
use nobori_bench::runner::ScenarioRunner;
use nobori_bench::scenarios::{PinLayout, ScenarioConfig, ScenarioKind};
use nobori_mesh::TriangleMesh;

/// Run presets or a scenario file and report metrics.
pub fn simulate(
    scenario_name: &str,
    config_path: Option<&str>,
    frames: Option<u32>,
    output_path: Option<&str>,
    mesh_json_path: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Nobori Simulation");
    println!("═════════════════");
    println!();

    let mut configs: Vec<ScenarioConfig> = if let Some(path) = config_path {
        println!("Config: {path}");
        println!();
        let config =
            ScenarioConfig::load(path).map_err(|e| format!("Failed to load {path}: {e}"))?;
        tracing::debug!(path, scenario = %config.name, "scenario file loaded");
        vec![config]
    } else if scenario_name == "all" {
        ScenarioKind::all().iter().map(|k| k.config()).collect()
    } else {
        let kind = ScenarioKind::from_name(scenario_name).ok_or_else(|| {
            let available: Vec<&str> = ScenarioKind::all().iter().map(|k| k.name()).collect();
            format!(
                "Unknown scenario: '{scenario_name}'. Available: {}, all",
                available.join(", ")
            )
        })?;
        vec![kind.config()]
    };

    if let Some(n) = frames {
        for config in &mut configs {
            config.frames = n;
        }
    }

    let mut all_metrics = Vec::new();
    let mut last_mesh: Option<TriangleMesh> = None;

    for config in &configs {
        println!(
            "Running: {} ({}×{} grid, {} frames, {} warm-up)",
            config.name,
            config.width_segments,
            config.height_segments,
            config.frames,
            config.warmup_frames,
        );

        let (metrics, mesh) = ScenarioRunner::run_config(config)
            .map_err(|e| format!("Scenario '{}' failed: {e}", config.name))?;

        println!("  Wall time:     {:.3}s", metrics.total_wall_time);
        println!("  Avg step:      {:.4}ms", metrics.avg_step_time * 1000.0);
        println!("  Min y:         {:.2}", metrics.min_y);
        println!("  Max displace:  {:.2}", metrics.max_displacement);
        println!("  Max stretch:   {:.4}", metrics.max_stretch);
        println!("  Floor hits:    {}", metrics.floor_contacts);
        println!();

        all_metrics.push(metrics);
        last_mesh = Some(mesh);
    }

    if let Some(path) = output_path {
        let csv = RunMetrics::to_csv(&all_metrics);
        std::fs::write(path, &csv)?;
        println!("Results written to: {path}");
    } else {
        println!("CSV Output:");
        println!("{}", RunMetrics::to_csv(&all_metrics));
    }

    if let (Some(path), Some(mesh)) = (mesh_json_path, last_mesh) {
        let json = serde_json::to_string(&mesh)?;
        std::fs::write(path, json)?;
        println!("Mesh written to: {path}");
    }

    Ok(())
}

/// Validate a scenario file or an exported mesh.
pub fn validate(path: &str) -> Result<(), Box<dyn std::error::Error>> {
    println!("Nobori Validator");
    println!("────────────────");
    println!();

    if path.ends_with(".toml") {
        println!("Validating scenario: {path}");
        let config = ScenarioConfig::load(path)?;
        // Building runs every construction check: grid, mass, pins, solver.
        match config.build() {
            Ok((sim, _)) => println!(
                "✅ Scenario '{}' is valid ({} particles, {} constraints, {} pins).",
                config.name,
                sim.topology().particle_count(),
                sim.topology().constraint_count(),
                sim.pins().len(),
            ),
            Err(e) => {
                println!("❌ Scenario validation failed: {e}");
                return Err(e.into());
            }
        }
    } else if path.ends_with(".json") {
        println!("Validating mesh: {path}");
        let content = std::fs::read_to_string(path)?;
        let mesh: TriangleMesh = serde_json::from_str(&content)?;
        match mesh.validate() {
            Ok(()) => println!(
                "✅ Mesh is valid ({} verts, {} tris).",
                mesh.vertex_count(),
                mesh.triangle_count()
            ),
            Err(e) => {
                println!("❌ Mesh validation failed: {e}");
                return Err(e.into());
            }
        }
    } else {
        return Err("Unsupported file format. Use .toml (scenario) or .json (mesh).".into());
    }

    Ok(())
}

/// List built-in scenarios.
pub fn scenarios() -> Result<(), Box<dyn std::error::Error>> {
    println!("Built-in scenarios");
    println!("──────────────────");
    for kind in ScenarioKind::all() {
        let config = kind.config();
        let pins = match &config.pins {
            PinLayout::None => "none".to_string(),
            PinLayout::Row { v } => format!("row {v}"),
            PinLayout::Column { u } => format!("column {u}"),
            PinLayout::Indices { indices } => format!("{} slots", indices.len()),
        };
        println!(
            "  {:<8} {}×{} segments, rest {}, mass {}, gravity {}, pins: {}",
            kind.name(),
            config.width_segments,
            config.height_segments,
            config.rest_distance,
            config.mass,
            config.solver.gravity,
            pins,
        );
    }
    Ok(())
}
