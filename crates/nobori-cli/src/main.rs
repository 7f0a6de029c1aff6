//! Nobori CLI: run, validate and list cloth scenarios.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "nobori")]
#[command(version, about = "Nobori: real-time particle cloth simulator")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a preset or a scenario file headlessly and report metrics.
    Simulate {
        /// Which preset to run (banner, curtain, all).
        #[arg(short, long, default_value = "all", conflicts_with = "config")]
        scenario: String,

        /// Path to a scenario file (TOML) instead of a preset.
        #[arg(short, long)]
        config: Option<String>,

        /// Override the number of frames.
        #[arg(short, long)]
        frames: Option<u32>,

        /// Output CSV file path.
        #[arg(short, long)]
        output: Option<String>,

        /// Write the final mesh of the last scenario as JSON.
        #[arg(long)]
        mesh_json: Option<String>,
    },

    /// Validate a scenario file (.toml) or an exported mesh (.json).
    Validate {
        /// Path to scenario or mesh file.
        path: String,
    },

    /// List the built-in scenarios.
    Scenarios,
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Simulate {
            scenario,
            config,
            frames,
            output,
            mesh_json,
        } => commands::simulate(
            &scenario,
            config.as_deref(),
            frames,
            output.as_deref(),
            mesh_json.as_deref(),
        ),
        Commands::Validate { path } => commands::validate(&path),
        Commands::Scenarios => commands::scenarios(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
