//! Fireline headless drill runner.
//!
//! ```bash
//! # Default layout, as fast as possible
//! fireline
//!
//! # Warehouse at wall-clock pace, double speed, verbose
//! fireline --scenario warehouse --realtime --time-scale 2 --log debug
//!
//! # Custom layout from JSON
//! fireline --config room.json --seed 7
//! ```

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use tracing::info;
use tracing_subscriber::EnvFilter;

use fireline_app::runner;
use fireline_core::config::ScenarioConfig;
use fireline_core::enums::ScenarioId;
use fireline_core::error::SimError;
use fireline_sim::engine::SimConfig;
use fireline_sim::scenario::build_scenario;

/// Fire-hazard training drill with a scripted trainee
#[derive(Parser, Debug)]
#[command(name = "fireline")]
#[command(version, about = "Headless fire-hazard training drill", long_about = None)]
struct Cli {
    /// Prebuilt layout to run (ignored when --config is given)
    #[arg(short, long, value_enum, default_value_t = ScenarioArg::ElectricalPanel)]
    scenario: ScenarioArg,

    /// Scenario JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// RNG seed (same seed, same drill)
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Stop after this much drill time in seconds
    #[arg(long, default_value_t = 120.0)]
    max_secs: f64,

    /// Pace ticks at wall-clock speed on the game loop thread
    #[arg(short, long)]
    realtime: bool,

    /// Time scale for --realtime (clamped to 0-4)
    #[arg(long, default_value_t = 1.0)]
    time_scale: f64,

    /// Log filter, e.g. "info" or "fireline_sim=debug" (overrides RUST_LOG)
    #[arg(long)]
    log: Option<String>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ScenarioArg {
    ElectricalPanel,
    Workshop,
    Warehouse,
}

impl From<ScenarioArg> for ScenarioId {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::ElectricalPanel => ScenarioId::ElectricalPanel,
            ScenarioArg::Workshop => ScenarioId::Workshop,
            ScenarioArg::Warehouse => ScenarioId::Warehouse,
        }
    }
}

fn main() -> Result<(), SimError> {
    let cli = Cli::parse();

    let filter = match &cli.log {
        Some(directives) => EnvFilter::new(directives),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let scenario = match &cli.config {
        Some(path) => ScenarioConfig::from_path(path)?,
        None => build_scenario(cli.scenario.into()),
    };
    let sim = SimConfig {
        seed: cli.seed,
        time_scale: cli.time_scale,
    };
    info!(
        "Running '{}' (seed {}, {})",
        scenario.name,
        cli.seed,
        if cli.realtime { "realtime" } else { "headless" }
    );

    let report = if cli.realtime {
        runner::run_realtime(sim, scenario, cli.max_secs)?
    } else {
        runner::run_headless(sim, scenario, cli.max_secs)?
    };

    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}
