//! Drill runners: step the engine with the scripted trainee, either as fast
//! as possible or paced on the game loop thread, and collect a report.

use std::sync::mpsc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use fireline_core::commands::DrillCommand;
use fireline_core::config::ScenarioConfig;
use fireline_core::constants::{DT, TICK_RATE};
use fireline_core::error::SimError;
use fireline_core::events::{FireEvent, ScenarioSummary};
use fireline_core::state::{DrillSnapshot, FireView};
use fireline_sim::engine::{SimConfig, SimulationEngine};

use crate::game_loop;
use crate::state::AppState;
use crate::trainee::Trainee;

/// Final outcome of one run, printed as JSON by the binary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrillReport {
    pub scenario: Option<String>,
    /// True once every hazard resolved.
    pub completed: bool,
    pub ticks: u64,
    pub elapsed_secs: f64,
    pub summary: Option<ScenarioSummary>,
    pub fires: Vec<FireView>,
}

impl DrillReport {
    fn from_snapshot(snapshot: &DrillSnapshot) -> Self {
        Self {
            scenario: snapshot.scenario.clone(),
            completed: snapshot.summary.is_some(),
            ticks: snapshot.time.tick,
            elapsed_secs: snapshot.time.elapsed_secs,
            summary: snapshot.summary.clone(),
            fires: snapshot.fires.clone(),
        }
    }
}

/// Upper bound on ticks for a run capped at `max_secs` of drill time.
fn tick_budget(max_secs: f64) -> u64 {
    (max_secs.max(0.0) * TICK_RATE as f64).ceil() as u64
}

fn trainee_for(config: &ScenarioConfig) -> Result<Trainee, SimError> {
    config
        .extinguishers
        .first()
        .map(|ext| Trainee::new(ext.id))
        .ok_or_else(|| SimError::InvalidConfig("scenario has no extinguisher".into()))
}

fn log_status(events: &[FireEvent]) {
    for event in events {
        if let FireEvent::StatusChanged { fire_id, message } = event {
            match fire_id {
                Some(id) => info!("[{id}] {message}"),
                None => info!("{message}"),
            }
        }
    }
}

/// Run the drill to resolution or `max_secs` without pacing.
pub fn run_headless(
    sim: SimConfig,
    scenario: ScenarioConfig,
    max_secs: f64,
) -> Result<DrillReport, SimError> {
    let trainee = trainee_for(&scenario)?;
    let mut engine = SimulationEngine::new(sim);
    engine.load_scenario(scenario)?;
    engine.queue_command(DrillCommand::StartScenario);

    let budget = tick_budget(max_secs);
    let mut snapshot = engine.tick();
    log_status(&snapshot.events);
    while snapshot.summary.is_none() && snapshot.time.tick < budget {
        engine.queue_commands(trainee.act(&snapshot, DT));
        snapshot = engine.tick();
        log_status(&snapshot.events);
    }

    if snapshot.summary.is_none() {
        warn!("Drill not resolved after {:.1}s", snapshot.time.elapsed_secs);
    }
    Ok(DrillReport::from_snapshot(&snapshot))
}

/// Run the drill on the game loop thread at wall-clock pace.
pub fn run_realtime(
    sim: SimConfig,
    scenario: ScenarioConfig,
    max_secs: f64,
) -> Result<DrillReport, SimError> {
    let trainee = trainee_for(&scenario)?;
    let state = AppState::new();
    let (snap_tx, snap_rx) = mpsc::channel();
    let (cmd_tx, handle) =
        game_loop::spawn_game_loop(sim, state.latest_snapshot.clone(), snap_tx)?;
    if let Ok(mut lock) = state.command_tx.lock() {
        *lock = Some(cmd_tx);
    }

    state.send(DrillCommand::LoadCustomScenario { config: scenario });
    state.send(DrillCommand::StartScenario);

    let budget = tick_budget(max_secs);
    let mut last: Option<DrillSnapshot> = None;
    while let Ok(snapshot) = snap_rx.recv_timeout(Duration::from_secs(1)) {
        log_status(&snapshot.events);
        let done = snapshot.summary.is_some() || snapshot.time.tick >= budget;
        if !done {
            for command in trainee.act(&snapshot, DT) {
                state.send(command);
            }
        }
        last = Some(snapshot);
        if done {
            break;
        }
    }

    state.shutdown();
    if handle.join().is_err() {
        warn!("Game loop thread panicked");
    }

    let snapshot = last
        .or_else(|| state.snapshot())
        .ok_or_else(|| SimError::InvalidConfig("game loop produced no snapshot".into()))?;
    Ok(DrillReport::from_snapshot(&snapshot))
}
