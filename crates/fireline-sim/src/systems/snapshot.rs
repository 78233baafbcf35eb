//! Snapshot system: reads the world and coordinator into a `DrillSnapshot`.
//!
//! Read-only; never modifies state.

use hecs::World;

use fireline_core::components::Extinguisher;
use fireline_core::enums::DrillPhase;
use fireline_core::events::FireEvent;
use fireline_core::state::*;
use fireline_core::types::{ExtinguisherId, Position, SimTime};

use crate::coordinator::FireCoordinator;

/// Build the complete snapshot for the current tick.
pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: DrillPhase,
    scenario: Option<&str>,
    coordinator: &FireCoordinator,
    alarm_active: bool,
    events: Vec<FireEvent>,
) -> DrillSnapshot {
    DrillSnapshot {
        time: *time,
        phase,
        scenario: scenario.map(str::to_string),
        fires: build_fires(coordinator),
        extinguishers: build_extinguishers(world),
        score: build_score(time, coordinator),
        alarm_active,
        events,
        summary: coordinator.summary().cloned(),
    }
}

fn build_fires(coordinator: &FireCoordinator) -> Vec<FireView> {
    coordinator
        .fires()
        .map(|fire| FireView {
            fire_id: fire.id(),
            position: fire.position(),
            state: fire.state(),
            progress: fire.progress_fraction(),
            status: fire.status(),
            has_ever_started: fire.has_ever_started(),
            ignites_in_secs: fire.ignites_in(),
            score: fire.score(),
        })
        .collect()
}

fn build_extinguishers(world: &World) -> Vec<ExtinguisherView> {
    let mut views: Vec<ExtinguisherView> = world
        .query::<(&ExtinguisherId, &Position, &Extinguisher)>()
        .iter()
        .map(|(_, (id, pos, ext))| ExtinguisherView {
            extinguisher_id: *id,
            position: *pos,
            discharging: ext.discharging,
        })
        .collect();

    views.sort_by_key(|e| e.extinguisher_id);
    views
}

fn build_score(time: &SimTime, coordinator: &FireCoordinator) -> ScoreView {
    let totals = coordinator.totals();
    let scenario_time_secs = match coordinator.summary() {
        Some(summary) => summary.total_elapsed_secs,
        None => (time.elapsed_secs - totals.scenario_start_secs()).max(0.0),
    };
    ScoreView {
        total_score: totals.total_score(),
        fires_completed: totals.fires_completed(),
        fires_burning: coordinator.burning_count() as u32,
        fires_total: coordinator.len() as u32,
        scenario_time_secs,
    }
}
