//! Commands sent by input and presentation adapters to the simulation.
//!
//! Commands are queued and applied at the next tick boundary, before any
//! hazard site updates.

use serde::{Deserialize, Serialize};

use crate::config::{AutoIgnition, ScenarioConfig};
use crate::enums::ScenarioId;
use crate::types::{ExtinguisherId, FireId, Position};

/// All operations exposed to external collaborators.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum DrillCommand {
    // --- Scenario control ---
    /// Load a prebuilt layout (replaces any current scenario).
    LoadScenario { scenario: ScenarioId },
    /// Load a layout supplied by the caller.
    LoadCustomScenario { config: ScenarioConfig },
    /// Start the clock for the loaded scenario.
    StartScenario,
    /// Reset totals and every hazard site, then resume.
    ResetScenario,
    Pause,
    Resume,
    /// Set time scale (1.0 = normal, 0.0 = paused pacing).
    SetTimeScale { scale: f64 },

    // --- Manual overrides on one hazard site ---
    /// Force ignition unless the site is completely extinguished.
    StartFire { fire_id: FireId },
    /// Non-agent object touched the site (ignites sparks).
    ReportContact { fire_id: FireId },
    /// Agent contact at `timestamp` (defaults to the current time).
    ReportSuppressionContact {
        fire_id: FireId,
        #[serde(default)]
        timestamp: Option<f64>,
    },
    /// Fill progress and complete immediately.
    ForceExtinguish { fire_id: FireId },
    /// Return one site to sparks.
    ResetFire { fire_id: FireId },
    /// Replace the site's auto-ignition window (`None` = contact only).
    SetAutoIgnition {
        fire_id: FireId,
        #[serde(default)]
        auto_ignition: Option<AutoIgnition>,
    },

    // --- Extinguishers ---
    /// Open or close the extinguisher valve.
    SetDischarge {
        extinguisher_id: ExtinguisherId,
        discharging: bool,
    },
    /// Carry the extinguisher somewhere else.
    MoveExtinguisher {
        extinguisher_id: ExtinguisherId,
        position: Position,
    },
}
