//! Drill snapshot: the complete visible state handed to adapters each tick.

use serde::{Deserialize, Serialize};

use crate::enums::{DrillPhase, FireState};
use crate::events::{FireEvent, ScenarioSummary};
use crate::types::{ExtinguisherId, FireId, Position, SimTime};

/// Complete drill state produced after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DrillSnapshot {
    pub time: SimTime,
    pub phase: DrillPhase,
    /// Name of the loaded layout, if any.
    pub scenario: Option<String>,
    pub fires: Vec<FireView>,
    pub extinguishers: Vec<ExtinguisherView>,
    pub score: ScoreView,
    pub alarm_active: bool,
    /// Notifications raised since the previous snapshot, in order.
    pub events: Vec<FireEvent>,
    /// Present once the scenario has resolved.
    pub summary: Option<ScenarioSummary>,
}

/// One hazard site for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FireView {
    pub fire_id: FireId,
    pub position: Position,
    pub state: FireState,
    /// Extinguish progress (0.0 - 1.0).
    pub progress: f64,
    pub status: String,
    pub has_ever_started: bool,
    /// Seconds until auto-ignition, while a countdown is armed.
    pub ignites_in_secs: Option<f64>,
    /// Score, once completely extinguished after burning.
    pub score: Option<u32>,
}

/// Extinguisher station for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtinguisherView {
    pub extinguisher_id: ExtinguisherId,
    pub position: Position,
    pub discharging: bool,
}

/// Running score for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScoreView {
    pub total_score: u32,
    pub fires_completed: u32,
    pub fires_burning: u32,
    pub fires_total: u32,
    pub scenario_time_secs: f64,
}
