//! Notifications emitted by the simulation for audio, effects, and UI.

use serde::{Deserialize, Serialize};

use crate::types::FireId;

/// State-change notifications, in emission order within a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FireEvent {
    /// Site started or stopped burning.
    FireStateChanged { fire_id: FireId, is_active: bool },
    /// Extinguish progress moved (fraction in [0, 1]).
    ExtinguishProgressChanged { fire_id: FireId, fraction: f64 },
    /// Human-readable status line. `fire_id` is `None` for scenario-wide text.
    StatusChanged {
        fire_id: Option<FireId>,
        message: String,
    },
    /// Every hazard resolved.
    ScenarioCompleted { summary: ScenarioSummary },
    /// At least one fire burning (true) or none (false).
    AlarmChanged { active: bool },
}

/// Final drill report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSummary {
    pub total_score: u32,
    pub total_elapsed_secs: f64,
    pub fires_completed: u32,
    /// `None` when no fire was completed.
    pub average_score: Option<f64>,
}

impl ScenarioSummary {
    /// Multi-line report shown on the status board.
    pub fn message(&self) -> String {
        let average = self
            .average_score
            .map(|avg| format!("{avg:.0}"))
            .unwrap_or_else(|| "-".to_string());
        format!(
            "ALL FIRES COMPLETELY EXTINGUISHED!\n\
             Total Score: {} points\n\
             Total Time: {:.1} seconds\n\
             Fires Extinguished: {}\n\
             Average Score: {} per fire\n\
             No more fire hazards remain!",
            self.total_score, self.total_elapsed_secs, self.fires_completed, average
        )
    }
}
