//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Lifecycle state of one hazard site.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FireState {
    /// Sparks only, no countdown running.
    #[default]
    Dormant,
    /// Sparks with an auto-ignition deadline armed.
    AutoIgnitionPending,
    /// Fire active, no agent in contact.
    Burning,
    /// Fire active with agent in contact (a sub-mode of `Burning`).
    Suppressing,
    /// Progress reached its maximum this tick; resolves immediately.
    Extinguished,
    /// Terminal until an explicit reset.
    CompletelyExtinguished,
}

impl FireState {
    /// True for both plain burning and burning-while-suppressed.
    pub fn is_burning(self) -> bool {
        matches!(self, FireState::Burning | FireState::Suppressing)
    }

    /// True for states that can still ignite by contact or countdown.
    pub fn is_ignitable(self) -> bool {
        matches!(self, FireState::Dormant | FireState::AutoIgnitionPending)
    }
}

/// Top-level drill phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrillPhase {
    /// Scenario loaded (or not), clock stopped.
    #[default]
    Setup,
    Active,
    Paused,
    /// Every hazard resolved; final report emitted.
    Complete,
}

/// Prebuilt training layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScenarioId {
    /// Single sparking electrical panel next to the extinguisher station.
    ElectricalPanel,
    /// Bench grinder and fuel store, one ignites on contact only.
    Workshop,
    /// Several racks sparking on staggered timers.
    Warehouse,
}
