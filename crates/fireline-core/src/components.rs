//! ECS components for hecs entities.
//!
//! Plain data; logic lives in the sim crate's systems. Extinguisher
//! entities carry `ExtinguisherId`, `Position`, and `Extinguisher`.

use serde::{Deserialize, Serialize};

/// A portable extinguisher in the scene.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Extinguisher {
    /// Valve open: agent is leaving the nozzle.
    pub discharging: bool,
}
