//! Error type shared by the simulation crates.

use std::fmt;

use crate::types::{ExtinguisherId, FireId};

/// Failures surfaced by fallible simulation APIs.
///
/// The per-tick core never fails; these cover lookups by id and
/// configuration loading.
#[derive(Debug)]
pub enum SimError {
    /// No hazard site registered under this id.
    UnknownFire(FireId),
    /// No extinguisher registered under this id.
    UnknownExtinguisher(ExtinguisherId),
    /// A hazard site with this id is already registered.
    DuplicateFire(FireId),
    /// A configuration value is out of range.
    InvalidConfig(String),
    /// Scenario JSON could not be parsed.
    Parse(serde_json::Error),
    /// Reading a scenario file or starting the loop thread failed.
    Io(std::io::Error),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::UnknownFire(id) => write!(f, "unknown fire {id}"),
            SimError::UnknownExtinguisher(id) => write!(f, "unknown extinguisher {id}"),
            SimError::DuplicateFire(id) => write!(f, "fire {id} is already registered"),
            SimError::InvalidConfig(msg) => write!(f, "invalid configuration: {msg}"),
            SimError::Parse(e) => write!(f, "failed to parse scenario: {e}"),
            SimError::Io(e) => write!(f, "i/o error: {e}"),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::Parse(e) => Some(e),
            SimError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for SimError {
    fn from(e: serde_json::Error) -> Self {
        SimError::Parse(e)
    }
}

impl From<std::io::Error> for SimError {
    fn from(e: std::io::Error) -> Self {
        SimError::Io(e)
    }
}
