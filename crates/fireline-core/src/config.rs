//! Tunable configuration for hazard sites and scenario layouts.
//!
//! Every struct deserializes from JSON with defaults taken from
//! `constants`, so a scenario file only has to name what it changes.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::SimError;
use crate::types::{ExtinguisherId, FireId, Position};

/// Randomized spark-to-fire delay window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AutoIgnition {
    pub min_delay_secs: f64,
    pub max_delay_secs: f64,
}

/// Per-site tuning for the fire state machine.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireConfig {
    /// Progress value at which the fire is out (seconds of suppression at rate 1).
    pub extinguish_time: f64,
    /// Progress gained per second of agent contact.
    pub extinguish_rate: f64,
    /// Progress lost per second while suppression has lapsed.
    pub decay_rate: f64,
    /// Seconds without contact before suppression stops.
    pub contact_timeout: f64,
    /// Reach of a discharging extinguisher (meters).
    pub effective_radius: f64,
    /// `None` disables auto-ignition: the site only ignites on contact.
    pub auto_ignition: Option<AutoIgnition>,
}

/// One hazard site in a scenario layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FireSiteConfig {
    pub id: FireId,
    pub position: Position,
    #[serde(default)]
    pub config: FireConfig,
}

/// One extinguisher station in a scenario layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtinguisherConfig {
    pub id: ExtinguisherId,
    pub position: Position,
}

/// A complete training layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioConfig {
    pub name: String,
    pub fires: Vec<FireSiteConfig>,
    #[serde(default)]
    pub extinguishers: Vec<ExtinguisherConfig>,
}

impl Default for AutoIgnition {
    fn default() -> Self {
        Self {
            min_delay_secs: DEFAULT_AUTO_IGNITION_MIN_SECS,
            max_delay_secs: DEFAULT_AUTO_IGNITION_MAX_SECS,
        }
    }
}

impl Default for FireConfig {
    fn default() -> Self {
        Self {
            extinguish_time: DEFAULT_EXTINGUISH_TIME,
            extinguish_rate: DEFAULT_EXTINGUISH_RATE,
            decay_rate: DEFAULT_DECAY_RATE,
            contact_timeout: DEFAULT_CONTACT_TIMEOUT,
            effective_radius: DEFAULT_EFFECTIVE_RADIUS,
            auto_ignition: Some(AutoIgnition::default()),
        }
    }
}

impl AutoIgnition {
    /// Fixed delay (min == max).
    pub fn after(secs: f64) -> Self {
        Self {
            min_delay_secs: secs,
            max_delay_secs: secs,
        }
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if !self.min_delay_secs.is_finite() || self.min_delay_secs < 0.0 {
            return Err(SimError::InvalidConfig(format!(
                "auto-ignition min delay must be >= 0, got {}",
                self.min_delay_secs
            )));
        }
        if !self.max_delay_secs.is_finite() || self.max_delay_secs < self.min_delay_secs {
            return Err(SimError::InvalidConfig(format!(
                "auto-ignition max delay {} is below min delay {}",
                self.max_delay_secs, self.min_delay_secs
            )));
        }
        Ok(())
    }
}

impl FireConfig {
    /// Same tuning with auto-ignition turned off.
    pub fn contact_only() -> Self {
        Self {
            auto_ignition: None,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), SimError> {
        positive("extinguish_time", self.extinguish_time)?;
        positive("extinguish_rate", self.extinguish_rate)?;
        non_negative("decay_rate", self.decay_rate)?;
        non_negative("contact_timeout", self.contact_timeout)?;
        non_negative("effective_radius", self.effective_radius)?;
        if let Some(auto) = &self.auto_ignition {
            auto.validate()?;
        }
        Ok(())
    }
}

impl ScenarioConfig {
    /// Parse and validate a scenario from JSON.
    pub fn from_json(json: &str) -> Result<Self, SimError> {
        let config: ScenarioConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse, and validate a scenario file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SimError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), SimError> {
        let mut fire_ids = HashSet::new();
        for site in &self.fires {
            if !fire_ids.insert(site.id) {
                return Err(SimError::DuplicateFire(site.id));
            }
            site.config.validate()?;
        }
        let mut extinguisher_ids = HashSet::new();
        for ext in &self.extinguishers {
            if !extinguisher_ids.insert(ext.id) {
                return Err(SimError::InvalidConfig(format!(
                    "duplicate extinguisher {}",
                    ext.id
                )));
            }
        }
        Ok(())
    }
}

fn positive(name: &str, value: f64) -> Result<(), SimError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidConfig(format!(
            "{name} must be > 0, got {value}"
        )))
    }
}

fn non_negative(name: &str, value: f64) -> Result<(), SimError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidConfig(format!(
            "{name} must be >= 0, got {value}"
        )))
    }
}
