//! Extinguish progress integrator.
//!
//! Plain numeric state: advances while the agent is in contact, decays back
//! toward zero when contact lapses before the fire is out. No clock, no
//! events; the owning `FireInstance` decides when to call it.

use fireline_core::config::FireConfig;

/// Bounded suppression accumulator in `[0, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtinguishProgress {
    value: f64,
    max: f64,
    rate: f64,
    decay_rate: f64,
}

impl ExtinguishProgress {
    pub fn new(max: f64, rate: f64, decay_rate: f64) -> Self {
        Self {
            value: 0.0,
            max: max.max(f64::MIN_POSITIVE),
            rate: rate.max(0.0),
            decay_rate: decay_rate.max(0.0),
        }
    }

    pub fn from_config(config: &FireConfig) -> Self {
        Self::new(
            config.extinguish_time,
            config.extinguish_rate,
            config.decay_rate,
        )
    }

    /// Integrate one tick. Returns true if the value changed.
    ///
    /// Suppressed: `value += rate * dt`. Otherwise a partially suppressed
    /// fire decays by `decay_rate * dt`, floored at zero. Untouched (0) and
    /// finished (max) values stay put.
    pub fn advance(&mut self, suppressing: bool, dt: f64) -> bool {
        let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
        let before = self.value;

        if suppressing {
            self.value = (self.value + self.rate * dt).min(self.max);
        } else if self.value > 0.0 && self.value < self.max {
            self.value = (self.value - self.decay_rate * dt).max(0.0);
        }

        self.value != before
    }

    /// Jump straight to the maximum (forced extinguish).
    pub fn fill(&mut self) {
        self.value = self.max;
    }

    pub fn reset(&mut self) {
        self.value = 0.0;
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    /// Progress as a fraction in `[0, 1]`.
    pub fn fraction(&self) -> f64 {
        (self.value / self.max).clamp(0.0, 1.0)
    }

    pub fn is_complete(&self) -> bool {
        self.value >= self.max
    }

    /// Suppressed seconds still needed to finish at the configured rate.
    pub fn remaining_secs(&self) -> Option<f64> {
        if self.rate > 0.0 {
            Some((self.max - self.value) / self.rate)
        } else {
            None
        }
    }
}
