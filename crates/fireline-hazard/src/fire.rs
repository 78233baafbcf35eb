//! Fire instance state machine.
//!
//! One `FireInstance` per hazard site. It owns its timers and extinguish
//! progress and is driven by the caller: `update` once per tick, plus the
//! discrete inputs (contact, suppression contact, overrides). No ECS or
//! engine dependency; notifications are appended to a caller-owned buffer.
//!
//! ```text
//! Dormant ──arm──> AutoIgnitionPending ──deadline──┐
//!    │                     │                       v
//!    └──────contact────────┴──────────────────> Burning <──> Suppressing
//!                                                  │
//!                                   progress full  v
//!                           Extinguished ──> CompletelyExtinguished
//! ```

use rand::Rng;
use tracing::{debug, info};

use fireline_core::config::{AutoIgnition, FireConfig};
use fireline_core::enums::FireState;
use fireline_core::events::FireEvent;
use fireline_core::types::{FireId, Position};

use crate::progress::ExtinguishProgress;
use crate::scoring::ScenarioTotals;

const MSG_FIRE_DETECTED: &str = "FIRE DETECTED! Extinguish quickly for bonus points!";
const MSG_SUPPRESSION_ACTIVE: &str = "Suppression active! Keep spraying to extinguish the fire!";
const MSG_SUPPRESSION_STOPPED: &str = "Suppression stopped! Fire may grow stronger - keep spraying!";
const MSG_CANNOT_IGNITE: &str = "Cannot start fire - completely extinguished";
const MSG_NO_HAZARD: &str = "Fire completely extinguished - no hazard";
const MSG_NEUTRALIZED: &str = "Hazard neutralized before ignition";
const MSG_RESET: &str = "System reset. Sparks active - ready for fire trigger.";

/// Result of a site reaching `CompletelyExtinguished`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireCompletion {
    pub fire_id: FireId,
    /// Burn time, `None` if the site was neutralized before it ever burned.
    pub time_to_extinguish: Option<f64>,
    /// Points awarded, `None` if nothing burned.
    pub score: Option<u32>,
}

/// Notifications gathered during one operation, flushed in the fixed
/// state -> progress -> status order. Later status text replaces earlier.
#[derive(Default)]
struct Notes {
    active: Option<bool>,
    progress: Option<f64>,
    status: Option<String>,
}

impl Notes {
    fn status(&mut self, message: impl Into<String>) {
        self.status = Some(message.into());
    }

    fn flush(self, fire_id: FireId, events: &mut Vec<FireEvent>) {
        if let Some(is_active) = self.active {
            events.push(FireEvent::FireStateChanged { fire_id, is_active });
        }
        if let Some(fraction) = self.progress {
            events.push(FireEvent::ExtinguishProgressChanged { fire_id, fraction });
        }
        if let Some(message) = self.status {
            events.push(FireEvent::StatusChanged {
                fire_id: Some(fire_id),
                message,
            });
        }
    }
}

/// State machine for one hazard site.
#[derive(Debug, Clone)]
pub struct FireInstance {
    id: FireId,
    position: Position,
    config: FireConfig,
    /// Stored state; never `Suppressing` (see `is_being_suppressed`).
    state: FireState,
    is_being_suppressed: bool,
    auto_ignition_deadline: Option<f64>,
    fire_start_time: Option<f64>,
    progress: ExtinguishProgress,
    has_ever_started: bool,
    is_completely_extinguished: bool,
    last_suppression_contact: Option<f64>,
    score: Option<u32>,
    time_to_extinguish: Option<f64>,
    /// Latest time this instance has seen, for countdown queries.
    last_seen: f64,
    /// Whole seconds last announced by the countdown status.
    countdown_shown: Option<u64>,
}

impl FireInstance {
    /// New site in `Dormant`. Call `arm` to start any auto-ignition countdown.
    pub fn new(id: FireId, position: Position, config: FireConfig) -> Self {
        Self {
            id,
            position,
            progress: ExtinguishProgress::from_config(&config),
            config,
            state: FireState::Dormant,
            is_being_suppressed: false,
            auto_ignition_deadline: None,
            fire_start_time: None,
            has_ever_started: false,
            is_completely_extinguished: false,
            last_suppression_contact: None,
            score: None,
            time_to_extinguish: None,
            last_seen: 0.0,
            countdown_shown: None,
        }
    }

    // --- Inputs ---

    /// Arm the auto-ignition countdown if enabled and not already armed.
    pub fn arm<R: Rng + ?Sized>(&mut self, now: f64, rng: &mut R, events: &mut Vec<FireEvent>) {
        let mut notes = Notes::default();
        self.arm_inner(now, rng, &mut notes);
        notes.flush(self.id, events);
    }

    /// Manual ignition. No-op if already burning; refused once completely
    /// extinguished. Returns true if the site ignited.
    pub fn ignite(&mut self, now: f64, events: &mut Vec<FireEvent>) -> bool {
        let mut notes = Notes::default();
        let ignited = self.ignite_inner(now, &mut notes, false);
        notes.flush(self.id, events);
        ignited
    }

    /// Something other than the suppression agent touched the site.
    pub fn report_contact(&mut self, now: f64, events: &mut Vec<FireEvent>) -> bool {
        if self.state.is_burning() {
            return false;
        }
        self.ignite(now, events)
    }

    /// Agent reached the site at time `at`. Refreshes the contact timer and
    /// starts suppression if it was not already running.
    pub fn report_suppression_contact(&mut self, at: f64, events: &mut Vec<FireEvent>) -> bool {
        let mut notes = Notes::default();
        let accepted = if self.is_completely_extinguished {
            notes.status(MSG_NO_HAZARD);
            false
        } else if !self.state.is_burning() {
            false
        } else {
            let latest = self.last_suppression_contact.map_or(at, |prev| prev.max(at));
            self.last_suppression_contact = Some(latest);
            if !self.is_being_suppressed {
                self.is_being_suppressed = true;
                debug!("{} suppression started", self.id);
                notes.status(MSG_SUPPRESSION_ACTIVE);
            }
            true
        };
        notes.flush(self.id, events);
        accepted
    }

    /// Override: complete immediately. A burning site is scored as usual; a
    /// site that never ignited is neutralized without a score. Idempotent
    /// once completely extinguished.
    pub fn force_extinguish(
        &mut self,
        now: f64,
        totals: &mut ScenarioTotals,
        events: &mut Vec<FireEvent>,
    ) -> Option<FireCompletion> {
        if self.is_completely_extinguished {
            return None;
        }
        self.last_seen = self.last_seen.max(now);
        let mut notes = Notes::default();
        let completion = if self.state.is_burning() {
            self.progress.fill();
            self.complete(now, totals, &mut notes)
        } else {
            self.neutralize(&mut notes)
        };
        notes.flush(self.id, events);
        Some(completion)
    }

    /// Return to sparks: clears every sticky flag, timer, and progress, then
    /// re-arms auto-ignition if enabled.
    pub fn reset<R: Rng + ?Sized>(&mut self, now: f64, rng: &mut R, events: &mut Vec<FireEvent>) {
        let mut notes = Notes::default();
        let was_active = self.state.is_burning();
        let had_progress = self.progress.value() > 0.0;

        self.state = FireState::Dormant;
        self.is_being_suppressed = false;
        self.auto_ignition_deadline = None;
        self.fire_start_time = None;
        self.progress.reset();
        self.has_ever_started = false;
        self.is_completely_extinguished = false;
        self.last_suppression_contact = None;
        self.score = None;
        self.time_to_extinguish = None;
        self.last_seen = now;
        self.countdown_shown = None;

        self.arm_inner(now, rng, &mut notes);

        notes.active = Some(false);
        if had_progress {
            notes.progress = Some(0.0);
        }
        notes.status(MSG_RESET);
        info!("{} reset (was active: {})", self.id, was_active);
        notes.flush(self.id, events);
    }

    /// Replace the auto-ignition window. Disabling cancels a pending
    /// countdown; enabling arms one if the site is still dormant.
    pub fn set_auto_ignition<R: Rng + ?Sized>(
        &mut self,
        auto_ignition: Option<AutoIgnition>,
        now: f64,
        rng: &mut R,
        events: &mut Vec<FireEvent>,
    ) {
        self.config.auto_ignition = auto_ignition;
        let mut notes = Notes::default();
        if self.state == FireState::AutoIgnitionPending {
            self.auto_ignition_deadline = None;
            self.countdown_shown = None;
            self.state = FireState::Dormant;
        }
        if self.auto_ignition_enabled() {
            self.arm_inner(now, rng, &mut notes);
        } else if self.state == FireState::Dormant {
            notes.status(self.status());
        }
        notes.flush(self.id, events);
    }

    // --- Tick ---

    /// Advance one tick ending at `now` with length `dt`.
    ///
    /// Burning: expire stale suppression, integrate progress, complete when
    /// full. Dormant/pending: fire when the countdown deadline passes.
    pub fn update(
        &mut self,
        now: f64,
        dt: f64,
        totals: &mut ScenarioTotals,
        events: &mut Vec<FireEvent>,
    ) -> Option<FireCompletion> {
        self.last_seen = self.last_seen.max(now);
        let mut notes = Notes::default();
        let mut completion = None;

        if self.state.is_burning() {
            if self.is_being_suppressed {
                let last = self.last_suppression_contact.unwrap_or(now);
                if now - last > self.config.contact_timeout {
                    self.is_being_suppressed = false;
                    debug!("{} suppression lapsed", self.id);
                    notes.status(MSG_SUPPRESSION_STOPPED);
                }
            }

            if self.progress.advance(self.is_being_suppressed, dt) {
                notes.progress = Some(self.progress.fraction());
            }

            if self.progress.is_complete() {
                completion = Some(self.complete(now, totals, &mut notes));
            }
        } else if self.state.is_ignitable() {
            if let Some(deadline) = self.auto_ignition_deadline {
                if now >= deadline {
                    self.ignite_inner(now, &mut notes, true);
                } else {
                    let secs = (deadline - now).ceil() as u64;
                    if self.countdown_shown != Some(secs) {
                        self.countdown_shown = Some(secs);
                        notes.status(countdown_message(secs));
                    }
                }
            }
        }

        notes.flush(self.id, events);
        completion
    }

    // --- Queries ---

    pub fn id(&self) -> FireId {
        self.id
    }

    pub fn position(&self) -> Position {
        self.position
    }

    pub fn config(&self) -> &FireConfig {
        &self.config
    }

    /// Reported state; `Suppressing` while burning with agent contact.
    pub fn state(&self) -> FireState {
        if self.state.is_burning() && self.is_being_suppressed {
            FireState::Suppressing
        } else {
            self.state
        }
    }

    pub fn is_burning(&self) -> bool {
        self.state.is_burning()
    }

    pub fn is_being_suppressed(&self) -> bool {
        self.is_being_suppressed
    }

    pub fn has_ever_started(&self) -> bool {
        self.has_ever_started
    }

    pub fn is_completely_extinguished(&self) -> bool {
        self.is_completely_extinguished
    }

    pub fn auto_ignition_enabled(&self) -> bool {
        self.config.auto_ignition.is_some()
    }

    pub fn auto_ignition_deadline(&self) -> Option<f64> {
        self.auto_ignition_deadline
    }

    /// Seconds until auto-ignition, measured from the latest tick seen.
    pub fn ignites_in(&self) -> Option<f64> {
        self.auto_ignition_deadline
            .map(|deadline| (deadline - self.last_seen).max(0.0))
    }

    pub fn fire_start_time(&self) -> Option<f64> {
        self.fire_start_time
    }

    pub fn last_suppression_contact(&self) -> Option<f64> {
        self.last_suppression_contact
    }

    pub fn progress(&self) -> &ExtinguishProgress {
        &self.progress
    }

    /// Extinguish progress as a fraction in `[0, 1]`.
    pub fn progress_fraction(&self) -> f64 {
        self.progress.fraction()
    }

    pub fn score(&self) -> Option<u32> {
        self.score
    }

    pub fn time_to_extinguish(&self) -> Option<f64> {
        self.time_to_extinguish
    }

    /// Status line for the site's display board.
    pub fn status(&self) -> String {
        if self.is_completely_extinguished {
            return MSG_NO_HAZARD.to_string();
        }
        match self.state() {
            FireState::AutoIgnitionPending if !self.has_ever_started => {
                let secs = self.ignites_in().unwrap_or(0.0).ceil() as u64;
                countdown_message(secs)
            }
            FireState::Dormant | FireState::AutoIgnitionPending => {
                "Sparks active - potential fire hazard".to_string()
            }
            FireState::Suppressing => "Fire being suppressed".to_string(),
            FireState::Burning => "Fire active - use the extinguisher!".to_string(),
            FireState::Extinguished | FireState::CompletelyExtinguished => {
                "Fire extinguished".to_string()
            }
        }
    }

    // --- Internals ---

    fn arm_inner<R: Rng + ?Sized>(&mut self, now: f64, rng: &mut R, notes: &mut Notes) {
        let Some(window) = self.config.auto_ignition else {
            return;
        };
        if !self.state.is_ignitable() || self.auto_ignition_deadline.is_some() {
            return;
        }

        let lo = window.min_delay_secs.max(0.0);
        let hi = window.max_delay_secs.max(lo);
        let delay = if hi > lo { rng.gen_range(lo..=hi) } else { lo };

        self.last_seen = self.last_seen.max(now);
        self.auto_ignition_deadline = Some(now + delay);
        self.state = FireState::AutoIgnitionPending;
        let secs = delay.ceil() as u64;
        self.countdown_shown = Some(secs);
        notes.status(countdown_message(secs));
        debug!("{} auto-ignition armed for {:.1}s", self.id, delay);
    }

    fn ignite_inner(&mut self, now: f64, notes: &mut Notes, automatic: bool) -> bool {
        if self.is_completely_extinguished {
            notes.status(MSG_CANNOT_IGNITE);
            debug!("{} ignition refused: completely extinguished", self.id);
            return false;
        }
        if self.state.is_burning() {
            return false;
        }

        self.state = FireState::Burning;
        self.fire_start_time = Some(now);
        self.has_ever_started = true;
        self.auto_ignition_deadline = None;
        self.countdown_shown = None;
        self.score = None;
        self.time_to_extinguish = None;

        notes.active = Some(true);
        notes.status(MSG_FIRE_DETECTED);
        if automatic {
            info!("{} auto-ignited from sparks", self.id);
        } else {
            info!("{} ignited", self.id);
        }
        true
    }

    fn complete(&mut self, now: f64, totals: &mut ScenarioTotals, notes: &mut Notes) -> FireCompletion {
        self.state = FireState::Extinguished;
        self.is_being_suppressed = false;

        let burn_time = (now - self.fire_start_time.unwrap_or(now)).max(0.0);
        let points = totals.record(burn_time);

        self.state = FireState::CompletelyExtinguished;
        self.is_completely_extinguished = true;
        self.score = Some(points);
        self.time_to_extinguish = Some(burn_time);

        notes.active = Some(false);
        notes.progress = Some(self.progress.fraction());
        notes.status(format!("Fire extinguished! +{points} points ({burn_time:.1}s)"));
        info!("{} completely extinguished after {:.1}s", self.id, burn_time);

        FireCompletion {
            fire_id: self.id,
            time_to_extinguish: Some(burn_time),
            score: Some(points),
        }
    }

    fn neutralize(&mut self, notes: &mut Notes) -> FireCompletion {
        self.auto_ignition_deadline = None;
        self.countdown_shown = None;
        self.progress.fill();
        self.state = FireState::CompletelyExtinguished;
        self.is_completely_extinguished = true;

        notes.status(MSG_NEUTRALIZED);
        info!("{} neutralized before ignition", self.id);

        FireCompletion {
            fire_id: self.id,
            time_to_extinguish: None,
            score: None,
        }
    }
}

/// Regroup one tick's notifications so each site's come out as
/// state -> progress -> status, sites in id order. Within a kind, emission
/// order is kept. Scenario-wide notifications follow the site ones.
pub fn order_tick_notifications(events: &mut [FireEvent]) {
    events.sort_by_key(|event| match event {
        FireEvent::FireStateChanged { fire_id, .. } => (0, Some(*fire_id), 0),
        FireEvent::ExtinguishProgressChanged { fire_id, .. } => (0, Some(*fire_id), 1),
        FireEvent::StatusChanged {
            fire_id: Some(fire_id),
            ..
        } => (0, Some(*fire_id), 2),
        _ => (1, None, 0),
    });
}

fn countdown_message(secs: u64) -> String {
    format!("Sparks active - Fire may start in {secs}s")
}
