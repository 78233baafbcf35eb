//! Fire coordinator: owns every hazard site in the loaded scenario, the
//! scenario totals, and the settle-delayed completion check.
//!
//! Sites update in id order. Whenever one completes, the scenario-wide
//! check is (re)scheduled `COMPLETION_SETTLE_TICKS` ticks later and runs
//! after that tick's site updates.

use std::collections::BTreeMap;

use rand::Rng;
use tracing::{debug, info};

use fireline_core::config::AutoIgnition;
use fireline_core::constants::COMPLETION_SETTLE_TICKS;
use fireline_core::error::SimError;
use fireline_core::events::{FireEvent, ScenarioSummary};
use fireline_core::types::FireId;
use fireline_hazard::{FireCompletion, FireInstance, ScenarioTotals};

/// Registry of hazard sites plus scenario-level bookkeeping.
#[derive(Debug, Clone, Default)]
pub struct FireCoordinator {
    fires: BTreeMap<FireId, FireInstance>,
    totals: ScenarioTotals,
    /// Tick at which the completion check is due.
    pending_check: Option<u64>,
    /// Final report, once emitted.
    resolved: Option<ScenarioSummary>,
}

impl FireCoordinator {
    /// Empty coordinator whose scenario clock starts at `now`.
    pub fn new(now: f64) -> Self {
        Self {
            totals: ScenarioTotals::starting_at(now),
            ..Self::default()
        }
    }

    /// Add a hazard site. Ids must be unique.
    pub fn register(&mut self, fire: FireInstance) -> Result<(), SimError> {
        let id = fire.id();
        if self.fires.contains_key(&id) {
            return Err(SimError::DuplicateFire(id));
        }
        self.fires.insert(id, fire);
        Ok(())
    }

    /// Restart the scenario clock and arm every site's auto-ignition.
    /// Completions recorded during setup stay in the totals.
    pub fn start<R: Rng + ?Sized>(&mut self, now: f64, rng: &mut R, events: &mut Vec<FireEvent>) {
        self.totals.restart_clock(now);
        for fire in self.fires.values_mut() {
            fire.arm(now, rng, events);
        }
    }

    // --- Per-site operations ---

    pub fn start_fire(
        &mut self,
        id: FireId,
        now: f64,
        events: &mut Vec<FireEvent>,
    ) -> Result<bool, SimError> {
        Ok(self.fire_mut(id)?.ignite(now, events))
    }

    pub fn report_contact(
        &mut self,
        id: FireId,
        now: f64,
        events: &mut Vec<FireEvent>,
    ) -> Result<bool, SimError> {
        Ok(self.fire_mut(id)?.report_contact(now, events))
    }

    pub fn report_suppression_contact(
        &mut self,
        id: FireId,
        at: f64,
        events: &mut Vec<FireEvent>,
    ) -> Result<bool, SimError> {
        Ok(self.fire_mut(id)?.report_suppression_contact(at, events))
    }

    /// Complete a site immediately. Schedules the completion check when the
    /// site actually transitioned.
    pub fn force_extinguish(
        &mut self,
        id: FireId,
        now: f64,
        tick: u64,
        events: &mut Vec<FireEvent>,
    ) -> Result<Option<FireCompletion>, SimError> {
        let fire = self
            .fires
            .get_mut(&id)
            .ok_or(SimError::UnknownFire(id))?;
        let completion = fire.force_extinguish(now, &mut self.totals, events);
        if completion.is_some() {
            self.schedule_check(tick);
        }
        Ok(completion)
    }

    /// Return one site to sparks. A resolved scenario reopens and is
    /// checked again after the settle delay.
    pub fn reset_fire<R: Rng + ?Sized>(
        &mut self,
        id: FireId,
        now: f64,
        tick: u64,
        rng: &mut R,
        events: &mut Vec<FireEvent>,
    ) -> Result<(), SimError> {
        self.fire_mut(id)?.reset(now, rng, events);
        self.resolved = None;
        self.schedule_check(tick);
        Ok(())
    }

    /// Change a site's auto-ignition window. Disabling it on the last
    /// unresolved site can resolve the scenario, so a check is scheduled.
    pub fn set_auto_ignition<R: Rng + ?Sized>(
        &mut self,
        id: FireId,
        auto_ignition: Option<AutoIgnition>,
        now: f64,
        tick: u64,
        rng: &mut R,
        events: &mut Vec<FireEvent>,
    ) -> Result<(), SimError> {
        if let Some(window) = &auto_ignition {
            window.validate()?;
        }
        self.fire_mut(id)?
            .set_auto_ignition(auto_ignition, now, rng, events);
        self.schedule_check(tick);
        Ok(())
    }

    /// Reset totals (clock restarts at `now`) and every site.
    pub fn reset_scenario<R: Rng + ?Sized>(
        &mut self,
        now: f64,
        rng: &mut R,
        events: &mut Vec<FireEvent>,
    ) {
        self.totals.reset(now);
        self.pending_check = None;
        self.resolved = None;
        for fire in self.fires.values_mut() {
            fire.reset(now, rng, events);
        }
        info!("Scenario reset ({} sites)", self.fires.len());
    }

    // --- Tick ---

    /// Update every site, then run the completion check if it is due.
    /// Returns the summary on the tick the scenario resolves.
    pub fn update(
        &mut self,
        now: f64,
        dt: f64,
        tick: u64,
        events: &mut Vec<FireEvent>,
    ) -> Option<ScenarioSummary> {
        let mut completed = false;
        for fire in self.fires.values_mut() {
            if fire.update(now, dt, &mut self.totals, events).is_some() {
                completed = true;
            }
        }
        if completed {
            self.schedule_check(tick);
        }

        match self.pending_check {
            Some(due) if tick >= due => {
                self.pending_check = None;
                self.evaluate_completion(now, events)
            }
            _ => None,
        }
    }

    /// Scenario-wide check. Resolves when nothing burns, every site that
    /// ever burned is completely extinguished, every site that never burned
    /// cannot ignite by itself (or was neutralized), and at least one fire
    /// was put out. Emits the report once per resolution.
    pub fn evaluate_completion(
        &mut self,
        now: f64,
        events: &mut Vec<FireEvent>,
    ) -> Option<ScenarioSummary> {
        if self.resolved.is_some() || !self.all_hazards_resolved() {
            return None;
        }

        let summary = self.totals.finish(now);
        info!(
            "All fires out: {} points over {} fires in {:.1}s",
            summary.total_score, summary.fires_completed, summary.total_elapsed_secs
        );
        events.push(FireEvent::ScenarioCompleted {
            summary: summary.clone(),
        });
        events.push(FireEvent::StatusChanged {
            fire_id: None,
            message: summary.message(),
        });
        self.resolved = Some(summary.clone());
        Some(summary)
    }

    fn all_hazards_resolved(&self) -> bool {
        if self.totals.fires_completed() == 0 {
            return false;
        }
        self.fires.values().all(|fire| {
            if fire.is_burning() {
                false
            } else if fire.has_ever_started() {
                fire.is_completely_extinguished()
            } else {
                !fire.auto_ignition_enabled() || fire.is_completely_extinguished()
            }
        })
    }

    fn schedule_check(&mut self, tick: u64) {
        let due = tick + COMPLETION_SETTLE_TICKS;
        debug!("Completion check scheduled for tick {}", due);
        self.pending_check = Some(due);
    }

    fn fire_mut(&mut self, id: FireId) -> Result<&mut FireInstance, SimError> {
        self.fires.get_mut(&id).ok_or(SimError::UnknownFire(id))
    }

    // --- Queries ---

    pub fn fire(&self, id: FireId) -> Option<&FireInstance> {
        self.fires.get(&id)
    }

    /// All sites in id order.
    pub fn fires(&self) -> impl Iterator<Item = &FireInstance> {
        self.fires.values()
    }

    pub fn len(&self) -> usize {
        self.fires.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fires.is_empty()
    }

    pub fn burning_count(&self) -> usize {
        self.fires.values().filter(|f| f.is_burning()).count()
    }

    pub fn totals(&self) -> &ScenarioTotals {
        &self.totals
    }

    pub fn pending_check(&self) -> Option<u64> {
        self.pending_check
    }

    pub fn summary(&self) -> Option<&ScenarioSummary> {
        self.resolved.as_ref()
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved.is_some()
    }
}
