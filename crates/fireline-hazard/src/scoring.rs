//! Scoring: per-fire score from time-to-extinguish, plus the scenario totals
//! accumulator.

use tracing::info;

use fireline_core::constants::*;
use fireline_core::events::ScenarioSummary;

/// Score for one fire that burned for `time_to_extinguish` seconds.
///
/// 100 base, +50 within 3 s, +25 within 7 s, no bonus up to 15 s, then
/// minus `round((t - 15) * 5)` with a floor of 20. Rounding is
/// half-to-even so results match the training app bit for bit.
pub fn score(time_to_extinguish: f64) -> u32 {
    let t = if time_to_extinguish.is_nan() {
        0.0
    } else {
        time_to_extinguish.max(0.0)
    };

    let mut points = SCORE_BASE;
    if t <= SCORE_PERFECT_SECS {
        points += SCORE_PERFECT_BONUS;
    } else if t <= SCORE_GOOD_SECS {
        points += SCORE_GOOD_BONUS;
    } else if t > SCORE_PENALTY_AFTER_SECS {
        let over = ((t - SCORE_PENALTY_AFTER_SECS) * SCORE_PENALTY_PER_SEC).round_ties_even();
        // Saturating float->int cast keeps an absurd burn time at the floor.
        points = (points - over as i64).max(SCORE_MIN);
    }

    points as u32
}

/// Cumulative results for one scenario run.
///
/// Written only by `record` (a completing fire) and `reset`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScenarioTotals {
    total_score: u32,
    total_elapsed_secs: f64,
    fires_completed: u32,
    scenario_start_secs: f64,
}

impl ScenarioTotals {
    /// Fresh totals for a run starting at `now`.
    pub fn starting_at(now: f64) -> Self {
        Self {
            scenario_start_secs: now,
            ..Self::default()
        }
    }

    /// Score a completed fire and fold it into the totals. Returns the score.
    pub fn record(&mut self, time_to_extinguish: f64) -> u32 {
        let points = score(time_to_extinguish);
        self.total_score = self.total_score.saturating_add(points);
        self.fires_completed += 1;
        info!(
            "Fire #{} extinguished in {:.1}s - score {}",
            self.fires_completed, time_to_extinguish, points
        );
        points
    }

    /// Clear everything and restart the scenario clock at `now`.
    pub fn reset(&mut self, now: f64) {
        *self = Self::starting_at(now);
    }

    /// Move the scenario clock start to `now`, keeping the score so far.
    pub fn restart_clock(&mut self, now: f64) {
        self.scenario_start_secs = now;
    }

    /// Stamp the total elapsed time and build the final report.
    pub fn finish(&mut self, now: f64) -> ScenarioSummary {
        self.total_elapsed_secs = (now - self.scenario_start_secs).max(0.0);
        ScenarioSummary {
            total_score: self.total_score,
            total_elapsed_secs: self.total_elapsed_secs,
            fires_completed: self.fires_completed,
            average_score: self.average_score(),
        }
    }

    pub fn total_score(&self) -> u32 {
        self.total_score
    }

    pub fn total_elapsed_secs(&self) -> f64 {
        self.total_elapsed_secs
    }

    pub fn fires_completed(&self) -> u32 {
        self.fires_completed
    }

    pub fn scenario_start_secs(&self) -> f64 {
        self.scenario_start_secs
    }

    /// Mean score per completed fire, `None` before the first completion.
    pub fn average_score(&self) -> Option<f64> {
        if self.fires_completed == 0 {
            None
        } else {
            Some(self.total_score as f64 / self.fires_completed as f64)
        }
    }
}
