//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Extinguishing ---

/// Suppressed seconds needed to put out a fire at the default rate.
pub const DEFAULT_EXTINGUISH_TIME: f64 = 5.0;

/// Progress gained per second while the agent is in contact.
pub const DEFAULT_EXTINGUISH_RATE: f64 = 1.0;

/// Progress lost per second once suppression lapses (reignition pressure).
pub const DEFAULT_DECAY_RATE: f64 = 0.2;

/// Seconds without agent contact before suppression is considered stopped.
pub const DEFAULT_CONTACT_TIMEOUT: f64 = 0.5;

/// Distance (meters) within which a discharging extinguisher reaches a fire.
pub const DEFAULT_EFFECTIVE_RADIUS: f64 = 10.0;

// --- Auto-ignition ---

/// Shortest spark-to-fire delay (seconds).
pub const DEFAULT_AUTO_IGNITION_MIN_SECS: f64 = 5.0;

/// Longest spark-to-fire delay (seconds).
pub const DEFAULT_AUTO_IGNITION_MAX_SECS: f64 = 15.0;

// --- Scenario resolution ---

/// Settle delay between an instance completing and the scenario-wide check.
pub const COMPLETION_SETTLE_SECS: f64 = 0.1;

/// Settle delay expressed in ticks (at least one).
pub const COMPLETION_SETTLE_TICKS: u64 = {
    let ticks = (COMPLETION_SETTLE_SECS * TICK_RATE as f64 + 0.5) as u64;
    if ticks == 0 {
        1
    } else {
        ticks
    }
};

// --- Scoring ---

/// Points awarded for any extinguished fire.
pub const SCORE_BASE: i64 = 100;

/// Bonus for extinguishing within `SCORE_PERFECT_SECS`.
pub const SCORE_PERFECT_BONUS: i64 = 50;

/// Time limit (seconds) for the perfect bonus.
pub const SCORE_PERFECT_SECS: f64 = 3.0;

/// Bonus for extinguishing within `SCORE_GOOD_SECS`.
pub const SCORE_GOOD_BONUS: i64 = 25;

/// Time limit (seconds) for the good bonus.
pub const SCORE_GOOD_SECS: f64 = 7.0;

/// Burn time (seconds) after which the slow penalty applies.
pub const SCORE_PENALTY_AFTER_SECS: f64 = 15.0;

/// Points lost per second beyond `SCORE_PENALTY_AFTER_SECS`.
pub const SCORE_PENALTY_PER_SEC: f64 = 5.0;

/// Floor for a single fire's score.
pub const SCORE_MIN: i64 = 20;

// --- Engine ---

/// Upper bound for the time scale command.
pub const MAX_TIME_SCALE: f64 = 4.0;
