//! Hazard-site logic for Fireline.
//!
//! The per-fire state machine, the extinguish progress integrator, and
//! scoring. Pure data and functions driven by the caller's clock; no engine
//! or ECS dependency.

pub mod fire;
pub mod progress;
pub mod scoring;

pub use fire::{order_tick_notifications, FireCompletion, FireInstance};
pub use progress::ExtinguishProgress;
pub use scoring::{score, ScenarioTotals};

pub use fireline_core as core;
