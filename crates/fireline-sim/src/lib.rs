//! Simulation engine for Fireline.
//!
//! Owns the hecs world, the fire coordinator, and the drill clock, runs the
//! per-tick systems, and produces `DrillSnapshot`s for adapters.

pub mod coordinator;
pub mod engine;
pub mod scenario;
pub mod systems;
pub mod world_setup;

pub use coordinator::FireCoordinator;
pub use engine::{SimConfig, SimulationEngine};
pub use fireline_core as core;

#[cfg(test)]
mod tests;
