//! Fireline headless drill runner.
//!
//! Wires the simulation engine to a scripted trainee, either stepping it as
//! fast as possible or pacing it on a game loop thread at the tick rate.

pub mod game_loop;
pub mod runner;
pub mod state;
pub mod trainee;

pub use fireline_core as core;
