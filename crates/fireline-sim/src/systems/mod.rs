//! Per-tick systems.
//!
//! Systems are free functions over the ECS world and the coordinator. They
//! hold no state of their own.

pub mod alarm;
pub mod snapshot;
pub mod suppression;
