//! Core types and definitions for the Fireline training drill.
//!
//! This crate defines the vocabulary shared across all other crates:
//! identities, configuration, commands, notifications, snapshots, and
//! constants. It has no dependency on any runtime or presentation layer.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod types;
