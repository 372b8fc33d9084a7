//! Core types and definitions for the VANGUARD action simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! tunables, components, intents, the resource ledger, lock-on evaluation,
//! published snapshots, events, and constants.
//! It has no dependency on the ECS or any runtime framework.

pub mod commands;
pub mod components;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod ledger;
pub mod lockon;
pub mod state;
pub mod tuning;
pub mod types;

#[cfg(test)]
mod tests;
