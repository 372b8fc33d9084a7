//! Simulation engine for VANGUARD.
//!
//! Owns the hecs ECS world, steps every unit's action controller from a
//! variable-rate host callback, and produces `FrameSnapshot`s for the
//! presentation layer.

pub mod controller;
pub mod engine;
pub mod guidance;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use vanguard_core as core;
