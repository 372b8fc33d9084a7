//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions over `&mut World` (or `&World` for read-only).
//! Cross-unit effects are collected first and applied afterwards so no
//! system mutates another unit while iterating.

pub mod ai;
pub mod combat;
pub mod control;
pub mod intents;
pub mod projectiles;
pub mod snapshot;
pub mod targeting;
