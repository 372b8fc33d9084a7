//! AI decision loop for VANGUARD.
//!
//! Computer-controlled units decide what they want to do here and express it
//! as the same [`vanguard_core::commands::Intent`] a player's input produces.
//! Resource gating and action arbitration stay in the shared controller.

pub mod fsm;
pub mod profiles;

pub use vanguard_core as core;

#[cfg(test)]
mod tests;
