//! Inputs to the simulation.
//!
//! Players send raw key events which an input tracker turns into an
//! [`Intent`]; AI units produce an [`Intent`] directly. The action controller
//! only ever sees intents, so both obey the same rules.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::Key;

/// A discrete press or release from the external input translator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputEvent {
    pub key: Key,
    pub pressed: bool,
}

impl InputEvent {
    pub fn press(key: Key) -> Self {
        Self { key, pressed: true }
    }

    pub fn release(key: Key) -> Self {
        Self { key, pressed: false }
    }
}

/// What a unit wants to do this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Intent {
    /// Desired planar movement (x = right, y = forward), length ≤ 1.
    pub movement: DVec2,
    /// Pending dash request.
    pub dash: bool,
    /// Pending evasive-step request and its planar direction.
    pub evade: Option<DVec2>,
    /// Boost held past the hold threshold (not as part of a dash).
    pub ascend: bool,
    /// Boost key currently held.
    pub boost_held: bool,
    /// Pending fire request.
    pub fire: bool,
    /// Pending melee request.
    pub melee: bool,
    /// Switch to the next target.
    pub cycle_target: bool,
}

/// Which buffered requests the controller acted on this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Consumed {
    pub dash: bool,
    pub evade: bool,
    pub fire: bool,
    pub melee: bool,
}
