//! Proximity lock-on evaluation.

use glam::DVec3;

use crate::enums::LockState;
use crate::tuning::Tuning;

/// Derives NEAR/FAR from the distance to the active target.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LockOnTracker {
    red_lock_distance: f64,
}

impl LockOnTracker {
    pub fn new(red_lock_distance: f64) -> Self {
        Self { red_lock_distance }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(tuning.red_lock_distance)
    }

    /// NEAR if strictly closer than the red-lock distance, else FAR.
    pub fn evaluate(&self, self_pos: DVec3, target_pos: DVec3) -> LockState {
        if self_pos.distance(target_pos) < self.red_lock_distance {
            LockState::Near
        } else {
            LockState::Far
        }
    }
}
