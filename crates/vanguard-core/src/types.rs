//! Fundamental geometric and simulation types.

use glam::{DVec2, DVec3};
use serde::{Deserialize, Serialize};

use crate::constants::{DIRECTION_EPSILON, MAX_DELTA_SECS, REFERENCE_FRAME_SECS, REFERENCE_HZ};

/// Stable unit identity, shared between the simulation and presentation layers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UnitId(pub u32);

/// Stable projectile identity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProjectileId(pub u32);

/// The single monotonic simulation clock.
///
/// Advances only on ticks that are not hit-frozen, so state timers, stun
/// windows and input windows all pause together.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimClock {
    /// Number of integrated (non-frozen) ticks.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub now_secs: f64,
}

/// Per-tick step: raw host delta plus the 60 Hz normalization factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub delta_secs: f64,
    /// `delta_secs * 60`: one at exactly 60 Hz.
    pub time_scale: f64,
}

impl Step {
    /// Build a step from a host delta, clamping negative or oversized deltas.
    pub fn from_delta(delta_secs: f64) -> Self {
        let delta_secs = if delta_secs.is_finite() {
            delta_secs.clamp(0.0, MAX_DELTA_SECS)
        } else {
            0.0
        };
        Self {
            delta_secs,
            time_scale: delta_secs * REFERENCE_HZ,
        }
    }

    /// Exactly one reference frame.
    pub fn reference() -> Self {
        Self::from_delta(REFERENCE_FRAME_SECS)
    }

    /// Frame-rate-independent retention: `base^time_scale`.
    pub fn decay(&self, base: f64) -> f64 {
        base.powf(self.time_scale)
    }

    /// Fraction of a gap closed this tick when `rate` of it closes per reference frame.
    pub fn approach(&self, rate: f64) -> f64 {
        1.0 - (1.0 - rate).powf(self.time_scale)
    }
}

impl SimClock {
    /// Advance by one integrated tick.
    pub fn advance(&mut self, step: &Step) {
        self.tick += 1;
        self.now_secs += step.delta_secs;
    }

    /// Seconds elapsed since `at`.
    pub fn since(&self, at: f64) -> f64 {
        self.now_secs - at
    }
}

/// Horizontal (XZ) part of a vector.
pub fn flatten(v: DVec3) -> DVec3 {
    DVec3::new(v.x, 0.0, v.z)
}

/// Normalize, or `None` for a near-zero vector.
pub fn try_direction(v: DVec3) -> Option<DVec3> {
    let len = v.length();
    if len > DIRECTION_EPSILON {
        Some(v / len)
    } else {
        None
    }
}

/// Lift a planar XZ input into world space.
pub fn planar(v: DVec2) -> DVec3 {
    DVec3::new(v.x, 0.0, v.y)
}

/// Linear interpolation.
pub fn lerp(from: f64, to: f64, t: f64) -> f64 {
    from + (to - from) * t
}
