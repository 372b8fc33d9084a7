//! ECS components for hecs entities.
//!
//! Components are plain data structs. Game logic lives in systems and in the
//! action controller, not here.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{ProjectileId, UnitId};

/// Identity and allegiance of a combat unit.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub team: Team,
    pub pilot: Pilot,
}

/// Pure-logic pose of a unit. The renderer reads a published copy, never this.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Kinematics {
    pub position: DVec3,
    /// World units per reference frame.
    pub velocity: DVec3,
    /// Horizontal unit facing vector.
    pub forward: DVec3,
    pub grounded: bool,
}

/// The most recent hit taken by a unit.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HitRecord {
    /// Simulation-clock time of the last hit, if ever hit.
    pub last_hit_at: Option<f64>,
    /// Unit vector the knockback pushes along.
    pub knockback_dir: DVec3,
    pub knockback_power: f64,
    pub stun_secs: f64,
    pub hit_freeze_frames: u32,
}

/// Current target selection and its lock state.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Targeting {
    pub target: Option<UnitId>,
    pub lock: LockState,
}

/// An in-flight projectile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub id: ProjectileId,
    pub owner: UnitId,
    pub target: Option<UnitId>,
    pub team: Team,
    pub position: DVec3,
    /// World units per reference frame.
    pub velocity: DVec3,
    /// Unit direction captured at spawn; the guidance law's forward axis.
    pub forward: DVec3,
    /// Once cleared, never set again.
    pub homing: bool,
    /// Remaining lifetime in reference frames.
    pub ttl_frames: f64,
}
