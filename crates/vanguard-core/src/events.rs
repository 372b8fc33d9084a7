//! Events emitted by the simulation for rendering, audio and HUD feedback,
//! plus the ephemeral hit record passed to the combat resolver.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::ActionKind;
use crate::types::{ProjectileId, UnitId};

/// One-shot events published with each snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A projectile left the muzzle.
    ShotFired {
        unit: UnitId,
        projectile: ProjectileId,
        homing: bool,
    },
    /// A unit touched down and began landing lag.
    Landed { unit: UnitId, lag_frames: f64 },
    /// A dash began.
    DashStarted { unit: UnitId },
    /// An evasive step began.
    EvadeStarted { unit: UnitId, rainbow: bool },
    /// A hit was resolved. `distance` is measured from the listener for volume falloff.
    HitApplied {
        target: UnitId,
        attacker: UnitId,
        distance: f64,
    },
    /// A projectile ran out of time to live.
    ProjectileExpired { projectile: ProjectileId },
    /// A unit changed action state.
    StateChanged {
        unit: UnitId,
        from: ActionKind,
        to: ActionKind,
    },
}

/// A hit request. Created and consumed within one tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HitEvent {
    pub target: UnitId,
    pub attacker: UnitId,
    /// Unit vector.
    pub knockback_dir: DVec3,
    pub knockback_power: f64,
    pub stun_secs: f64,
    pub hit_freeze_frames: u32,
}
