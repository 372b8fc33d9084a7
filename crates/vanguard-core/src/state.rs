//! Published frame snapshot: the complete visible state handed to the
//! rendering, audio and HUD layers after each tick.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::SimEvent;
use crate::types::{ProjectileId, SimClock, UnitId};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FrameSnapshot {
    pub time: SimClock,
    /// Remaining hit-freeze ticks (0 when the simulation is running).
    pub hit_freeze: u32,
    pub units: Vec<UnitView>,
    pub projectiles: Vec<ProjectileView>,
    pub events: Vec<SimEvent>,
}

/// Published pose and status of one unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitView {
    pub id: UnitId,
    pub team: Team,
    pub pilot: Pilot,
    pub position: DVec3,
    pub velocity: DVec3,
    pub forward: DVec3,
    pub state: ActionKind,
    pub grounded: bool,
    pub resources: ResourceView,
    pub target: Option<UnitId>,
    pub lock: LockState,
    /// Whether the current evasive step is the melee-cancel variant (trail color).
    pub rainbow: bool,
}

/// HUD resource readout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceView {
    pub boost: f64,
    pub max_boost: f64,
    pub ammo: u32,
    pub max_ammo: u32,
    pub overheated: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: ProjectileId,
    pub owner: UnitId,
    pub team: Team,
    pub position: DVec3,
    pub velocity: DVec3,
    pub homing: bool,
}
