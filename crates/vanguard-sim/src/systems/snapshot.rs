//! Snapshot system: publishes the visible state after a tick.
//!
//! Read-only; never modifies the world.

use hecs::World;

use vanguard_core::components::{Kinematics, Projectile, Targeting, Unit};
use vanguard_core::events::SimEvent;
use vanguard_core::ledger::ResourceLedger;
use vanguard_core::state::{FrameSnapshot, ProjectileView, ResourceView, UnitView};
use vanguard_core::types::SimClock;

use crate::controller::Action;

pub fn build_snapshot(
    world: &World,
    clock: &SimClock,
    hit_freeze: u32,
    events: Vec<SimEvent>,
) -> FrameSnapshot {
    FrameSnapshot {
        time: *clock,
        hit_freeze,
        units: build_units(world),
        projectiles: build_projectiles(world),
        events,
    }
}

fn build_units(world: &World) -> Vec<UnitView> {
    let mut units: Vec<UnitView> = world
        .query::<(&Unit, &Kinematics, &Action, &ResourceLedger, &Targeting)>()
        .iter()
        .map(|(_, (unit, kin, action, ledger, targeting))| UnitView {
            id: unit.id,
            team: unit.team,
            pilot: unit.pilot,
            position: kin.position,
            velocity: kin.velocity,
            forward: kin.forward,
            state: action.state.kind(),
            grounded: kin.grounded,
            resources: ResourceView {
                boost: ledger.boost(),
                max_boost: ledger.max_boost(),
                ammo: ledger.ammo(),
                max_ammo: ledger.max_ammo(),
                overheated: ledger.is_overheated(),
            },
            target: targeting.target,
            lock: targeting.lock,
            rainbow: action.state.is_rainbow(),
        })
        .collect();
    units.sort_by_key(|u| u.id);
    units
}

fn build_projectiles(world: &World) -> Vec<ProjectileView> {
    let mut projectiles: Vec<ProjectileView> = world
        .query::<&Projectile>()
        .iter()
        .map(|(_, p)| ProjectileView {
            id: p.id,
            owner: p.owner,
            team: p.team,
            position: p.position,
            velocity: p.velocity,
            homing: p.homing,
        })
        .collect();
    projectiles.sort_by_key(|p| p.id);
    projectiles
}
