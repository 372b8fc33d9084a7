//! Unit spawn factories.
//!
//! Every unit gets the same component bundle; the pilot decides whether an
//! input tracker or an AI brain feeds its intent.

use glam::DVec3;
use hecs::{Entity, EntityBuilder, World};
use tracing::info;

use vanguard_core::components::{HitRecord, Kinematics, Targeting, Unit};
use vanguard_core::constants::GROUND_Y;
use vanguard_core::enums::{Pilot, Team};
use vanguard_core::ledger::ResourceLedger;
use vanguard_core::tuning::Tuning;
use vanguard_core::types::{flatten, try_direction, UnitId};

use crate::controller::{Action, InputTracker, IntentSlot};
use crate::systems::ai::AiBrain;

/// Where and for whom a unit enters the arena.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnitSpec {
    pub team: Team,
    pub pilot: Pilot,
    pub position: DVec3,
    /// Initial facing; flattened to the horizontal plane.
    pub forward: DVec3,
}

impl UnitSpec {
    pub fn player(team: Team, position: DVec3, forward: DVec3) -> Self {
        Self {
            team,
            pilot: Pilot::Player,
            position,
            forward,
        }
    }

    pub fn ai(team: Team, position: DVec3, forward: DVec3) -> Self {
        Self {
            team,
            pilot: Pilot::Ai,
            position,
            forward,
        }
    }
}

/// Spawn one unit with full resources, standing still.
pub fn spawn_unit(
    world: &mut World,
    next_unit_id: &mut u32,
    spec: &UnitSpec,
    tuning: &Tuning,
) -> (UnitId, Entity) {
    let id = UnitId(*next_unit_id);
    *next_unit_id += 1;

    let position = DVec3::new(spec.position.x, spec.position.y.max(GROUND_Y), spec.position.z);
    let kinematics = Kinematics {
        position,
        velocity: DVec3::ZERO,
        forward: try_direction(flatten(spec.forward)).unwrap_or(DVec3::Z),
        grounded: position.y <= GROUND_Y,
    };
    let mut builder = EntityBuilder::new();
    builder
        .add(Unit {
            id,
            team: spec.team,
            pilot: spec.pilot,
        })
        .add(kinematics)
        .add(Action::default())
        .add(ResourceLedger::from_tuning(tuning))
        .add(HitRecord::default())
        .add(Targeting::default())
        .add(IntentSlot::default());
    match spec.pilot {
        Pilot::Player => builder.add(InputTracker::new()),
        Pilot::Ai => builder.add(AiBrain::default()),
    };
    let entity = world.spawn(builder.build());
    (id, entity)
}

/// The default one-on-one roster: a player on the blue side facing an AI
/// on the red side across the arena center.
pub fn duel_roster() -> [UnitSpec; 2] {
    [
        UnitSpec::player(Team::Blue, DVec3::new(0.0, 0.0, -20.0), DVec3::Z),
        UnitSpec::ai(Team::Red, DVec3::new(0.0, 0.0, 20.0), DVec3::NEG_Z),
    ]
}

/// Spawn the duel roster. Returns the ids in roster order.
pub fn setup_duel(
    world: &mut World,
    next_unit_id: &mut u32,
    tuning: &Tuning,
) -> Vec<(UnitId, Entity)> {
    let spawned: Vec<(UnitId, Entity)> = duel_roster()
        .iter()
        .map(|spec| spawn_unit(world, next_unit_id, spec, tuning))
        .collect();
    info!(units = spawned.len(), "duel set up");
    spawned
}
