//! Projectile system: spawn, guidance, collision and time-to-live.

use glam::DVec3;
use hecs::World;
use tracing::debug;

use vanguard_core::components::{Kinematics, Projectile, Unit};
use vanguard_core::enums::Team;
use vanguard_core::events::{HitEvent, SimEvent};
use vanguard_core::tuning::Tuning;
use vanguard_core::types::{flatten, try_direction, ProjectileId, Step, UnitId};

use crate::guidance::homing_velocity;

/// A shot whose startup elapsed this tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShotRequest {
    pub owner: UnitId,
    pub team: Team,
    pub target: Option<UnitId>,
    /// Muzzle position.
    pub position: DVec3,
    /// Unit direction.
    pub direction: DVec3,
    pub homing: bool,
}

/// Create a projectile flying along `shot.direction` at bullet speed.
pub fn spawn(
    world: &mut World,
    next_projectile_id: &mut u32,
    shot: &ShotRequest,
    tuning: &Tuning,
    events: &mut Vec<SimEvent>,
) -> ProjectileId {
    let id = ProjectileId(*next_projectile_id);
    *next_projectile_id += 1;

    let forward = try_direction(shot.direction).unwrap_or(DVec3::Z);
    world.spawn((Projectile {
        id,
        owner: shot.owner,
        target: shot.target,
        team: shot.team,
        position: shot.position,
        velocity: forward * tuning.bullet_speed,
        forward,
        homing: shot.homing,
        ttl_frames: tuning.bullet_ttl_frames,
    },));

    debug!(projectile = id.0, owner = shot.owner.0, homing = shot.homing, "projectile spawned");
    events.push(SimEvent::ShotFired {
        unit: shot.owner,
        projectile: id,
        homing: shot.homing,
    });
    id
}

/// Drop homing on every live projectile chasing one of `evaders`.
pub fn cut_tracking(world: &mut World, evaders: &[UnitId]) {
    if evaders.is_empty() {
        return;
    }
    for (_entity, projectile) in world.query_mut::<&mut Projectile>() {
        if projectile.homing && projectile.target.is_some_and(|t| evaders.contains(&t)) {
            projectile.homing = false;
        }
    }
}

/// Advance every live projectile by one tick. Collisions become hit
/// requests; spent projectiles are despawned.
pub fn run(
    world: &mut World,
    tuning: &Tuning,
    step: &Step,
    hits: &mut Vec<HitEvent>,
    events: &mut Vec<SimEvent>,
    despawn_buffer: &mut Vec<hecs::Entity>,
) {
    despawn_buffer.clear();

    let aim_offset = DVec3::Y * tuning.aim_point_height;
    let mut roster: Vec<(UnitId, Team, DVec3)> = world
        .query::<(&Unit, &Kinematics)>()
        .iter()
        .map(|(_, (unit, kin))| (unit.id, unit.team, kin.position + aim_offset))
        .collect();
    roster.sort_by_key(|(id, _, _)| *id);
    let reach = tuning.unit_hitbox_radius + tuning.bullet_radius;

    for (entity, projectile) in world.query_mut::<&mut Projectile>() {
        projectile.position += projectile.velocity * step.time_scale;

        if projectile.homing {
            let aim_point = projectile
                .target
                .and_then(|id| roster.iter().find(|(unit, _, _)| *unit == id))
                .map(|(_, _, aim_point)| *aim_point);
            let guided = aim_point.and_then(|aim_point| {
                homing_velocity(
                    projectile.position,
                    projectile.forward,
                    aim_point,
                    tuning.bullet_speed,
                    tuning.homing_lateral_speed,
                )
            });
            match guided {
                Some(velocity) => projectile.velocity = velocity,
                None => projectile.homing = false,
            }
        }

        let struck = roster
            .iter()
            .filter(|(id, team, _)| *team != projectile.team && *id != projectile.owner)
            .map(|(id, _, center)| (*id, projectile.position.distance(*center)))
            .filter(|(_, distance)| *distance < reach)
            .min_by(|a, b| a.1.total_cmp(&b.1));
        if let Some((target, _)) = struck {
            let knockback_dir = try_direction(flatten(projectile.velocity))
                .or_else(|| try_direction(flatten(projectile.forward)))
                .unwrap_or(DVec3::Z);
            hits.push(HitEvent {
                target,
                attacker: projectile.owner,
                knockback_dir,
                knockback_power: tuning.shot.knockback_power,
                stun_secs: tuning.shot.stun_secs,
                hit_freeze_frames: tuning.shot.hit_freeze_frames,
            });
            debug!(projectile = projectile.id.0, target = target.0, "projectile hit");
            despawn_buffer.push(entity);
            continue;
        }

        projectile.ttl_frames -= step.time_scale;
        if projectile.ttl_frames <= 0.0 {
            debug!(projectile = projectile.id.0, "projectile expired");
            events.push(SimEvent::ProjectileExpired {
                projectile: projectile.id,
            });
            despawn_buffer.push(entity);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
