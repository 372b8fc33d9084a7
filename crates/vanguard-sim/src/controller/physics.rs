//! Frame-rate-independent integration for a single unit.
//!
//! Velocities are world units per reference frame; every update scales by
//! `time_scale` so a 144 Hz host and a 30 Hz host trace the same arc.

use glam::DVec3;

use vanguard_core::components::Kinematics;
use vanguard_core::constants::GROUND_Y;
use vanguard_core::enums::ActionKind;
use vanguard_core::types::{flatten, Step};

use super::{ActionState, Body, Env};

/// Integrate a non-stunned unit. Returns true on the tick it touches down.
pub fn integrate(body: &mut Body, env: &Env) -> bool {
    let t = env.tuning;
    let thrusting = matches!(body.action.state.kind(), ActionKind::Dash | ActionKind::Ascend);
    if !thrusting {
        apply_gravity(body.kin, t.gravity, t.max_fall_speed, &env.step);
    }

    body.kin.position += body.kin.velocity * env.step.time_scale;
    clamp_to_arena(&mut body.kin.position, t.arena_radius);
    settle_on_ground(body.kin)
}

/// Knockback displacement: fixed horizontal speed along the hit direction
/// plus gravity. Landing is silent while stunned.
pub fn stunned(body: &mut Body, env: &Env) {
    let t = env.tuning;
    body.action.state = ActionState::Stunned;
    body.action.landing_deferred = false;
    body.action.hopping = false;

    let push = flatten(body.hit.knockback_dir) * t.knockback_speed * body.hit.knockback_power;
    body.kin.velocity = DVec3::new(push.x, body.kin.velocity.y, push.z);
    apply_gravity(body.kin, t.gravity, t.max_fall_speed, &env.step);

    body.kin.position += body.kin.velocity * env.step.time_scale;
    clamp_to_arena(&mut body.kin.position, t.arena_radius);
    settle_on_ground(body.kin);
}

/// Scale horizontal velocity by `base^time_scale`.
pub fn apply_friction(kin: &mut Kinematics, base: f64, step: &Step) {
    let keep = step.decay(base);
    kin.velocity.x *= keep;
    kin.velocity.z *= keep;
}

/// Ground or air friction depending on contact.
pub fn ambient_friction(kin: &mut Kinematics, env: &Env) {
    let base = if kin.grounded {
        env.tuning.ground_friction
    } else {
        env.tuning.air_friction
    };
    apply_friction(kin, base, &env.step);
}

/// Set the horizontal part of the velocity, leaving vertical speed alone.
pub fn set_horizontal(kin: &mut Kinematics, horizontal: DVec3) {
    kin.velocity.x = horizontal.x;
    kin.velocity.z = horizontal.z;
}

fn apply_gravity(kin: &mut Kinematics, gravity: f64, max_fall_speed: f64, step: &Step) {
    kin.velocity.y = (kin.velocity.y - gravity * step.time_scale).max(-max_fall_speed);
}

/// Radially project the XZ position back inside the arena circle.
pub fn clamp_to_arena(position: &mut DVec3, radius: f64) {
    let horizontal = flatten(*position);
    let distance = horizontal.length();
    if distance > radius && distance > 0.0 {
        let clamped = horizontal * (radius / distance);
        position.x = clamped.x;
        position.z = clamped.z;
    }
}

/// Snap to the ground plane; true if this was an airborne-to-grounded edge.
fn settle_on_ground(kin: &mut Kinematics) -> bool {
    if kin.position.y <= GROUND_Y {
        kin.position.y = GROUND_Y;
        kin.velocity.y = kin.velocity.y.max(0.0);
        let landed = !kin.grounded;
        kin.grounded = true;
        landed
    } else {
        kin.grounded = false;
        false
    }
}
