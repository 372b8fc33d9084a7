//! Per-state behavior: timer progression, action entry, and velocity control.

use glam::DVec3;

use vanguard_core::commands::{Consumed, Intent};
use vanguard_core::constants::MOVE_INPUT_DEADZONE;
use vanguard_core::enums::{ActionKind, AimMode, LockState};
use vanguard_core::events::{HitEvent, SimEvent};
use vanguard_core::tuning::{AttackProfile, Tuning};
use vanguard_core::types::{flatten, lerp, planar, try_direction};

use super::physics::{ambient_friction, apply_friction, set_horizontal};
use super::transitions::Trigger;
use super::{ActionState, Body, Contact, Env, Requests};
use crate::systems::projectiles::ShotRequest;

/// Idle or Walk, whichever the movement intent asks for.
pub fn locomotion(intent: &Intent) -> ActionState {
    if intent.movement.length() > MOVE_INPUT_DEADZONE {
        ActionState::Walk
    } else {
        ActionState::Idle
    }
}

/// Landing lag in frames: the full penalty when overheated, otherwise
/// shorter the more boost is left.
pub fn landing_lag(boost_ratio: f64, overheated: bool, tuning: &Tuning) -> f64 {
    if overheated {
        tuning.landing_lag_max_frames
    } else {
        lerp(
            tuning.landing_lag_max_frames,
            tuning.landing_lag_min_frames,
            boost_ratio.clamp(0.0, 1.0),
        )
    }
}

pub fn enter_landing(body: &mut Body, env: &Env, out: &mut Requests) {
    let lag = landing_lag(
        body.ledger.boost_ratio(),
        body.ledger.is_overheated(),
        env.tuning,
    );
    body.action.state = ActionState::Landing { remaining: lag };
    body.action.landing_deferred = false;
    out.events.push(SimEvent::Landed {
        unit: body.unit.id,
        lag_frames: lag,
    });
}

/// Stun elapsed: grounded units take landing lag, airborne ones fall freely.
pub fn leave_stun(body: &mut Body, env: &Env, out: &mut Requests) {
    if body.kin.grounded {
        enter_landing(body, env, out);
    } else {
        body.action.state = ActionState::Idle;
    }
}

/// A locked state has run out. Applies a landing deferred during it.
pub fn settle(body: &mut Body, env: &Env, intent: &Intent, out: &mut Requests) {
    if std::mem::take(&mut body.action.landing_deferred) && body.kin.grounded {
        enter_landing(body, env, out);
    } else {
        body.action.state = locomotion(intent);
    }
}

/// The unit just went from airborne to grounded.
pub fn touch_down(body: &mut Body, env: &Env, out: &mut Requests) {
    let free = matches!(body.action.state.kind(), ActionKind::Idle | ActionKind::Walk);
    if std::mem::take(&mut body.action.hopping) && free {
        return;
    }
    match body.action.state.kind() {
        ActionKind::Idle | ActionKind::Walk | ActionKind::Ascend | ActionKind::Dash => {
            enter_landing(body, env, out);
        }
        ActionKind::Landing | ActionKind::Stunned => {}
        _ => body.action.landing_deferred = true,
    }
}

/// An overheated unit standing on the ground has no landing edge left to
/// wait for: it goes straight into the full landing lag, which refills boost.
pub fn vent_on_ground(body: &mut Body, env: &Env, out: &mut Requests) {
    let free = matches!(body.action.state.kind(), ActionKind::Idle | ActionKind::Walk);
    if free && body.kin.grounded && body.ledger.is_overheated() {
        enter_landing(body, env, out);
    }
}

/// Progress timers and run expiry transitions for the current state.
pub fn advance(body: &mut Body, env: &Env, intent: &Intent, out: &mut Requests) -> Consumed {
    let mut consumed = Consumed::default();
    let t = env.tuning;
    let ts = env.step.time_scale;

    match body.action.state {
        ActionState::Idle | ActionState::Walk => {
            body.action.state = locomotion(intent);
        }
        ActionState::Ascend => {
            if !intent.boost_held || body.ledger.is_overheated() {
                body.action.state = locomotion(intent);
            }
        }
        ActionState::Dash {
            speed,
            direction,
            coast_frames,
        } => {
            let steering = intent.movement.length() > MOVE_INPUT_DEADZONE;
            let coast_frames = if steering || intent.boost_held {
                0.0
            } else {
                coast_frames + ts
            };
            if body.ledger.is_overheated() || coast_frames >= t.dash_coast_frames {
                body.action.state = locomotion(intent);
            } else {
                body.action.state = ActionState::Dash {
                    speed,
                    direction,
                    coast_frames,
                };
            }
        }
        ActionState::Evade { remaining, rainbow } => {
            let remaining = remaining - ts;
            if remaining <= 0.0 {
                settle(body, env, intent, out);
            } else {
                body.action.state = ActionState::Evade { remaining, rainbow };
            }
        }
        ActionState::Shoot {
            startup,
            recovery,
            mode,
            fired,
        } => {
            if !fired {
                let startup = startup - ts;
                let fired = startup <= 0.0;
                if fired {
                    fire_shot(body, env, out);
                }
                body.action.state = ActionState::Shoot {
                    startup,
                    recovery,
                    mode,
                    fired,
                };
            } else {
                let recovery = recovery - ts;
                if recovery <= 0.0 {
                    settle(body, env, intent, out);
                } else {
                    body.action.state = ActionState::Shoot {
                        startup,
                        recovery,
                        mode,
                        fired,
                    };
                }
            }
        }
        ActionState::MeleeStartup { remaining } => {
            let remaining = remaining - ts * startup_rate(body, t);
            if remaining <= 0.0 {
                begin_slash(body, t);
            } else {
                body.action.state = ActionState::MeleeStartup { remaining };
            }
        }
        ActionState::MeleeLunge { startup, lunge } => {
            let startup = startup - ts * startup_rate(body, t);
            let lunge = lunge - ts;
            let in_range = env
                .target
                .is_none_or(|target| within_melee_range(body.kin.position, target, t));
            if startup <= 0.0 && (in_range || lunge <= 0.0) {
                begin_slash(body, t);
            } else {
                body.action.state = ActionState::MeleeLunge { startup, lunge };
            }
        }
        ActionState::MeleeSlash1 {
            remaining,
            latched,
            combo,
        } => {
            let combo = combo || intent.melee;
            consumed.melee = intent.melee;
            let latched = latched || try_melee_hit(body, env, &t.slash1, out);
            let remaining = remaining - ts;
            body.action.state = if remaining > 0.0 {
                ActionState::MeleeSlash1 {
                    remaining,
                    latched,
                    combo,
                }
            } else if combo {
                ActionState::MeleeSlash2 {
                    remaining: t.slash2_frames,
                    latched: false,
                }
            } else {
                ActionState::MeleeRecovery {
                    remaining: t.melee_recovery_frames,
                }
            };
        }
        ActionState::MeleeSlash2 { remaining, latched } => {
            let latched = latched || try_melee_hit(body, env, &t.slash2, out);
            let remaining = remaining - ts;
            body.action.state = if remaining > 0.0 {
                ActionState::MeleeSlash2 { remaining, latched }
            } else {
                ActionState::MeleeRecovery {
                    remaining: t.melee_recovery_frames,
                }
            };
        }
        ActionState::MeleeRecovery { remaining } => {
            let remaining = remaining - ts;
            if remaining > 0.0 {
                body.action.state = ActionState::MeleeRecovery { remaining };
            } else if std::mem::take(&mut body.action.landing_deferred) && body.kin.grounded {
                enter_landing(body, env, out);
            } else {
                body.action.state = ActionState::Idle;
                if body.kin.grounded {
                    body.kin.velocity.y = t.recovery_hop_speed;
                    body.action.hopping = true;
                }
            }
        }
        ActionState::Landing { remaining } => {
            let remaining = remaining - ts;
            if remaining <= 0.0 {
                body.ledger.refill_boost();
                body.action.state = locomotion(intent);
            } else {
                body.action.state = ActionState::Landing { remaining };
            }
        }
        ActionState::Stunned => {}
    }
    consumed
}

/// Enter the state a selected trigger leads to. Resource checks are repeated
/// here; a rejected spend leaves everything untouched.
pub fn enter(trigger: Trigger, body: &mut Body, env: &Env, intent: &Intent, out: &mut Requests) {
    let t = env.tuning;
    body.action.hopping = false;
    match trigger {
        Trigger::Dash => {
            if !body.ledger.spend_boost(t.dash_init_cost) {
                return;
            }
            // Cancelling melee drops any facing toward the target; the dash
            // heading comes from input or the horizontal forward.
            let forward = try_direction(flatten(body.kin.forward)).unwrap_or(DVec3::Z);
            let direction = try_direction(planar(intent.movement)).unwrap_or(forward);
            body.kin.forward = direction;
            body.kin.velocity = direction * t.dash_burst_speed;
            body.action.landing_deferred = false;
            body.action.state = ActionState::Dash {
                speed: t.dash_burst_speed,
                direction,
                coast_frames: 0.0,
            };
            out.events.push(SimEvent::DashStarted {
                unit: body.unit.id,
            });
        }
        Trigger::Evade => {
            let Some(direction) = intent.evade.and_then(|d| try_direction(planar(d))) else {
                return;
            };
            let rainbow = body.action.state.kind().is_melee();
            let (cost, speed) = if rainbow {
                (t.rainbow_evade_cost, t.rainbow_evade_speed)
            } else {
                (t.evade_cost, t.evade_speed)
            };
            if !body.ledger.spend_boost(cost) {
                return;
            }
            set_horizontal(body.kin, direction * speed);
            body.action.state = ActionState::Evade {
                remaining: t.evade_frames,
                rainbow,
            };
            out.cut_tracking.push(body.unit.id);
            out.events.push(SimEvent::EvadeStarted {
                unit: body.unit.id,
                rainbow,
            });
        }
        Trigger::Melee => {
            if let Some(target) = env.target {
                face_toward(body, target.position);
            }
            body.action.state = if env.target.is_some() && body.lock == LockState::Near {
                ActionState::MeleeLunge {
                    startup: t.melee_startup_frames,
                    lunge: t.lunge_max_frames,
                }
            } else {
                ActionState::MeleeStartup {
                    remaining: t.melee_startup_frames,
                }
            };
        }
        Trigger::Fire => {
            if !body.ledger.consume_ammo() {
                return;
            }
            let mode = aim_mode(body, env);
            if mode == AimMode::Stop {
                set_horizontal(body.kin, DVec3::ZERO);
                if let Some(target) = env.target {
                    face_toward(body, target.position);
                }
            }
            body.action.state = ActionState::Shoot {
                startup: t.shot_startup_frames,
                recovery: t.shot_recovery_frames,
                mode,
                fired: false,
            };
        }
        Trigger::Ascend => {
            body.action.state = ActionState::Ascend;
        }
    }
}

/// Per-state velocity control, applied before integration.
pub fn drive(body: &mut Body, env: &Env, intent: &Intent) {
    let t = env.tuning;
    let step = &env.step;
    let ts = step.time_scale;

    match body.action.state {
        ActionState::Idle => ambient_friction(body.kin, env),
        ActionState::Walk => {
            walk_toward(body, env, intent);
            if let Some(heading) = try_direction(planar(intent.movement)) {
                body.kin.forward = heading;
            }
        }
        ActionState::Ascend => {
            if body.ledger.consume_boost(t.ascend_cost_per_frame * ts) {
                body.kin.velocity.y = t.ascend_speed;
            }
            walk_toward(body, env, intent);
        }
        ActionState::Dash {
            speed,
            direction,
            coast_frames,
        } => {
            body.ledger.consume_boost(t.dash_cost_per_frame * ts);
            let speed = speed + (t.dash_sustain_speed - speed) * step.approach(t.dash_decay_rate);
            let direction = match try_direction(planar(intent.movement)) {
                Some(wanted) => {
                    let turn = step.approach(t.dash_turn_rate);
                    let blended = direction + (wanted - direction) * turn;
                    try_direction(blended).unwrap_or(wanted)
                }
                None => direction,
            };
            body.kin.velocity = direction * speed;
            body.kin.forward = direction;
            body.action.state = ActionState::Dash {
                speed,
                direction,
                coast_frames,
            };
        }
        ActionState::Evade { .. } => apply_friction(body.kin, t.evade_friction, step),
        ActionState::Shoot { mode, .. } => match mode {
            AimMode::Stop => set_horizontal(body.kin, DVec3::ZERO),
            AimMode::Move => walk_toward(body, env, intent),
        },
        ActionState::MeleeLunge { .. } => {
            body.ledger.consume_boost(t.lunge_cost_per_frame * ts);
            if let Some(target) = env.target {
                face_toward(body, target.position);
            }
            let heading = body.kin.forward;
            set_horizontal(body.kin, heading * t.lunge_speed);
        }
        ActionState::MeleeStartup { .. }
        | ActionState::MeleeSlash1 { .. }
        | ActionState::MeleeSlash2 { .. }
        | ActionState::MeleeRecovery { .. }
        | ActionState::Landing { .. } => ambient_friction(body.kin, env),
        ActionState::Stunned => {}
    }
}

fn walk_toward(body: &mut Body, env: &Env, intent: &Intent) {
    let wanted = planar(intent.movement) * env.tuning.walk_speed;
    let current = flatten(body.kin.velocity);
    let keep = env.step.decay(env.tuning.walk_response);
    set_horizontal(body.kin, wanted + (current - wanted) * keep);
}

fn startup_rate(body: &Body, tuning: &Tuning) -> f64 {
    if body.ledger.is_overheated() || body.ledger.boost() <= 0.0 {
        tuning.melee_depleted_rate
    } else {
        1.0
    }
}

fn begin_slash(body: &mut Body, tuning: &Tuning) {
    set_horizontal(body.kin, DVec3::ZERO);
    body.action.state = ActionState::MeleeSlash1 {
        remaining: tuning.slash1_frames,
        latched: false,
        combo: false,
    };
}

fn within_melee_range(position: DVec3, target: Contact, tuning: &Tuning) -> bool {
    position.distance(target.position) < tuning.melee_range + tuning.unit_hitbox_radius
}

/// Turn to face `point` on the horizontal plane.
pub fn face_toward(body: &mut Body, point: DVec3) {
    if let Some(heading) = try_direction(flatten(point - body.kin.position)) {
        body.kin.forward = heading;
    }
}

/// Moving shot if the target sits inside the forward cone, otherwise a
/// standing shot that turns to face it.
pub fn aim_mode(body: &Body, env: &Env) -> AimMode {
    let Some(target) = env.target else {
        return AimMode::Move;
    };
    match try_direction(flatten(target.position - body.kin.position)) {
        Some(to_target) if body.kin.forward.dot(to_target) < env.tuning.aim_cone_cos() => {
            AimMode::Stop
        }
        _ => AimMode::Move,
    }
}

/// Emit the projectile for a shot whose startup just elapsed.
fn fire_shot(body: &mut Body, env: &Env, out: &mut Requests) {
    let t = env.tuning;
    let muzzle = body.kin.position + DVec3::Y * t.aim_point_height;
    let forward = try_direction(flatten(body.kin.forward)).unwrap_or(DVec3::Z);

    let (direction, homing) = match env.target {
        Some(target) if body.lock == LockState::Near => {
            let aim_point = target.position + DVec3::Y * t.aim_point_height;
            match try_direction(aim_point - muzzle) {
                Some(direction) => (direction, true),
                None => (forward, false),
            }
        }
        _ => (forward, false),
    };
    if homing {
        if let Some(heading) = try_direction(flatten(direction)) {
            body.kin.forward = heading;
        }
    }

    out.shots.push(ShotRequest {
        owner: body.unit.id,
        team: body.unit.team,
        target: env.target.map(|target| target.id),
        position: muzzle,
        direction,
        homing,
    });
}

/// Resolve a slash against the nearest opposing unit in reach.
/// Returns true if a hit was requested.
pub fn try_melee_hit(
    body: &Body,
    env: &Env,
    attack: &AttackProfile,
    out: &mut Requests,
) -> bool {
    let position = body.kin.position;
    let victim = env
        .contacts
        .iter()
        .filter(|c| c.id != body.unit.id && c.team != body.unit.team)
        .filter(|c| within_melee_range(position, **c, env.tuning))
        .min_by(|a, b| {
            position
                .distance_squared(a.position)
                .total_cmp(&position.distance_squared(b.position))
        });
    let Some(victim) = victim else {
        return false;
    };

    let knockback_dir = try_direction(flatten(victim.position - position))
        .unwrap_or_else(|| flatten(body.kin.forward));
    out.hits.push(HitEvent {
        target: victim.id,
        attacker: body.unit.id,
        knockback_dir,
        knockback_power: attack.knockback_power,
        stun_secs: attack.stun_secs,
        hit_freeze_frames: attack.hit_freeze_frames,
    });
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_landing_lag_scales_with_boost() {
        let t = Tuning::default();
        assert_eq!(landing_lag(1.0, false, &t), t.landing_lag_min_frames);
        assert_eq!(landing_lag(0.0, false, &t), t.landing_lag_max_frames);
        let half = landing_lag(0.5, false, &t);
        assert!(half > t.landing_lag_min_frames && half < t.landing_lag_max_frames);
    }

    #[test]
    fn test_overheat_takes_full_landing_lag() {
        let t = Tuning::default();
        assert_eq!(landing_lag(0.9, true, &t), t.landing_lag_max_frames);
    }

    #[test]
    fn test_locomotion_deadzone() {
        let mut intent = Intent::default();
        assert_eq!(locomotion(&intent), ActionState::Idle);
        intent.movement = glam::DVec2::new(0.05, 0.0);
        assert_eq!(locomotion(&intent), ActionState::Idle);
        intent.movement = glam::DVec2::new(0.0, 1.0);
        assert_eq!(locomotion(&intent), ActionState::Walk);
    }
}
