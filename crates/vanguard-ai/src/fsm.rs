//! AI pilot finite state machine.
//!
//! Pure functions that compute phase transitions and the resulting intent for
//! one AI unit from a snapshot of its situation. No ECS dependency.

use glam::{DVec2, DVec3};
use rand::Rng;

use vanguard_core::commands::Intent;
use vanguard_core::enums::{ActionKind, LockState};

use crate::profiles::AiProfile;

/// High-level AI behavior phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum AiPhase {
    /// Close distance to the target.
    #[default]
    Approach,
    /// Circle the target at range, firing.
    Strafe,
    /// Commit to melee.
    Engage,
    /// Wait out an overheat without touching boost.
    Recover,
}

/// Input to the AI FSM for a single unit.
#[derive(Debug, Clone, Copy)]
pub struct AiContext {
    pub phase: AiPhase,
    pub elapsed_in_phase_secs: f64,
    pub state: ActionKind,
    pub position: DVec3,
    pub target: Option<DVec3>,
    pub lock: LockState,
    pub boost_ratio: f64,
    pub overheated: bool,
    pub ammo: u32,
    /// Position of the closest homing projectile aimed at this unit.
    pub incoming: Option<DVec3>,
    /// +1 or -1: which way this unit circles.
    pub strafe_sign: f64,
}

/// Output from the AI FSM.
#[derive(Debug, Clone, Copy)]
pub struct AiDecision {
    pub phase: AiPhase,
    pub phase_changed: bool,
    pub strafe_sign: f64,
    pub intent: Intent,
}

/// Evaluate the FSM for one unit.
pub fn evaluate(ctx: &AiContext, profile: &AiProfile, rng: &mut impl Rng) -> AiDecision {
    let Some(target) = ctx.target else {
        return decide(ctx, AiPhase::Approach, ctx.strafe_sign, Intent::default());
    };

    let to_target = DVec2::new(target.x - ctx.position.x, target.z - ctx.position.z);
    let distance = ctx.position.distance(target);
    let toward = to_target.try_normalize().unwrap_or(DVec2::Y);

    if ctx.overheated && ctx.phase != AiPhase::Recover {
        return decide(ctx, AiPhase::Recover, ctx.strafe_sign, retreat(toward));
    }

    let mut decision = match ctx.phase {
        AiPhase::Approach => evaluate_approach(ctx, profile, rng, toward, distance),
        AiPhase::Strafe => evaluate_strafe(ctx, profile, rng, toward, distance),
        AiPhase::Engage => evaluate_engage(ctx, profile, toward, distance),
        AiPhase::Recover => evaluate_recover(ctx, toward),
    };

    if let Some(evade) = dodge_direction(ctx, profile) {
        decision.intent.evade = Some(evade);
    }

    decision
}

fn evaluate_approach(
    ctx: &AiContext,
    profile: &AiProfile,
    rng: &mut impl Rng,
    toward: DVec2,
    distance: f64,
) -> AiDecision {
    if distance <= profile.strafe_max_distance {
        let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        return decide(ctx, AiPhase::Strafe, sign, Intent {
            movement: toward.perp() * sign,
            ..Default::default()
        });
    }

    let dashing = ctx.state == ActionKind::Dash;
    let want_dash = !dashing && ctx.boost_ratio > profile.dash_boost_ratio;
    decide(ctx, AiPhase::Approach, ctx.strafe_sign, Intent {
        movement: toward,
        dash: want_dash,
        boost_held: dashing && ctx.boost_ratio > profile.dash_boost_ratio * 0.5,
        ..Default::default()
    })
}

fn evaluate_strafe(
    ctx: &AiContext,
    profile: &AiProfile,
    rng: &mut impl Rng,
    toward: DVec2,
    distance: f64,
) -> AiDecision {
    if ctx.lock == LockState::Near && distance <= profile.engage_distance {
        return decide(ctx, AiPhase::Engage, ctx.strafe_sign, Intent {
            movement: toward,
            melee: true,
            ..Default::default()
        });
    }
    if distance > profile.strafe_max_distance * 1.2 {
        return decide(ctx, AiPhase::Approach, ctx.strafe_sign, Intent {
            movement: toward,
            ..Default::default()
        });
    }

    // Hold the preferred radius while circling.
    let preferred = profile.strafe_preferred_distance;
    let radial = ((distance - preferred) / preferred).clamp(-1.0, 1.0);
    let movement = (toward.perp() * ctx.strafe_sign + toward * radial)
        .try_normalize()
        .unwrap_or(toward);

    let fire = ctx.ammo > 0 && rng.gen_bool(profile.fire_chance.clamp(0.0, 1.0));
    decide(ctx, AiPhase::Strafe, ctx.strafe_sign, Intent {
        movement,
        fire,
        ..Default::default()
    })
}

fn evaluate_engage(
    ctx: &AiContext,
    profile: &AiProfile,
    toward: DVec2,
    distance: f64,
) -> AiDecision {
    if distance > profile.engage_distance * 1.5
        || ctx.elapsed_in_phase_secs > profile.engage_timeout_secs
    {
        return decide(ctx, AiPhase::Strafe, ctx.strafe_sign, Intent {
            movement: toward.perp() * ctx.strafe_sign,
            ..Default::default()
        });
    }

    // Press melee again during the first slash to chain the combo.
    let melee = !ctx.state.is_melee() || ctx.state == ActionKind::MeleeSlash1;
    decide(ctx, AiPhase::Engage, ctx.strafe_sign, Intent {
        movement: toward,
        melee,
        ..Default::default()
    })
}

fn evaluate_recover(ctx: &AiContext, toward: DVec2) -> AiDecision {
    if !ctx.overheated {
        return decide(ctx, AiPhase::Approach, ctx.strafe_sign, Intent {
            movement: toward,
            ..Default::default()
        });
    }
    decide(ctx, AiPhase::Recover, ctx.strafe_sign, retreat(toward))
}

/// Sidestep perpendicular to an incoming homing projectile.
fn dodge_direction(ctx: &AiContext, profile: &AiProfile) -> Option<DVec2> {
    if ctx.overheated || ctx.boost_ratio < profile.evade_boost_ratio {
        return None;
    }
    let incoming = ctx.incoming?;
    if ctx.position.distance(incoming) > profile.threat_radius {
        return None;
    }
    let from = DVec2::new(ctx.position.x - incoming.x, ctx.position.z - incoming.z);
    let away = from.try_normalize()?;
    Some(away.perp() * ctx.strafe_sign)
}

fn retreat(toward: DVec2) -> Intent {
    Intent {
        movement: -toward,
        ..Default::default()
    }
}

fn decide(ctx: &AiContext, phase: AiPhase, strafe_sign: f64, intent: Intent) -> AiDecision {
    AiDecision {
        phase,
        phase_changed: phase != ctx.phase,
        strafe_sign,
        intent,
    }
}
