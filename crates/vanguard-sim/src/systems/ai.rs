//! AI pilot system: runs the decision loop for every AI unit and writes the
//! resulting intent. The controller treats it exactly like player input.

use glam::DVec3;
use hecs::World;
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use vanguard_ai::fsm::{evaluate, AiContext, AiPhase};
use vanguard_ai::profiles::AiProfile;
use vanguard_core::components::{Kinematics, Projectile, Targeting, Unit};
use vanguard_core::ledger::ResourceLedger;
use vanguard_core::types::UnitId;

use crate::controller::{Action, IntentSlot};

/// Decision-loop memory for one AI unit.
#[derive(Debug, Clone, Copy)]
pub struct AiBrain {
    pub phase: AiPhase,
    pub phase_started_at: f64,
    /// +1 or -1: circling direction.
    pub strafe_sign: f64,
}

impl Default for AiBrain {
    fn default() -> Self {
        Self {
            phase: AiPhase::default(),
            phase_started_at: 0.0,
            strafe_sign: 1.0,
        }
    }
}

pub fn run(world: &mut World, profile: &AiProfile, rng: &mut ChaCha8Rng, now: f64) {
    let positions: Vec<(UnitId, DVec3)> = world
        .query::<(&Unit, &Kinematics)>()
        .iter()
        .map(|(_, (unit, kin))| (unit.id, kin.position))
        .collect();
    let incoming: Vec<(UnitId, DVec3)> = world
        .query::<&Projectile>()
        .iter()
        .filter(|(_, p)| p.homing)
        .filter_map(|(_, p)| p.target.map(|target| (target, p.position)))
        .collect();

    // Gather in id order so random draws happen in a fixed sequence.
    let mut contexts: Vec<(hecs::Entity, UnitId, AiContext)> = Vec::new();
    {
        let mut query =
            world.query::<(&Unit, &Kinematics, &Action, &ResourceLedger, &Targeting, &AiBrain)>();
        for (entity, (unit, kin, action, ledger, targeting, brain)) in query.iter() {
            let target = targeting
                .target
                .and_then(|id| positions.iter().find(|(other, _)| *other == id))
                .map(|(_, position)| *position);
            let threat = incoming
                .iter()
                .filter(|(target, _)| *target == unit.id)
                .map(|(_, position)| *position)
                .min_by(|a, b| {
                    kin.position
                        .distance_squared(*a)
                        .total_cmp(&kin.position.distance_squared(*b))
                });
            let ctx = AiContext {
                phase: brain.phase,
                elapsed_in_phase_secs: now - brain.phase_started_at,
                state: action.state.kind(),
                position: kin.position,
                target,
                lock: targeting.lock,
                boost_ratio: ledger.boost_ratio(),
                overheated: ledger.is_overheated(),
                ammo: ledger.ammo(),
                incoming: threat,
                strafe_sign: brain.strafe_sign,
            };
            contexts.push((entity, unit.id, ctx));
        }
    }
    contexts.sort_by_key(|(_, id, _)| *id);

    for (entity, id, ctx) in contexts {
        let decision = evaluate(&ctx, profile, rng);
        if let Ok(mut brain) = world.get::<&mut AiBrain>(entity) {
            if decision.phase_changed {
                debug!(unit = id.0, from = ?brain.phase, to = ?decision.phase, "ai phase changed");
                brain.phase = decision.phase;
                brain.phase_started_at = now;
            }
            brain.strafe_sign = decision.strafe_sign;
        }
        if let Ok(mut slot) = world.get::<&mut IntentSlot>(entity) {
            slot.0 = decision.intent;
        }
    }
}
