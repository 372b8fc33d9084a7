//! Per-unit action controller: a single state enum, an explicit transition
//! table, and the physics integrator.
//!
//! One call to [`step`] per unit per integrated tick. The controller never
//! touches other units or projectiles directly; shots, hits and tracking cuts
//! are returned as requests and applied later in the tick.

pub mod actions;
pub mod input;
pub mod physics;
pub mod transitions;

use glam::DVec3;
use tracing::debug;

use vanguard_core::commands::{Consumed, Intent};
use vanguard_core::components::{HitRecord, Kinematics, Unit};
use vanguard_core::enums::{ActionKind, AimMode, LockState, Team};
use vanguard_core::events::{HitEvent, SimEvent};
use vanguard_core::ledger::ResourceLedger;
use vanguard_core::tuning::Tuning;
use vanguard_core::types::{Step, UnitId};

use crate::systems::projectiles::ShotRequest;

pub use input::InputTracker;

/// The action state with the timers that belong to it. Leaving a state drops
/// its timers with it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ActionState {
    Idle,
    Walk,
    /// Boost held: climbing.
    Ascend,
    Dash {
        speed: f64,
        direction: DVec3,
        /// Frames spent with neither steering nor boost held.
        coast_frames: f64,
    },
    Evade {
        remaining: f64,
        rainbow: bool,
    },
    Shoot {
        startup: f64,
        recovery: f64,
        mode: AimMode,
        fired: bool,
    },
    MeleeStartup {
        remaining: f64,
    },
    MeleeLunge {
        startup: f64,
        lunge: f64,
    },
    MeleeSlash1 {
        remaining: f64,
        latched: bool,
        combo: bool,
    },
    MeleeSlash2 {
        remaining: f64,
        latched: bool,
    },
    MeleeRecovery {
        remaining: f64,
    },
    Landing {
        remaining: f64,
    },
    Stunned,
}

impl ActionState {
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionState::Idle => ActionKind::Idle,
            ActionState::Walk => ActionKind::Walk,
            ActionState::Ascend => ActionKind::Ascend,
            ActionState::Dash { .. } => ActionKind::Dash,
            ActionState::Evade { .. } => ActionKind::Evade,
            ActionState::Shoot { .. } => ActionKind::Shoot,
            ActionState::MeleeStartup { .. } => ActionKind::MeleeStartup,
            ActionState::MeleeLunge { .. } => ActionKind::MeleeLunge,
            ActionState::MeleeSlash1 { .. } => ActionKind::MeleeSlash1,
            ActionState::MeleeSlash2 { .. } => ActionKind::MeleeSlash2,
            ActionState::MeleeRecovery { .. } => ActionKind::MeleeRecovery,
            ActionState::Landing { .. } => ActionKind::Landing,
            ActionState::Stunned => ActionKind::Stunned,
        }
    }

    /// Melee-cancel evasive step (drawn with the colored trail).
    pub fn is_rainbow(&self) -> bool {
        matches!(self, ActionState::Evade { rainbow: true, .. })
    }
}

/// Controller component.
#[derive(Debug, Clone, Copy)]
pub struct Action {
    pub state: ActionState,
    /// Touched down during a locked state; landing lag starts when it ends.
    pub landing_deferred: bool,
    /// Airborne only from the recovery hop; touching down skips landing lag.
    pub hopping: bool,
}

impl Default for Action {
    fn default() -> Self {
        Self {
            state: ActionState::Idle,
            landing_deferred: false,
            hopping: false,
        }
    }
}

/// Latest intent for a unit, written by the input and AI systems.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntentSlot(pub Intent);

/// Another unit as seen at the start of the controller pass.
#[derive(Debug, Clone, Copy)]
pub struct Contact {
    pub id: UnitId,
    pub team: Team,
    pub position: DVec3,
}

/// Read-only surroundings of the unit being stepped.
pub struct Env<'a> {
    pub tuning: &'a Tuning,
    pub step: Step,
    pub now: f64,
    /// The unit's resolved target, if any.
    pub target: Option<Contact>,
    /// Every unit, including the one being stepped.
    pub contacts: &'a [Contact],
}

/// Mutable view of the unit being stepped.
pub struct Body<'a> {
    pub unit: &'a Unit,
    pub kin: &'a mut Kinematics,
    pub action: &'a mut Action,
    pub ledger: &'a mut ResourceLedger,
    pub hit: &'a HitRecord,
    pub lock: LockState,
}

/// Cross-unit effects requested during the controller pass.
#[derive(Debug, Default)]
pub struct Requests {
    pub shots: Vec<ShotRequest>,
    pub hits: Vec<HitEvent>,
    /// Units whose evasive step cuts homing aimed at them.
    pub cut_tracking: Vec<UnitId>,
    pub events: Vec<SimEvent>,
}

/// Whether the last hit still holds the unit in stun.
pub fn stun_active(hit: &HitRecord, now: f64) -> bool {
    hit.last_hit_at.is_some_and(|at| now - at < hit.stun_secs)
}

/// Advance one unit by one integrated tick.
pub fn step(body: &mut Body, env: &Env, intent: &Intent, out: &mut Requests) -> Consumed {
    let before = body.action.state.kind();

    let consumed = if stun_active(body.hit, env.now) {
        physics::stunned(body, env);
        Consumed::default()
    } else {
        if body.action.state == ActionState::Stunned {
            actions::leave_stun(body, env, out);
        }

        let mut consumed = actions::advance(body, env, intent, out);

        let gate = transitions::Gate::new(body, env.tuning);
        if let Some(trigger) = transitions::select(body.action.state.kind(), intent, &gate) {
            actions::enter(trigger, body, env, intent, out);
            trigger.mark(&mut consumed);
        }

        actions::drive(body, env, intent);
        if physics::integrate(body, env) {
            actions::touch_down(body, env, out);
        }
        actions::vent_on_ground(body, env, out);
        consumed
    };

    body.ledger
        .tick_ammo_recovery(env.step.delta_secs, env.tuning.ammo_recovery_secs);

    let after = body.action.state.kind();
    if before != after {
        debug!(unit = body.unit.id.0, ?before, ?after, "action state changed");
        out.events.push(SimEvent::StateChanged {
            unit: body.unit.id,
            from: before,
            to: after,
        });
    }
    consumed
}
