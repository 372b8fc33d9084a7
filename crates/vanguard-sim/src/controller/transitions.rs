//! Input-driven transition table.
//!
//! Rules are keyed by (current state, trigger, guard) and evaluated once per
//! tick in priority order; the first match wins. Forced transitions (stun,
//! touchdown) and timer expiries are handled by the controller around this
//! table.

use vanguard_core::commands::{Consumed, Intent};
use vanguard_core::enums::{ActionKind, KindSet};
use vanguard_core::tuning::Tuning;

use super::Body;

/// An intent-borne reason to change state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Dash,
    Evade,
    Melee,
    Fire,
    Ascend,
}

impl Trigger {
    fn present(self, intent: &Intent) -> bool {
        match self {
            Trigger::Dash => intent.dash,
            Trigger::Evade => intent.evade.is_some(),
            Trigger::Melee => intent.melee,
            Trigger::Fire => intent.fire,
            Trigger::Ascend => intent.ascend,
        }
    }

    /// Record that the buffered request behind this trigger was used.
    pub fn mark(self, consumed: &mut Consumed) {
        match self {
            Trigger::Dash => consumed.dash = true,
            Trigger::Evade => consumed.evade = true,
            Trigger::Melee => consumed.melee = true,
            Trigger::Fire => consumed.fire = true,
            Trigger::Ascend => {}
        }
    }
}

/// Resource facts a guard may inspect.
#[derive(Debug, Clone, Copy)]
pub struct Gate {
    pub boost: f64,
    pub overheated: bool,
    pub ammo: u32,
    pub melee_active: bool,
    pub dash_cost: f64,
    pub evade_cost: f64,
    pub rainbow_evade_cost: f64,
}

impl Gate {
    pub fn new(body: &Body, tuning: &Tuning) -> Self {
        Self {
            boost: body.ledger.boost(),
            overheated: body.ledger.is_overheated(),
            ammo: body.ledger.ammo(),
            melee_active: body.action.state.kind().is_melee(),
            dash_cost: tuning.dash_init_cost,
            evade_cost: tuning.evade_cost,
            rainbow_evade_cost: tuning.rainbow_evade_cost,
        }
    }

    /// Cost of an evasive step from the current state.
    pub fn evade_cost(&self) -> f64 {
        if self.melee_active {
            self.rainbow_evade_cost
        } else {
            self.evade_cost
        }
    }
}

pub struct Rule {
    pub trigger: Trigger,
    pub from: KindSet,
    pub guard: fn(&Gate) -> bool,
}

/// States free to start a new action.
pub const FREE: KindSet = KindSet::of(&[
    ActionKind::Idle,
    ActionKind::Walk,
    ActionKind::Ascend,
    ActionKind::Dash,
]);

/// Dash also cancels evasive steps and melee before the recovery lock.
pub const DASH_FROM: KindSet = KindSet::of(&[
    ActionKind::Idle,
    ActionKind::Walk,
    ActionKind::Ascend,
    ActionKind::Evade,
    ActionKind::MeleeStartup,
    ActionKind::MeleeLunge,
    ActionKind::MeleeSlash1,
    ActionKind::MeleeSlash2,
]);

/// Evasive steps start from locomotion or cancel melee before recovery.
pub const EVADE_FROM: KindSet = KindSet::of(&[
    ActionKind::Idle,
    ActionKind::Walk,
    ActionKind::MeleeStartup,
    ActionKind::MeleeLunge,
    ActionKind::MeleeSlash1,
    ActionKind::MeleeSlash2,
]);

pub const ASCEND_FROM: KindSet =
    KindSet::of(&[ActionKind::Idle, ActionKind::Walk, ActionKind::Dash]);

fn can_dash(gate: &Gate) -> bool {
    !gate.overheated && gate.boost > gate.dash_cost
}

fn can_evade(gate: &Gate) -> bool {
    !gate.overheated && gate.boost > gate.evade_cost()
}

fn can_melee(_gate: &Gate) -> bool {
    true
}

fn can_fire(gate: &Gate) -> bool {
    gate.ammo > 0
}

fn can_ascend(gate: &Gate) -> bool {
    !gate.overheated && gate.boost > 0.0
}

/// Priority-ordered rules.
pub const RULES: [Rule; 5] = [
    Rule {
        trigger: Trigger::Dash,
        from: DASH_FROM,
        guard: can_dash,
    },
    Rule {
        trigger: Trigger::Evade,
        from: EVADE_FROM,
        guard: can_evade,
    },
    Rule {
        trigger: Trigger::Melee,
        from: FREE,
        guard: can_melee,
    },
    Rule {
        trigger: Trigger::Fire,
        from: FREE,
        guard: can_fire,
    },
    Rule {
        trigger: Trigger::Ascend,
        from: ASCEND_FROM,
        guard: can_ascend,
    },
];

/// First rule matching the current state, a present trigger and its guard.
pub fn select(current: ActionKind, intent: &Intent, gate: &Gate) -> Option<Trigger> {
    RULES
        .iter()
        .find(|rule| {
            rule.from.contains(current) && rule.trigger.present(intent) && (rule.guard)(gate)
        })
        .map(|rule| rule.trigger)
}
