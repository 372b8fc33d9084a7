//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Published action-state tag. Each unit is in exactly one at any instant.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    #[default]
    Idle,
    Walk,
    Ascend,
    Dash,
    Evade,
    Shoot,
    MeleeStartup,
    MeleeLunge,
    MeleeSlash1,
    MeleeSlash2,
    MeleeRecovery,
    Landing,
    Stunned,
}

impl ActionKind {
    /// Bit used by [`KindSet`].
    pub const fn bit(self) -> u16 {
        1 << (self as u16)
    }

    /// Whether this is one of the melee states.
    pub fn is_melee(self) -> bool {
        matches!(
            self,
            ActionKind::MeleeStartup
                | ActionKind::MeleeLunge
                | ActionKind::MeleeSlash1
                | ActionKind::MeleeSlash2
                | ActionKind::MeleeRecovery
        )
    }
}

/// A set of action kinds, used as the "from" column of transition rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KindSet(u16);

impl KindSet {
    pub const fn of(kinds: &[ActionKind]) -> Self {
        let mut bits = 0u16;
        let mut i = 0;
        while i < kinds.len() {
            bits |= kinds[i].bit();
            i += 1;
        }
        Self(bits)
    }

    pub const fn contains(self, kind: ActionKind) -> bool {
        self.0 & kind.bit() != 0
    }
}

/// Proximity lock-on state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LockState {
    /// Target within the red-lock distance: aim assist and homing enabled.
    Near,
    /// Target outside the red-lock distance (or no target): free aim.
    #[default]
    Far,
}

/// Team tag. Units never damage their own team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Blue,
    Red,
}

/// How a shot treats the shooter's movement.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AimMode {
    /// Target is inside the forward cone: keep moving while firing.
    #[default]
    Move,
    /// Target is outside the cone: horizontal velocity is locked while turning to fire.
    Stop,
}

/// Who produces a unit's intents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pilot {
    Player,
    Ai,
}

/// Discrete input keys produced by the external input translator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Forward,
    Back,
    Left,
    Right,
    Boost,
    Fire,
    Melee,
    CycleTarget,
}

impl Key {
    /// Dense index for per-key tables.
    pub const fn index(self) -> usize {
        self as usize
    }

    /// The four movement keys.
    pub const DIRECTIONS: [Key; 4] = [Key::Forward, Key::Back, Key::Left, Key::Right];

    /// World XZ direction for a movement key (`+z` forward, `+x` right).
    pub fn direction(self) -> Option<(f64, f64)> {
        match self {
            Key::Forward => Some((0.0, 1.0)),
            Key::Back => Some((0.0, -1.0)),
            Key::Left => Some((-1.0, 0.0)),
            Key::Right => Some((1.0, 0.0)),
            _ => None,
        }
    }
}
