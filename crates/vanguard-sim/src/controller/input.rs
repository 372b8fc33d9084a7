//! Player input tracking: turns timestamped key events into intents.
//!
//! All windows are measured on the simulation clock, the same time base the
//! frame-counted state timers derive from.

use glam::DVec2;

use vanguard_core::commands::{Consumed, InputEvent, Intent};
use vanguard_core::enums::Key;
use vanguard_core::tuning::Tuning;

/// Per-player input state, attached to player-piloted units.
#[derive(Debug, Clone, Default)]
pub struct InputTracker {
    /// Press time of each currently held key.
    held_since: [Option<f64>; 8],
    /// Time of the last press that could still start a double-tap.
    last_press: [Option<f64>; 8],
    /// The current boost hold began as the second press of a dash.
    boost_press_is_dash: bool,
    dash_requested_at: Option<f64>,
    evade_requested: Option<(DVec2, f64)>,
    fire_requested_at: Option<f64>,
    melee_requested_at: Option<f64>,
    cycle_pending: bool,
}

impl InputTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key event stamped at `now`.
    pub fn handle(&mut self, event: InputEvent, now: f64, tuning: &Tuning) {
        let idx = event.key.index();
        if !event.pressed {
            self.held_since[idx] = None;
            return;
        }
        if self.held_since[idx].is_some() {
            // Auto-repeat from the host; not a new press.
            return;
        }
        self.held_since[idx] = Some(now);

        match event.key {
            Key::Boost => {
                if self.double_tapped(idx, now, tuning.dash_window_secs) {
                    self.dash_requested_at = Some(now);
                    self.boost_press_is_dash = true;
                } else {
                    self.boost_press_is_dash = false;
                }
            }
            Key::Fire => self.fire_requested_at = Some(now),
            Key::Melee => self.melee_requested_at = Some(now),
            Key::CycleTarget => self.cycle_pending = true,
            key => {
                if let Some((x, z)) = key.direction() {
                    if self.double_tapped(idx, now, tuning.double_tap_window_secs) {
                        self.evade_requested = Some((DVec2::new(x, z), now));
                    }
                }
            }
        }
    }

    /// Second press within `window` of the first. A completed double-tap
    /// clears the slot so a third press starts a new sequence.
    fn double_tapped(&mut self, idx: usize, now: f64, window: f64) -> bool {
        match self.last_press[idx] {
            Some(prev) if now - prev <= window => {
                self.last_press[idx] = None;
                true
            }
            _ => {
                self.last_press[idx] = Some(now);
                false
            }
        }
    }

    /// Build this tick's intent. Buffered requests older than the buffer
    /// window are dropped; the cycle-target edge is consumed.
    pub fn intent(&mut self, now: f64, tuning: &Tuning) -> Intent {
        let window = tuning.input_buffer_secs;
        let fresh = |at: Option<f64>| at.filter(|t| now - t <= window);
        self.dash_requested_at = fresh(self.dash_requested_at);
        self.fire_requested_at = fresh(self.fire_requested_at);
        self.melee_requested_at = fresh(self.melee_requested_at);
        self.evade_requested = self.evade_requested.filter(|(_, t)| now - t <= window);

        let mut movement = DVec2::ZERO;
        for key in Key::DIRECTIONS {
            if self.held_since[key.index()].is_some() {
                if let Some((x, z)) = key.direction() {
                    movement += DVec2::new(x, z);
                }
            }
        }
        let movement = movement.try_normalize().unwrap_or(DVec2::ZERO);

        let boost_since = self.held_since[Key::Boost.index()];
        let ascend = !self.boost_press_is_dash
            && boost_since.is_some_and(|since| now - since >= tuning.hold_threshold_secs);

        Intent {
            movement,
            dash: self.dash_requested_at.is_some(),
            evade: self.evade_requested.map(|(dir, _)| dir),
            ascend,
            boost_held: boost_since.is_some(),
            fire: self.fire_requested_at.is_some(),
            melee: self.melee_requested_at.is_some(),
            cycle_target: std::mem::take(&mut self.cycle_pending),
        }
    }

    /// Clear the buffers the controller acted on.
    pub fn acknowledge(&mut self, consumed: Consumed) {
        if consumed.dash {
            self.dash_requested_at = None;
        }
        if consumed.evade {
            self.evade_requested = None;
        }
        if consumed.fire {
            self.fire_requested_at = None;
        }
        if consumed.melee {
            self.melee_requested_at = None;
        }
    }
}
