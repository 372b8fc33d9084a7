//! Externally owned tunables consumed read-only by the simulation.
//!
//! Distances are world units, speeds are world units per 60 Hz-equivalent
//! frame, durations named `*_frames` are 60 Hz-equivalent frames and durations
//! named `*_secs` are simulation-clock seconds. Friction values are per-frame
//! retention bases raised to `time_scale` each tick.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Hit outcome parameters for one attack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AttackProfile {
    /// Knockback power scalar (multiplies `knockback_speed`).
    pub knockback_power: f64,
    /// Stun duration in seconds.
    pub stun_secs: f64,
    /// Global hit-freeze armed by this attack (ticks).
    pub hit_freeze_frames: u32,
}

/// The complete tunable table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // --- Resources ---
    pub max_boost: f64,
    pub max_ammo: u32,
    pub ammo_recovery_secs: f64,
    pub dash_init_cost: f64,
    pub dash_cost_per_frame: f64,
    pub ascend_cost_per_frame: f64,
    pub lunge_cost_per_frame: f64,
    pub evade_cost: f64,
    pub rainbow_evade_cost: f64,

    // --- Movement ---
    pub walk_speed: f64,
    /// Fraction of the walk-speed gap left after one frame.
    pub walk_response: f64,
    pub ground_friction: f64,
    pub air_friction: f64,
    pub gravity: f64,
    pub max_fall_speed: f64,
    pub dash_burst_speed: f64,
    pub dash_sustain_speed: f64,
    /// Fraction of the burst-to-sustain gap closed per frame.
    pub dash_decay_rate: f64,
    /// Fraction of the heading gap closed per frame while steering a dash.
    pub dash_turn_rate: f64,
    pub dash_coast_frames: f64,
    pub ascend_speed: f64,
    pub evade_speed: f64,
    pub rainbow_evade_speed: f64,
    pub evade_frames: f64,
    pub evade_friction: f64,
    pub landing_lag_min_frames: f64,
    pub landing_lag_max_frames: f64,

    // --- Melee ---
    pub melee_startup_frames: f64,
    /// Startup timer rate while overheated (< 1 lengthens startup).
    pub melee_depleted_rate: f64,
    pub lunge_speed: f64,
    pub lunge_max_frames: f64,
    pub melee_range: f64,
    pub slash1_frames: f64,
    pub slash2_frames: f64,
    pub melee_recovery_frames: f64,
    pub recovery_hop_speed: f64,
    pub slash1: AttackProfile,
    pub slash2: AttackProfile,

    // --- Shooting ---
    pub shot_startup_frames: f64,
    pub shot_recovery_frames: f64,
    /// Half-angle of the forward cone for moving shots (degrees).
    pub aim_cone_degrees: f64,
    pub bullet_speed: f64,
    pub homing_lateral_speed: f64,
    pub bullet_ttl_frames: f64,
    pub bullet_radius: f64,
    pub shot: AttackProfile,

    // --- Lock-on / geometry ---
    pub red_lock_distance: f64,
    /// Height above a unit's origin used as aim point and muzzle height.
    pub aim_point_height: f64,
    pub arena_radius: f64,
    pub unit_hitbox_radius: f64,
    pub knockback_speed: f64,

    // --- Input timing ---
    pub double_tap_window_secs: f64,
    pub dash_window_secs: f64,
    pub hold_threshold_secs: f64,
    pub input_buffer_secs: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            max_boost: 100.0,
            max_ammo: 6,
            ammo_recovery_secs: 2.5,
            dash_init_cost: 10.0,
            dash_cost_per_frame: 0.5,
            ascend_cost_per_frame: 0.7,
            lunge_cost_per_frame: 0.3,
            evade_cost: 15.0,
            rainbow_evade_cost: 30.0,

            walk_speed: 0.3,
            walk_response: 0.8,
            ground_friction: 0.82,
            air_friction: 0.97,
            gravity: 0.02,
            max_fall_speed: 1.2,
            dash_burst_speed: 1.5,
            dash_sustain_speed: 0.85,
            dash_decay_rate: 0.1,
            dash_turn_rate: 0.15,
            dash_coast_frames: 8.0,
            ascend_speed: 0.4,
            evade_speed: 1.2,
            rainbow_evade_speed: 1.8,
            evade_frames: 16.0,
            evade_friction: 0.93,
            landing_lag_min_frames: 6.0,
            landing_lag_max_frames: 36.0,

            melee_startup_frames: 8.0,
            melee_depleted_rate: 0.5,
            lunge_speed: 1.1,
            lunge_max_frames: 45.0,
            melee_range: 2.5,
            slash1_frames: 14.0,
            slash2_frames: 18.0,
            melee_recovery_frames: 18.0,
            recovery_hop_speed: 0.12,
            slash1: AttackProfile {
                knockback_power: 1.0,
                stun_secs: 0.4,
                hit_freeze_frames: 5,
            },
            slash2: AttackProfile {
                knockback_power: 1.6,
                stun_secs: 0.8,
                hit_freeze_frames: 8,
            },

            shot_startup_frames: 6.0,
            shot_recovery_frames: 16.0,
            aim_cone_degrees: 60.0,
            bullet_speed: 1.8,
            homing_lateral_speed: 0.3,
            bullet_ttl_frames: 150.0,
            bullet_radius: 0.4,
            shot: AttackProfile {
                knockback_power: 0.6,
                stun_secs: 0.3,
                hit_freeze_frames: 3,
            },

            red_lock_distance: 20.0,
            aim_point_height: 1.2,
            arena_radius: 80.0,
            unit_hitbox_radius: 1.0,
            knockback_speed: 0.5,

            double_tap_window_secs: 0.25,
            dash_window_secs: 0.3,
            hold_threshold_secs: 0.2,
            input_buffer_secs: 0.2,
        }
    }
}

impl Tuning {
    /// Parse a JSON tuning table. Missing fields take their default values.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read and parse a JSON tuning table from disk.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("max_boost", self.max_boost),
            ("ammo_recovery_secs", self.ammo_recovery_secs),
            ("walk_speed", self.walk_speed),
            ("max_fall_speed", self.max_fall_speed),
            ("dash_burst_speed", self.dash_burst_speed),
            ("dash_sustain_speed", self.dash_sustain_speed),
            ("dash_coast_frames", self.dash_coast_frames),
            ("ascend_speed", self.ascend_speed),
            ("evade_speed", self.evade_speed),
            ("rainbow_evade_speed", self.rainbow_evade_speed),
            ("evade_frames", self.evade_frames),
            ("landing_lag_max_frames", self.landing_lag_max_frames),
            ("melee_startup_frames", self.melee_startup_frames),
            ("lunge_speed", self.lunge_speed),
            ("lunge_max_frames", self.lunge_max_frames),
            ("melee_range", self.melee_range),
            ("slash1_frames", self.slash1_frames),
            ("slash2_frames", self.slash2_frames),
            ("melee_recovery_frames", self.melee_recovery_frames),
            ("shot_startup_frames", self.shot_startup_frames),
            ("shot_recovery_frames", self.shot_recovery_frames),
            ("bullet_speed", self.bullet_speed),
            ("bullet_ttl_frames", self.bullet_ttl_frames),
            ("red_lock_distance", self.red_lock_distance),
            ("arena_radius", self.arena_radius),
            ("unit_hitbox_radius", self.unit_hitbox_radius),
            ("knockback_speed", self.knockback_speed),
            ("double_tap_window_secs", self.double_tap_window_secs),
            ("dash_window_secs", self.dash_window_secs),
            ("hold_threshold_secs", self.hold_threshold_secs),
            ("input_buffer_secs", self.input_buffer_secs),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(invalid(field, format!("must be positive, got {value}")));
            }
        }

        let non_negative = [
            ("dash_init_cost", self.dash_init_cost),
            ("dash_cost_per_frame", self.dash_cost_per_frame),
            ("ascend_cost_per_frame", self.ascend_cost_per_frame),
            ("lunge_cost_per_frame", self.lunge_cost_per_frame),
            ("evade_cost", self.evade_cost),
            ("rainbow_evade_cost", self.rainbow_evade_cost),
            ("gravity", self.gravity),
            ("homing_lateral_speed", self.homing_lateral_speed),
            ("bullet_radius", self.bullet_radius),
            ("landing_lag_min_frames", self.landing_lag_min_frames),
            ("recovery_hop_speed", self.recovery_hop_speed),
            ("aim_point_height", self.aim_point_height),
            ("slash1.knockback_power", self.slash1.knockback_power),
            ("slash1.stun_secs", self.slash1.stun_secs),
            ("slash2.knockback_power", self.slash2.knockback_power),
            ("slash2.stun_secs", self.slash2.stun_secs),
            ("shot.knockback_power", self.shot.knockback_power),
            ("shot.stun_secs", self.shot.stun_secs),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(invalid(field, format!("must not be negative, got {value}")));
            }
        }

        let bases = [
            ("walk_response", self.walk_response),
            ("ground_friction", self.ground_friction),
            ("air_friction", self.air_friction),
            ("evade_friction", self.evade_friction),
            ("melee_depleted_rate", self.melee_depleted_rate),
        ];
        for (field, value) in bases {
            if !(value > 0.0 && value <= 1.0) {
                return Err(invalid(field, format!("must be in (0, 1], got {value}")));
            }
        }

        let rates = [
            ("dash_decay_rate", self.dash_decay_rate),
            ("dash_turn_rate", self.dash_turn_rate),
        ];
        for (field, value) in rates {
            if !(value >= 0.0 && value <= 1.0) {
                return Err(invalid(field, format!("must be in [0, 1], got {value}")));
            }
        }

        if !(self.aim_cone_degrees > 0.0 && self.aim_cone_degrees <= 180.0) {
            return Err(invalid(
                "aim_cone_degrees",
                format!("must be in (0, 180], got {}", self.aim_cone_degrees),
            ));
        }

        if self.landing_lag_min_frames > self.landing_lag_max_frames {
            return Err(invalid(
                "landing_lag_min_frames",
                format!(
                    "exceeds landing_lag_max_frames ({} > {})",
                    self.landing_lag_min_frames, self.landing_lag_max_frames
                ),
            ));
        }

        if self.max_ammo == 0 {
            return Err(invalid("max_ammo", "must be at least 1".to_string()));
        }

        Ok(())
    }

    /// Cosine of the moving-shot cone half-angle.
    pub fn aim_cone_cos(&self) -> f64 {
        self.aim_cone_degrees.to_radians().cos()
    }
}

fn invalid(field: &'static str, reason: String) -> ConfigError {
    ConfigError::Invalid { field, reason }
}
