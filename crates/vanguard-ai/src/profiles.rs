//! Behavior profile for AI pilots.

/// Distances and thresholds steering the AI decision loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AiProfile {
    /// Beyond this distance the pilot closes in.
    pub strafe_max_distance: f64,
    /// Preferred circling distance.
    pub strafe_preferred_distance: f64,
    /// Within this distance (and NEAR lock) the pilot commits to melee.
    pub engage_distance: f64,
    /// Minimum boost ratio before spending boost on a dash.
    pub dash_boost_ratio: f64,
    /// Minimum boost ratio before dodging incoming fire.
    pub evade_boost_ratio: f64,
    /// A homing projectile closer than this triggers a dodge.
    pub threat_radius: f64,
    /// Per-decision chance of pulling the trigger while strafing.
    pub fire_chance: f64,
    /// Longest a melee commitment lasts before re-evaluating.
    pub engage_timeout_secs: f64,
}

impl Default for AiProfile {
    fn default() -> Self {
        Self {
            strafe_max_distance: 30.0,
            strafe_preferred_distance: 18.0,
            engage_distance: 10.0,
            dash_boost_ratio: 0.5,
            evade_boost_ratio: 0.3,
            threat_radius: 8.0,
            fire_chance: 0.04,
            engage_timeout_secs: 2.0,
        }
    }
}
