//! Homing guidance for projectiles.
//!
//! The law keeps full thrust along the spawn-time forward axis and adds a
//! bounded lateral nudge toward the target. Forward speed is never traded
//! for turning, so a projectile cannot stall or orbit its target.

use glam::DVec3;

use vanguard_core::constants::DIRECTION_EPSILON;
use vanguard_core::types::try_direction;

/// Re-aim a homing projectile.
///
/// Returns the new velocity, or `None` once the target lies behind the
/// spawn-time forward axis (the projectile has passed it). Callers must
/// disable homing permanently on `None`.
pub fn homing_velocity(
    position: DVec3,
    forward: DVec3,
    aim_point: DVec3,
    bullet_speed: f64,
    lateral_speed: f64,
) -> Option<DVec3> {
    let to_target = aim_point - position;
    let Some(toward) = try_direction(to_target) else {
        // On top of the aim point: keep flying straight.
        return Some(forward * bullet_speed);
    };
    if forward.dot(toward) < 0.0 {
        return None;
    }

    let along = forward * to_target.dot(forward);
    let lateral = to_target - along;
    if lateral.length() <= DIRECTION_EPSILON {
        return Some(forward * bullet_speed);
    }
    Some(forward * bullet_speed + lateral.normalize() * lateral_speed)
}

/// Upper bound on a guided projectile's speed.
pub fn max_guided_speed(bullet_speed: f64, lateral_speed: f64) -> f64 {
    bullet_speed.hypot(lateral_speed)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEED: f64 = 1.8;
    const LATERAL: f64 = 0.3;

    #[test]
    fn test_straight_ahead_keeps_forward_velocity() {
        let v = homing_velocity(DVec3::ZERO, DVec3::Z, DVec3::new(0.0, 0.0, 30.0), SPEED, LATERAL)
            .unwrap();
        assert!((v - DVec3::Z * SPEED).length() < 1e-12);
    }

    #[test]
    fn test_lateral_offset_adds_bounded_nudge() {
        let v = homing_velocity(DVec3::ZERO, DVec3::Z, DVec3::new(10.0, 0.0, 30.0), SPEED, LATERAL)
            .unwrap();
        assert!((v.z - SPEED).abs() < 1e-12, "forward component untouched");
        assert!((v.x - LATERAL).abs() < 1e-12);
        assert!(v.length() <= max_guided_speed(SPEED, LATERAL) + 1e-12);
        assert!(v.length() >= SPEED);
    }

    #[test]
    fn test_passed_target_disables_guidance() {
        let passed = homing_velocity(
            DVec3::new(0.0, 0.0, 40.0),
            DVec3::Z,
            DVec3::new(1.0, 0.0, 30.0),
            SPEED,
            LATERAL,
        );
        assert!(passed.is_none());
    }

    #[test]
    fn test_speed_bounded_for_any_geometry() {
        for i in 0..36 {
            let angle = (i as f64).to_radians() * 10.0;
            let aim = DVec3::new(angle.sin() * 20.0, 3.0, angle.cos() * 20.0);
            if let Some(v) = homing_velocity(DVec3::ZERO, DVec3::Z, aim, SPEED, LATERAL) {
                let speed = v.length();
                assert!(speed >= SPEED - 1e-9);
                assert!(speed <= max_guided_speed(SPEED, LATERAL) + 1e-9);
            }
        }
    }
}
