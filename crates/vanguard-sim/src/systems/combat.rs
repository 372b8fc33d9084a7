//! Combat resolver: the single place a hit mutates its target.

use glam::DVec3;
use hecs::World;
use tracing::debug;

use vanguard_core::components::{HitRecord, Kinematics, Unit};
use vanguard_core::events::{HitEvent, SimEvent};
use vanguard_core::types::try_direction;

/// Record `hit` on its target and arm the shared hit-freeze.
///
/// The target is stunned from `now` for `hit.stun_secs`. The freeze counter
/// only ever rises to the larger of its current and the new value. Hits on a
/// unit that no longer resolves are dropped. Returns whether the hit landed.
pub fn apply_hit(
    world: &mut World,
    hit: &HitEvent,
    now: f64,
    hit_freeze: &mut u32,
    listener: Option<DVec3>,
    events: &mut Vec<SimEvent>,
) -> bool {
    let target = world
        .query_mut::<(&Unit, &Kinematics, &mut HitRecord)>()
        .into_iter()
        .find(|(_, (unit, _, _))| unit.id == hit.target);
    let Some((_entity, (_unit, kin, record))) = target else {
        return false;
    };

    *record = HitRecord {
        last_hit_at: Some(now),
        knockback_dir: try_direction(hit.knockback_dir).unwrap_or(DVec3::ZERO),
        knockback_power: hit.knockback_power.max(0.0),
        stun_secs: hit.stun_secs.max(0.0),
        hit_freeze_frames: hit.hit_freeze_frames,
    };
    *hit_freeze = (*hit_freeze).max(hit.hit_freeze_frames);

    let distance = listener.map_or(0.0, |at| at.distance(kin.position));
    debug!(
        target = hit.target.0,
        attacker = hit.attacker.0,
        freeze = *hit_freeze,
        "hit applied"
    );
    events.push(SimEvent::HitApplied {
        target: hit.target,
        attacker: hit.attacker,
        distance,
    });
    true
}
