//! Target selection and lock-on.
//!
//! Units keep their target until it stops resolving or the pilot cycles.
//! The lock state is recomputed every tick from the current distance.

use glam::DVec3;
use hecs::World;

use vanguard_core::components::{Kinematics, Targeting, Unit};
use vanguard_core::enums::{LockState, Team};
use vanguard_core::lockon::LockOnTracker;
use vanguard_core::types::UnitId;

use crate::controller::IntentSlot;

pub fn run(world: &mut World, tracker: &LockOnTracker) {
    let mut roster: Vec<(UnitId, Team, DVec3)> = world
        .query::<(&Unit, &Kinematics)>()
        .iter()
        .map(|(_, (unit, kin))| (unit.id, unit.team, kin.position))
        .collect();
    roster.sort_by_key(|(id, _, _)| *id);

    for (_entity, (unit, kin, targeting, slot)) in
        world.query_mut::<(&Unit, &Kinematics, &mut Targeting, &IntentSlot)>()
    {
        let opponents: Vec<(UnitId, DVec3)> = roster
            .iter()
            .filter(|(id, team, _)| *id != unit.id && *team != unit.team)
            .map(|(id, _, position)| (*id, *position))
            .collect();

        if slot.0.cycle_target {
            targeting.target = next_target(&opponents, targeting.target);
        }
        let resolved = targeting
            .target
            .and_then(|id| opponents.iter().find(|(other, _)| *other == id));
        if resolved.is_none() {
            targeting.target = nearest(&opponents, kin.position);
        }

        targeting.lock = targeting
            .target
            .and_then(|id| opponents.iter().find(|(other, _)| *other == id))
            .map_or(LockState::Far, |(_, position)| {
                tracker.evaluate(kin.position, *position)
            });
    }
}

/// The opponent after `current` in id order, wrapping around.
pub fn next_target(opponents: &[(UnitId, DVec3)], current: Option<UnitId>) -> Option<UnitId> {
    let first = opponents.first().map(|(id, _)| *id);
    let Some(current) = current else {
        return first;
    };
    opponents
        .iter()
        .map(|(id, _)| *id)
        .find(|id| *id > current)
        .or(first)
}

/// Closest opponent; ties go to the lower id.
pub fn nearest(opponents: &[(UnitId, DVec3)], from: DVec3) -> Option<UnitId> {
    opponents
        .iter()
        .min_by(|a, b| {
            from.distance_squared(a.1)
                .total_cmp(&from.distance_squared(b.1))
                .then(a.0.cmp(&b.0))
        })
        .map(|(id, _)| *id)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn opponents() -> Vec<(UnitId, DVec3)> {
        vec![
            (UnitId(2), DVec3::new(0.0, 0.0, 30.0)),
            (UnitId(5), DVec3::new(0.0, 0.0, 10.0)),
            (UnitId(7), DVec3::new(0.0, 0.0, -50.0)),
        ]
    }

    #[test]
    fn test_cycle_wraps_in_id_order() {
        let list = opponents();
        assert_eq!(next_target(&list, None), Some(UnitId(2)));
        assert_eq!(next_target(&list, Some(UnitId(2))), Some(UnitId(5)));
        assert_eq!(next_target(&list, Some(UnitId(7))), Some(UnitId(2)));
        assert_eq!(next_target(&[], Some(UnitId(7))), None);
    }

    #[test]
    fn test_nearest_opponent() {
        assert_eq!(nearest(&opponents(), DVec3::ZERO), Some(UnitId(5)));
        assert_eq!(nearest(&[], DVec3::ZERO), None);
    }
}
