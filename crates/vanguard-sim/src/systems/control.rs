//! Action controller system: steps every unit's state machine and physics.

use hecs::World;

use vanguard_core::components::{HitRecord, Kinematics, Targeting, Unit};
use vanguard_core::ledger::ResourceLedger;
use vanguard_core::tuning::Tuning;
use vanguard_core::types::Step;

use crate::controller::{self, Action, Body, Contact, Env, InputTracker, IntentSlot, Requests};

/// Step all units against a snapshot of where everyone stood at the start
/// of the pass. Returns the shots, hits and tracking cuts they requested.
pub fn run(world: &mut World, tuning: &Tuning, step: Step, now: f64) -> Requests {
    let mut contacts: Vec<Contact> = world
        .query::<(&Unit, &Kinematics)>()
        .iter()
        .map(|(_, (unit, kin))| Contact {
            id: unit.id,
            team: unit.team,
            position: kin.position,
        })
        .collect();
    contacts.sort_by_key(|c| c.id);

    let mut out = Requests::default();
    for (_entity, (unit, kin, action, ledger, hit, targeting, slot, tracker)) in world
        .query_mut::<(
            &Unit,
            &mut Kinematics,
            &mut Action,
            &mut ResourceLedger,
            &HitRecord,
            &Targeting,
            &IntentSlot,
            Option<&mut InputTracker>,
        )>()
    {
        let target = targeting
            .target
            .and_then(|id| contacts.iter().find(|c| c.id == id).copied());
        let env = Env {
            tuning,
            step,
            now,
            target,
            contacts: &contacts,
        };
        let mut body = Body {
            unit,
            kin,
            action,
            ledger,
            hit,
            lock: targeting.lock,
        };
        let consumed = controller::step(&mut body, &env, &slot.0, &mut out);
        if let Some(tracker) = tracker {
            tracker.acknowledge(consumed);
        }
    }
    out
}
