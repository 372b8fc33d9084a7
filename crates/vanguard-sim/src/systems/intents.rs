//! Player intent system: turns each tracker's buffered input into this
//! tick's intent.

use hecs::World;

use vanguard_core::tuning::Tuning;

use crate::controller::{InputTracker, IntentSlot};

pub fn run(world: &mut World, now: f64, tuning: &Tuning) {
    for (_entity, (tracker, slot)) in world.query_mut::<(&mut InputTracker, &mut IntentSlot)>() {
        slot.0 = tracker.intent(now, tuning);
    }
}
