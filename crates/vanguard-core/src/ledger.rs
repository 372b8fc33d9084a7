//! Per-unit boost energy and ammunition pool.
//!
//! Every operation is boolean-gated: a rejected request leaves the ledger
//! untouched. Boost stays in `[0, max_boost]`, ammo in `[0, max_ammo]`.

use serde::{Deserialize, Serialize};

use crate::tuning::Tuning;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceLedger {
    boost: f64,
    max_boost: f64,
    ammo: u32,
    max_ammo: u32,
    /// Set when boost hits exactly zero; cleared only by [`Self::refill_boost`].
    overheated: bool,
    /// Seconds accumulated toward the next ammo round.
    ammo_timer_secs: f64,
}

impl ResourceLedger {
    /// A full ledger.
    pub fn new(max_boost: f64, max_ammo: u32) -> Self {
        let max_boost = max_boost.max(0.0);
        Self {
            boost: max_boost,
            max_boost,
            ammo: max_ammo,
            max_ammo,
            overheated: false,
            ammo_timer_secs: 0.0,
        }
    }

    pub fn from_tuning(tuning: &Tuning) -> Self {
        Self::new(tuning.max_boost, tuning.max_ammo)
    }

    pub fn boost(&self) -> f64 {
        self.boost
    }

    pub fn max_boost(&self) -> f64 {
        self.max_boost
    }

    pub fn ammo(&self) -> u32 {
        self.ammo
    }

    pub fn max_ammo(&self) -> u32 {
        self.max_ammo
    }

    pub fn is_overheated(&self) -> bool {
        self.overheated
    }

    /// Boost as a fraction of the maximum.
    pub fn boost_ratio(&self) -> f64 {
        if self.max_boost > 0.0 {
            self.boost / self.max_boost
        } else {
            0.0
        }
    }

    /// Draw `amount` of boost.
    ///
    /// Rejected while overheated or empty. Otherwise subtracts (stopping at
    /// zero) and overheats iff the result is exactly zero.
    pub fn consume_boost(&mut self, amount: f64) -> bool {
        if self.overheated || self.boost <= 0.0 {
            return false;
        }
        let amount = if amount.is_finite() { amount.max(0.0) } else { 0.0 };
        self.boost = (self.boost - amount).max(0.0);
        self.overheated = self.boost == 0.0;
        true
    }

    /// Pay an up-front action cost. Requires strictly more boost than `cost`.
    pub fn spend_boost(&mut self, cost: f64) -> bool {
        if self.overheated || self.boost <= cost {
            return false;
        }
        self.consume_boost(cost)
    }

    /// Restore full boost and clear overheat (landing recovery complete).
    pub fn refill_boost(&mut self) {
        self.boost = self.max_boost;
        self.overheated = false;
    }

    /// Spend one round.
    pub fn consume_ammo(&mut self) -> bool {
        if self.ammo == 0 {
            return false;
        }
        self.ammo -= 1;
        true
    }

    /// Restore one round if below the maximum.
    pub fn recover_ammo(&mut self) {
        if self.ammo < self.max_ammo {
            self.ammo += 1;
        }
    }

    /// Accumulate recovery time; grants one round per elapsed `interval_secs`.
    pub fn tick_ammo_recovery(&mut self, delta_secs: f64, interval_secs: f64) {
        if self.ammo >= self.max_ammo || interval_secs <= 0.0 {
            self.ammo_timer_secs = 0.0;
            return;
        }
        self.ammo_timer_secs += delta_secs.max(0.0);
        while self.ammo_timer_secs >= interval_secs && self.ammo < self.max_ammo {
            self.ammo_timer_secs -= interval_secs;
            self.recover_ammo();
        }
        if self.ammo >= self.max_ammo {
            self.ammo_timer_secs = 0.0;
        }
    }

    /// Force a boost level (clamped); used by scenario setup and tests.
    pub fn set_boost(&mut self, boost: f64) {
        self.boost = boost.clamp(0.0, self.max_boost);
        self.overheated = self.boost == 0.0;
    }

    /// Force an ammo count (clamped).
    pub fn set_ammo(&mut self, ammo: u32) {
        self.ammo = ammo.min(self.max_ammo);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_consume_to_zero_overheats() {
        let mut ledger = ResourceLedger::new(100.0, 3);
        assert!(ledger.consume_boost(60.0));
        assert!(!ledger.is_overheated());
        assert!(ledger.consume_boost(60.0));
        assert_eq!(ledger.boost(), 0.0);
        assert!(ledger.is_overheated());
        assert!(!ledger.consume_boost(1.0), "overheated ledger rejects draws");
    }

    #[test]
    fn test_spend_requires_more_than_cost() {
        let mut ledger = ResourceLedger::new(100.0, 3);
        ledger.set_boost(5.0);
        assert!(!ledger.spend_boost(10.0));
        assert_eq!(ledger.boost(), 5.0, "rejected spend must not mutate");

        ledger.set_boost(10.0);
        assert!(!ledger.spend_boost(10.0));
        assert!(ledger.spend_boost(9.0));
        assert!((ledger.boost() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_refill_clears_overheat() {
        let mut ledger = ResourceLedger::new(50.0, 3);
        ledger.consume_boost(50.0);
        assert!(ledger.is_overheated());
        ledger.refill_boost();
        assert_eq!(ledger.boost(), 50.0);
        assert!(!ledger.is_overheated());
    }

    #[test]
    fn test_ammo_consume_and_recover() {
        let mut ledger = ResourceLedger::new(100.0, 2);
        assert!(ledger.consume_ammo());
        assert!(ledger.consume_ammo());
        assert!(!ledger.consume_ammo());
        assert_eq!(ledger.ammo(), 0);

        ledger.tick_ammo_recovery(1.0, 2.5);
        assert_eq!(ledger.ammo(), 0);
        ledger.tick_ammo_recovery(1.6, 2.5);
        assert_eq!(ledger.ammo(), 1);
        ledger.tick_ammo_recovery(10.0, 2.5);
        assert_eq!(ledger.ammo(), 2, "recovery stops at max");
        ledger.recover_ammo();
        assert_eq!(ledger.ammo(), 2);
    }

    #[derive(Debug, Clone)]
    enum Op {
        Consume(f64),
        Spend(f64),
        Refill,
        Fire,
        Recover(f64),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (0.0f64..40.0).prop_map(Op::Consume),
            (0.0f64..40.0).prop_map(Op::Spend),
            Just(Op::Refill),
            Just(Op::Fire),
            (0.0f64..3.0).prop_map(Op::Recover),
        ]
    }

    proptest! {
        #[test]
        fn prop_ledger_stays_in_bounds(ops in prop::collection::vec(op(), 0..200)) {
            let mut ledger = ResourceLedger::new(100.0, 6);
            let mut hit_zero_since_refill = false;
            for op in ops {
                match op {
                    Op::Consume(a) => { ledger.consume_boost(a); }
                    Op::Spend(a) => { ledger.spend_boost(a); }
                    Op::Refill => { ledger.refill_boost(); hit_zero_since_refill = false; }
                    Op::Fire => { ledger.consume_ammo(); }
                    Op::Recover(dt) => ledger.tick_ammo_recovery(dt, 2.5),
                }
                if ledger.boost() == 0.0 {
                    hit_zero_since_refill = true;
                }
                prop_assert!(ledger.boost() >= 0.0 && ledger.boost() <= ledger.max_boost());
                prop_assert!(ledger.ammo() <= ledger.max_ammo());
                prop_assert_eq!(ledger.is_overheated(), hit_zero_since_refill);
            }
        }
    }
}
