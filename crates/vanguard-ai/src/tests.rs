#[cfg(test)]
mod tests {
    use glam::DVec3;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use vanguard_core::enums::{ActionKind, LockState};

    use crate::fsm::{evaluate, AiContext, AiPhase};
    use crate::profiles::AiProfile;

    fn make_context(phase: AiPhase, distance: f64) -> AiContext {
        AiContext {
            phase,
            elapsed_in_phase_secs: 0.0,
            state: ActionKind::Idle,
            position: DVec3::ZERO,
            target: Some(DVec3::new(0.0, 0.0, distance)),
            lock: if distance < 20.0 {
                LockState::Near
            } else {
                LockState::Far
            },
            boost_ratio: 1.0,
            overheated: false,
            ammo: 6,
            incoming: None,
            strafe_sign: 1.0,
        }
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn test_far_target_approaches_with_dash() {
        let ctx = make_context(AiPhase::Approach, 60.0);
        let decision = evaluate(&ctx, &AiProfile::default(), &mut rng());
        assert_eq!(decision.phase, AiPhase::Approach);
        assert!(!decision.phase_changed);
        assert!(decision.intent.dash, "healthy boost should dash in");
        assert!(decision.intent.movement.y > 0.9, "should move toward +z target");
    }

    #[test]
    fn test_approach_to_strafe_picks_a_side() {
        let ctx = make_context(AiPhase::Approach, 25.0);
        let decision = evaluate(&ctx, &AiProfile::default(), &mut rng());
        assert_eq!(decision.phase, AiPhase::Strafe);
        assert!(decision.phase_changed);
        assert!(decision.strafe_sign == 1.0 || decision.strafe_sign == -1.0);
        assert!(decision.intent.movement.y.abs() < 1e-9, "strafe is perpendicular");
    }

    #[test]
    fn test_strafe_to_engage_when_near() {
        let ctx = make_context(AiPhase::Strafe, 8.0);
        let decision = evaluate(&ctx, &AiProfile::default(), &mut rng());
        assert_eq!(decision.phase, AiPhase::Engage);
        assert!(decision.intent.melee);
    }

    #[test]
    fn test_engage_times_out_back_to_strafe() {
        let mut ctx = make_context(AiPhase::Engage, 8.0);
        ctx.elapsed_in_phase_secs = 5.0;
        let decision = evaluate(&ctx, &AiProfile::default(), &mut rng());
        assert_eq!(decision.phase, AiPhase::Strafe);
    }

    #[test]
    fn test_overheat_forces_recover_without_boost() {
        let mut ctx = make_context(AiPhase::Approach, 60.0);
        ctx.overheated = true;
        ctx.boost_ratio = 0.0;
        let decision = evaluate(&ctx, &AiProfile::default(), &mut rng());
        assert_eq!(decision.phase, AiPhase::Recover);
        assert!(!decision.intent.dash && !decision.intent.ascend && !decision.intent.boost_held);
        assert!(decision.intent.movement.y < 0.0, "recover backs away");
    }

    #[test]
    fn test_recover_ends_after_refill() {
        let ctx = make_context(AiPhase::Recover, 60.0);
        let decision = evaluate(&ctx, &AiProfile::default(), &mut rng());
        assert_eq!(decision.phase, AiPhase::Approach);
    }

    #[test]
    fn test_dodges_close_homing_projectile() {
        let mut ctx = make_context(AiPhase::Strafe, 18.0);
        ctx.incoming = Some(DVec3::new(0.0, 0.0, 4.0));
        let decision = evaluate(&ctx, &AiProfile::default(), &mut rng());
        let evade = decision.intent.evade.expect("should dodge");
        assert!(evade.y.abs() < 1e-9, "dodge is sideways to the threat");
        assert!((evade.length() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_dodge_when_boost_low() {
        let mut ctx = make_context(AiPhase::Strafe, 18.0);
        ctx.incoming = Some(DVec3::new(0.0, 0.0, 4.0));
        ctx.boost_ratio = 0.1;
        let decision = evaluate(&ctx, &AiProfile::default(), &mut rng());
        assert!(decision.intent.evade.is_none());
    }

    #[test]
    fn test_no_target_is_inert() {
        let mut ctx = make_context(AiPhase::Strafe, 10.0);
        ctx.target = None;
        let decision = evaluate(&ctx, &AiProfile::default(), &mut rng());
        assert_eq!(decision.intent.movement.length(), 0.0);
        assert!(!decision.intent.fire && !decision.intent.melee);
    }

    #[test]
    fn test_same_seed_same_decisions() {
        let ctx = make_context(AiPhase::Strafe, 18.0);
        let profile = AiProfile {
            fire_chance: 0.5,
            ..Default::default()
        };
        let mut a = ChaCha8Rng::seed_from_u64(99);
        let mut b = ChaCha8Rng::seed_from_u64(99);
        for _ in 0..50 {
            let da = evaluate(&ctx, &profile, &mut a);
            let db = evaluate(&ctx, &profile, &mut b);
            assert_eq!(da.intent, db.intent);
        }
    }
}
