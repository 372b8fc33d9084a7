#[cfg(test)]
mod tests {
    use glam::{DVec2, DVec3};

    use crate::commands::Intent;
    use crate::enums::*;
    use crate::error::ConfigError;
    use crate::events::SimEvent;
    use crate::state::FrameSnapshot;
    use crate::tuning::Tuning;
    use crate::types::*;

    #[test]
    fn test_default_tuning_is_valid() {
        Tuning::default().validate().unwrap();
    }

    #[test]
    fn test_partial_tuning_json_fills_defaults() {
        let tuning = Tuning::from_json_str(r#"{ "max_boost": 150.0, "red_lock_distance": 25.0 }"#)
            .unwrap();
        assert_eq!(tuning.max_boost, 150.0);
        assert_eq!(tuning.red_lock_distance, 25.0);
        assert_eq!(tuning.bullet_speed, Tuning::default().bullet_speed);
    }

    #[test]
    fn test_invalid_tuning_rejected() {
        let err = Tuning::from_json_str(r#"{ "ground_friction": 1.5 }"#).unwrap_err();
        match err {
            ConfigError::Invalid { field, .. } => assert_eq!(field, "ground_friction"),
            other => panic!("expected Invalid, got {other:?}"),
        }

        let err = Tuning::from_json_str(
            r#"{ "landing_lag_min_frames": 50.0, "landing_lag_max_frames": 10.0 }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "landing_lag_min_frames", .. }));
    }

    #[test]
    fn test_bad_speeds_and_durations_rejected() {
        let cases: [(&str, fn(&mut Tuning)); 12] = [
            ("max_fall_speed", |t| t.max_fall_speed = -1.0),
            ("ascend_speed", |t| t.ascend_speed = -0.4),
            ("evade_speed", |t| t.evade_speed = -2.0),
            ("rainbow_evade_speed", |t| t.rainbow_evade_speed = 0.0),
            ("lunge_speed", |t| t.lunge_speed = 0.0),
            ("knockback_speed", |t| t.knockback_speed = f64::NAN),
            ("melee_range", |t| t.melee_range = 0.0),
            ("evade_frames", |t| t.evade_frames = -3.0),
            ("slash2_frames", |t| t.slash2_frames = f64::INFINITY),
            ("shot_startup_frames", |t| t.shot_startup_frames = 0.0),
            ("aim_cone_degrees", |t| t.aim_cone_degrees = 270.0),
            ("slash1.stun_secs", |t| t.slash1.stun_secs = -0.1),
        ];
        for (name, corrupt) in cases {
            let mut tuning = Tuning::default();
            corrupt(&mut tuning);
            match tuning.validate() {
                Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, name),
                other => panic!("{name}: expected Invalid, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_malformed_tuning_is_parse_error() {
        let err = Tuning::from_json_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_missing_tuning_file_is_io_error() {
        let err = Tuning::load("/nonexistent/vanguard/tuning.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_step_time_scale_normalizes_to_60hz() {
        let step = Step::from_delta(1.0 / 60.0);
        assert!((step.time_scale - 1.0).abs() < 1e-12);
        let step = Step::from_delta(1.0 / 30.0);
        assert!((step.time_scale - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_step_clamps_bad_deltas() {
        assert_eq!(Step::from_delta(-1.0).delta_secs, 0.0);
        assert_eq!(Step::from_delta(f64::NAN).delta_secs, 0.0);
        assert!(Step::from_delta(5.0).delta_secs <= crate::constants::MAX_DELTA_SECS);
    }

    /// Two 120 Hz ticks must decay exactly as much as one 60 Hz tick.
    #[test]
    fn test_decay_is_frame_rate_independent() {
        let base = 0.82;
        let one = Step::from_delta(1.0 / 60.0).decay(base);
        let half = Step::from_delta(1.0 / 120.0).decay(base);
        assert!((one - half * half).abs() < 1e-12);

        let approach_60 = Step::from_delta(1.0 / 60.0).approach(0.1);
        let approach_120 = Step::from_delta(1.0 / 120.0).approach(0.1);
        let remaining_120 = (1.0 - approach_120) * (1.0 - approach_120);
        assert!(((1.0 - approach_60) - remaining_120).abs() < 1e-12);
    }

    #[test]
    fn test_clock_advances_by_delta() {
        let mut clock = SimClock::default();
        let step = Step::from_delta(0.02);
        for _ in 0..50 {
            clock.advance(&step);
        }
        assert_eq!(clock.tick, 50);
        assert!((clock.now_secs - 1.0).abs() < 1e-9);
        assert!((clock.since(0.5) - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_kind_set_membership() {
        let set = KindSet::of(&[ActionKind::Idle, ActionKind::Walk]);
        assert!(set.contains(ActionKind::Idle));
        assert!(set.contains(ActionKind::Walk));
        assert!(!set.contains(ActionKind::Stunned));
        assert!(ActionKind::MeleeSlash2.is_melee());
        assert!(!ActionKind::Dash.is_melee());
    }

    #[test]
    fn test_geometry_helpers() {
        assert_eq!(flatten(DVec3::new(1.0, 5.0, 2.0)), DVec3::new(1.0, 0.0, 2.0));
        assert!(try_direction(DVec3::ZERO).is_none());
        assert_eq!(planar(DVec2::new(1.0, 2.0)), DVec3::new(1.0, 0.0, 2.0));
    }

    /// Snapshots and events are what the presentation layer consumes; they
    /// must survive serialization with tags intact.
    #[test]
    fn test_snapshot_serializes_with_event_tags() {
        let snapshot = FrameSnapshot {
            events: vec![SimEvent::DashStarted { unit: UnitId(1) }],
            ..Default::default()
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        assert!(json.contains(r#""type":"DashStarted""#));
        let back: FrameSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.events, snapshot.events);
    }

    #[test]
    fn test_intent_default_is_inert() {
        let intent = Intent::default();
        assert!(!intent.dash && !intent.fire && !intent.melee && !intent.ascend);
        assert!(intent.evade.is_none());
        assert_eq!(intent.movement, DVec2::ZERO);
    }
}
