//! Unit tests for k9-core primitives.

#[cfg(test)]
mod ids {
    use crate::{OfficerId, StationId, SubjectId};

    #[test]
    fn index_roundtrip() {
        let id = OfficerId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(OfficerId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(OfficerId::INVALID.0, u32::MAX);
        assert_eq!(SubjectId::INVALID.0, u32::MAX);
        assert_eq!(StationId::INVALID.0, u32::MAX);
        assert_eq!(SubjectId::default(), SubjectId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(SubjectId(7).to_string(), "SubjectId(7)");
    }
}

#[cfg(test)]
mod math {
    use crate::math::{delta_angle, remap, smooth_damp_angle};
    use crate::{Pose, Vec3};

    #[test]
    fn distance_sqr_matches_distance() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 6.0, 3.0);
        assert_eq!(a.distance_sqr(b), 25.0);
        assert!((a.distance(b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn remap_two_segments() {
        // The tracker's walk/run blend: 0→1.664 maps to 0→0.3.
        assert_eq!(remap(0.0, 0.0, 1.664, 0.0, 0.3), 0.0);
        assert!((remap(1.664, 0.0, 1.664, 0.0, 0.3) - 0.3).abs() < 1e-6);
        assert!((remap(0.832, 0.0, 1.664, 0.0, 0.3) - 0.15).abs() < 1e-6);
        // Second segment: 1.664→4.352 maps to 0.3→1, clamped above.
        assert!((remap(4.352, 1.664, 4.352, 0.3, 1.0) - 1.0).abs() < 1e-6);
        assert!((remap(9.9, 1.664, 4.352, 0.3, 1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn remap_degenerate_range() {
        assert_eq!(remap(5.0, 2.0, 2.0, 0.0, 1.0), 0.0);
    }

    #[test]
    fn delta_angle_wraps() {
        assert!((delta_angle(350.0, 10.0) - 20.0).abs() < 1e-4);
        assert!((delta_angle(10.0, 350.0) + 20.0).abs() < 1e-4);
        assert_eq!(delta_angle(90.0, 90.0), 0.0);
    }

    #[test]
    fn smooth_damp_angle_converges() {
        let mut yaw = 0.0_f32;
        let mut vel = 0.0_f32;
        for _ in 0..200 {
            yaw = smooth_damp_angle(yaw, 90.0, &mut vel, 0.15, 540.0, 1.0 / 60.0);
        }
        assert!((yaw - 90.0).abs() < 0.5, "got {yaw}");
        assert!(vel.abs() < 1.0);
    }

    #[test]
    fn smooth_damp_angle_no_overshoot() {
        let mut vel = 0.0_f32;
        let mut yaw = 0.0_f32;
        for _ in 0..1000 {
            yaw = smooth_damp_angle(yaw, 10.0, &mut vel, 0.15, 540.0, 1.0 / 30.0);
            assert!(yaw <= 10.0 + 1e-3, "overshot to {yaw}");
        }
    }

    #[test]
    fn pose_local_offset_facing_north() {
        // Yaw 0 faces +Z; right is +X.  Offset (0.9 right, 0.6 back).
        let pose = Pose::new(Vec3::ZERO, 0.0);
        let heel = pose.local_offset(Vec3::new(0.9, 0.0, -0.6));
        assert!((heel.x - 0.9).abs() < 1e-5);
        assert!((heel.z + 0.6).abs() < 1e-5);
    }

    #[test]
    fn pose_local_offset_rotates_with_yaw() {
        // Facing +X (yaw 90°): right becomes -Z.
        let pose = Pose::new(Vec3::ZERO, 90.0);
        let p = pose.local_offset(Vec3::new(1.0, 0.0, 0.0));
        assert!(p.x.abs() < 1e-5, "got {p}");
        assert!((p.z + 1.0).abs() < 1e-5, "got {p}");
    }
}

#[cfg(test)]
mod time {
    use crate::{Clock, IntervalTimer, RepeatingTask};

    #[test]
    fn clock_accumulates() {
        let mut clock = Clock::new();
        let ctx = clock.advance(0.5);
        assert_eq!(ctx.dt, 0.5);
        assert!((ctx.now - 0.5).abs() < 1e-9);
        clock.advance(0.25);
        assert!((clock.now() - 0.75).abs() < 1e-9);
    }

    #[test]
    fn interval_timer_fires_and_resets() {
        let mut t = IntervalTimer::new(0.2);
        assert!(!t.tick(0.1));
        assert!(t.tick(0.1));
        // Reset to zero: needs a full interval again.
        assert!(!t.tick(0.19));
        assert!(t.tick(0.01));
    }

    #[test]
    fn interval_timer_long_frame_fires_once() {
        let mut t = IntervalTimer::new(0.2);
        assert!(t.tick(5.0));
        assert!(!t.tick(0.1));
    }

    #[test]
    fn repeating_task_honours_start_delay() {
        let mut task = RepeatingTask::new(1.0, 0.1);
        assert_eq!(task.poll(0.5), 0);
        assert_eq!(task.poll(0.4), 0);
        // Crosses the 1.0 s delay: exactly one fire.
        assert_eq!(task.poll(0.1), 1);
        assert_eq!(task.poll(0.1), 1);
    }

    #[test]
    fn repeating_task_catches_up_on_long_frame() {
        let mut task = RepeatingTask::new(0.0, 0.1);
        // First poll fires the delayed start plus three full intervals.
        assert_eq!(task.poll(0.35), 4);
    }

    #[test]
    fn repeating_task_cancel_is_permanent() {
        let mut task = RepeatingTask::new(0.0, 0.1);
        assert!(task.poll(0.1) > 0);
        task.cancel();
        assert_eq!(task.poll(10.0), 0);
        assert!(task.is_cancelled());
    }
}

#[cfg(test)]
mod config {
    use crate::K9Config;

    #[test]
    fn defaults_match_documented_values() {
        let cfg = K9Config::default();
        assert_eq!(cfg.unit_count, 2);
        assert_eq!(cfg.sniff_radius, 10.0);
        assert_eq!(cfg.search_radius, 6.0);
        assert_eq!(cfg.recheck_interval, 0.2);
        assert_eq!(cfg.search_cooldown, 30.0);
        assert_eq!(cfg.pursuit_speed_multiplier, 1.25);
        assert!(!cfg.debug_logging);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn search_radius_must_not_exceed_sniff_radius() {
        let cfg = K9Config { search_radius: 11.0, ..K9Config::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn rejects_non_positive_intervals() {
        let cfg = K9Config { recheck_interval: 0.0, ..K9Config::default() };
        assert!(cfg.validate().is_err());
        let cfg = K9Config { search_cooldown: -1.0, ..K9Config::default() };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn pursuit_multiplier_floors_at_one() {
        let cfg = K9Config { pursuit_speed_multiplier: 0.5, ..K9Config::default() };
        assert_eq!(cfg.pursuit_multiplier(), 1.0);
    }
}

#[cfg(test)]
mod rng {
    use crate::PatrolRng;

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = PatrolRng::new(12345);
        let mut r2 = PatrolRng::new(12345);
        for _ in 0..100 {
            let a: u32 = r1.gen_range(0..1000);
            let b: u32 = r2.gen_range(0..1000);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn choose_empty_is_none() {
        let mut rng = PatrolRng::new(0);
        let empty: [u32; 0] = [];
        assert!(rng.choose(&empty).is_none());
        assert!(rng.choose(&[7]).is_some());
    }
}
