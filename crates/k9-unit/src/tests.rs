//! Unit tests for k9-unit.

use k9_core::{Clock, K9Config, OfficerId, Pose, Vec3};
use k9_world::{
    AgentMode, CarriedItem, ItemKind, LegalStatus, MemoryWorld, MoveSpeeds,
    PatrolRegistry, SearchCapability, SubjectRegistry,
};

use crate::unit::{UnitController, UnitTick};

// ── Harness ───────────────────────────────────────────────────────────────────

struct Rig {
    world:   MemoryWorld,
    clock:   Clock,
    officer: OfficerId,
    unit:    UnitController,
}

impl Rig {
    fn new() -> Self {
        Self::with_cfg(K9Config::default())
    }

    fn with_cfg(cfg: K9Config) -> Self {
        let mut world = MemoryWorld::new();
        let officer = world.add_officer(Pose::new(Vec3::ZERO, 0.0));
        let unit = UnitController::new(&mut world, officer, cfg);
        Self { world, clock: Clock::new(), officer, unit }
    }

    fn tick(&mut self, dt: f32) -> UnitTick {
        let ctx = self.clock.advance(dt);
        let subjects = self.world.subject_ids();
        self.unit.tick(&mut self.world, ctx, &subjects)
    }

    fn run(&mut self, steps: u32, dt: f32) {
        for _ in 0..steps {
            let _ = self.tick(dt);
        }
    }

    /// One tick long enough to clear the setup delay and run a first
    /// detection scan.
    fn ready(&mut self) {
        let _ = self.tick(0.3);
    }
}

fn at_x(x: f32) -> Vec3 {
    Vec3::new(x, 0.0, 0.0)
}

fn product_stash() -> Vec<CarriedItem> {
    vec![CarriedItem::new(ItemKind::Product, LegalStatus::Legal)]
}

fn illegal_stash() -> Vec<CarriedItem> {
    vec![
        CarriedItem::legal_gear(),
        CarriedItem::new(ItemKind::Gear, LegalStatus::Illegal),
    ]
}

fn legal_kit() -> Vec<CarriedItem> {
    vec![CarriedItem::legal_gear()]
}

// ── Detection ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod detection {
    use super::*;

    #[test]
    fn engages_contraband_in_sniff_range() {
        let mut rig = Rig::new();
        let subject = rig.world.add_subject(at_x(5.0), illegal_stash());
        rig.ready();

        assert_eq!(rig.unit.pursuit_target(), Some(subject));
        assert!(rig.unit.is_tracking());
        assert_eq!(rig.world.officer_destination(rig.officer), Some(at_x(5.0)));
        assert_eq!(rig.world.officer_mode(rig.officer), Some(AgentMode::IgnoreCosts));

        // Both decisions propagate to the tracker.
        assert!(rig.unit.tracker().is_tracking());
        assert_eq!(rig.unit.tracker().pursuit_target(), Some(subject));
    }

    #[test]
    fn legal_cargo_is_ignored() {
        let mut rig = Rig::new();
        rig.world.add_subject(at_x(3.0), legal_kit());
        rig.ready();

        assert_eq!(rig.unit.pursuit_target(), None);
        assert!(!rig.unit.is_tracking());
    }

    #[test]
    fn hidden_inventory_is_ignored() {
        let mut rig = Rig::new();
        let subject = rig.world.add_subject(at_x(3.0), product_stash());
        rig.world.set_inventory_visible(subject, false);
        rig.ready();

        assert_eq!(rig.unit.pursuit_target(), None);
    }

    #[test]
    fn exact_sniff_radius_is_out_of_range() {
        let mut rig = Rig::new();
        let subject = rig.world.add_subject(at_x(10.0), product_stash());
        rig.ready();
        assert_eq!(rig.unit.pursuit_target(), None);

        rig.world.set_subject_position(subject, at_x(9.9));
        let _ = rig.tick(0.2);
        assert_eq!(rig.unit.pursuit_target(), Some(subject));
    }

    #[test]
    fn nearest_candidate_wins() {
        let mut rig = Rig::new();
        let _far = rig.world.add_subject(at_x(6.0), product_stash());
        let near = rig.world.add_subject(at_x(2.0), product_stash());
        rig.ready();

        assert_eq!(rig.unit.pursuit_target(), Some(near));
    }

    #[test]
    fn pending_search_blocks_engagement() {
        let mut rig = Rig::new();
        let subject = rig.world.add_subject(at_x(5.0), product_stash());
        rig.world.set_search_pending(subject, true);
        rig.ready();

        // The nose is on, but no pursuit starts.
        assert!(rig.unit.is_tracking());
        assert_eq!(rig.unit.pursuit_target(), None);
    }

    #[test]
    fn detection_waits_for_setup() {
        let mut rig = Rig::new();
        let subject = rig.world.add_subject(at_x(2.0), product_stash());

        let _ = rig.tick(0.1);
        assert!(!rig.unit.is_ready());
        assert_eq!(rig.unit.pursuit_target(), None);

        let _ = rig.tick(0.2);
        assert!(rig.unit.is_ready());
        assert_eq!(rig.unit.pursuit_target(), Some(subject));
    }
}

// ── Speed boost ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod boost {
    use super::*;

    #[test]
    fn applied_once_restored_once() {
        let mut rig = Rig::new();
        rig.ready();
        let base = rig.world.movement_speeds(rig.officer).unwrap();

        rig.unit.set_tracking(&mut rig.world, true);
        rig.unit.set_tracking(&mut rig.world, true);
        assert_eq!(
            rig.world.movement_speeds(rig.officer).unwrap(),
            MoveSpeeds::new(base.walk * 1.25, base.run * 1.25)
        );

        rig.unit.set_tracking(&mut rig.world, false);
        assert_eq!(rig.world.movement_speeds(rig.officer).unwrap(), base);
        rig.unit.set_tracking(&mut rig.world, false);
        assert_eq!(rig.world.movement_speeds(rig.officer).unwrap(), base);
    }

    #[test]
    fn multiplier_is_floored_at_one() {
        let cfg = K9Config { pursuit_speed_multiplier: 0.5, ..K9Config::default() };
        let mut rig = Rig::with_cfg(cfg);
        rig.ready();
        let base = rig.world.movement_speeds(rig.officer).unwrap();

        rig.unit.set_tracking(&mut rig.world, true);
        assert_eq!(rig.world.movement_speeds(rig.officer).unwrap(), base);
    }
}

// ── Pursuit ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod pursuit {
    use super::*;

    #[test]
    fn destination_follows_the_live_target() {
        let mut rig = Rig::new();
        let subject = rig.world.add_subject(at_x(5.0), product_stash());
        rig.ready();

        let moved = Vec3::new(7.0, 0.0, 1.0);
        rig.world.set_subject_position(subject, moved);
        let _ = rig.tick(0.05);
        assert_eq!(rig.world.officer_destination(rig.officer), Some(moved));
    }

    #[test]
    fn escape_beyond_sniff_radius_resets() {
        let mut rig = Rig::new();
        let subject = rig.world.add_subject(at_x(9.0), product_stash());
        rig.ready();
        assert!(rig.unit.is_tracking());
        let base = MoveSpeeds::new(2.0, 5.0);

        rig.world.set_subject_position(subject, at_x(50.0));
        let _ = rig.tick(0.05);

        assert_eq!(rig.unit.pursuit_target(), None);
        assert!(!rig.unit.is_tracking());
        assert_eq!(rig.world.officer_mode(rig.officer), Some(AgentMode::Normal));
        assert_eq!(rig.world.movement_speeds(rig.officer).unwrap(), base);
    }

    #[test]
    fn vanished_target_resets() {
        let mut rig = Rig::new();
        let subject = rig.world.add_subject(at_x(5.0), product_stash());
        rig.ready();

        rig.world.remove_subject(subject);
        let _ = rig.tick(0.05);
        assert_eq!(rig.unit.pursuit_target(), None);
        assert!(!rig.unit.is_tracking());
    }

    #[test]
    fn someone_elses_search_resets() {
        let mut rig = Rig::new();
        let subject = rig.world.add_subject(at_x(7.0), product_stash());
        rig.ready();
        assert_eq!(rig.unit.pursuit_target(), Some(subject));

        rig.world.set_search_pending(subject, true);
        let _ = rig.tick(0.05);
        assert_eq!(rig.unit.pursuit_target(), None);
        assert!(rig.world.searches().is_empty());
    }

    #[test]
    fn search_begins_exactly_once() {
        let mut rig = Rig::new();
        let subject = rig.world.add_subject(at_x(4.0), product_stash());
        rig.ready();
        let _ = rig.tick(0.1);
        assert_eq!(rig.world.searches(), &[(rig.officer, subject)]);

        // Active search: no re-invocation, pursuit held.
        rig.run(20, 0.1);
        assert_eq!(rig.world.searches().len(), 1);
        assert_eq!(rig.unit.pursuit_target(), Some(subject));
    }

    #[test]
    fn search_radius_boundary_is_inclusive() {
        let mut rig = Rig::new();
        rig.world.add_subject(at_x(6.0), product_stash());
        rig.ready();
        let _ = rig.tick(0.1);
        assert_eq!(rig.world.searches().len(), 1);
    }

    #[test]
    fn completion_records_cooldown_and_blocks_reengagement() {
        let mut rig = Rig::new();
        let subject = rig.world.add_subject(at_x(4.0), product_stash());
        rig.ready();
        let _ = rig.tick(0.1); // search begins
        let _ = rig.tick(0.1); // active observed

        rig.world.finish_search(rig.officer);
        let _ = rig.tick(0.1);
        assert_eq!(rig.unit.pursuit_target(), None);
        assert!(!rig.unit.is_tracking());

        // Still in range and still carrying for the next 5 s: the nose
        // stays on but no pursuit or search recurs.
        rig.run(50, 0.1);
        assert!(rig.unit.is_tracking());
        assert_eq!(rig.unit.pursuit_target(), None);
        assert_eq!(rig.world.searches().len(), 1);

        // Cooldown expiry re-opens the subject.
        rig.run(310, 0.1);
        assert_eq!(rig.world.searches().len(), 2);
    }

    #[test]
    fn blocked_cooldown_at_point_blank_abandons_silently() {
        let mut rig = Rig::new();
        let subject = rig.world.add_subject(at_x(7.0), product_stash());
        rig.ready();
        assert_eq!(rig.unit.pursuit_target(), Some(subject));

        // A search completed moments ago; the gate blocks at close range.
        rig.unit.record_search(subject, rig.clock.now());
        rig.world.set_subject_position(subject, at_x(4.0));
        let _ = rig.tick(0.1);

        assert_eq!(rig.unit.pursuit_target(), None);
        assert!(!rig.unit.is_tracking());
        assert!(rig.world.searches().is_empty());
    }

    #[test]
    fn foreign_active_search_defers_ours() {
        let mut rig = Rig::new();
        let subject = rig.world.add_subject(at_x(4.0), product_stash());
        rig.world.begin_search(rig.officer, subject);
        rig.ready();

        rig.run(10, 0.1);
        // Only the pre-existing search; the pursuit holds its distance.
        assert_eq!(rig.world.searches().len(), 1);
        assert_eq!(rig.unit.pursuit_target(), Some(subject));
    }
}

// ── Lifecycle ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod lifecycle {
    use super::*;

    #[test]
    fn despawns_when_the_officer_is_gone() {
        let mut rig = Rig::new();
        rig.ready();
        assert_eq!(rig.tick(0.1), UnitTick::Alive);

        rig.world.remove_officer(rig.officer);
        assert_eq!(rig.tick(0.1), UnitTick::Despawn);

        rig.unit.teardown(&mut rig.world);
        assert_eq!(rig.world.agent_count(), 0);
    }

    #[test]
    fn despawns_inside_a_station() {
        let mut rig = Rig::new();
        let station = rig.world.add_station(at_x(40.0));
        rig.ready();

        rig.world.station_admit(station, rig.officer);
        assert_eq!(rig.tick(0.1), UnitTick::Despawn);
    }

    #[test]
    fn teardown_restores_the_boost() {
        let mut rig = Rig::new();
        rig.world.add_subject(at_x(5.0), product_stash());
        rig.ready();
        assert!(rig.unit.is_tracking());

        rig.unit.teardown(&mut rig.world);
        assert_eq!(
            rig.world.movement_speeds(rig.officer).unwrap(),
            MoveSpeeds::new(2.0, 5.0)
        );
        assert_eq!(rig.world.agent_count(), 0);
    }
}
