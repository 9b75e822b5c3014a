//! The unit controller.
//!
//! # Tick structure
//!
//! `tick` runs every frame and layers three rate groups:
//!
//! 1. lifecycle — the 0.25 s setup delay, then a validity gate that
//!    requests despawn when the officer is gone or inside a station;
//! 2. detection — throttled to the configured recheck interval, only
//!    while no pursuit is active;
//! 3. pursuit maintenance — every frame while a target is set, since it
//!    is only a distance check plus an idempotent navigation re-issue.
//!
//! The tracker is ticked from here as well so a unit is a single
//! self-contained entity from the fleet's point of view.
//!
//! # Search listening
//!
//! The search capability has no completion callback; the unit polls the
//! officer's search-active flag while listening and treats the observed
//! Active → Inactive transition as completion.  The flag may still be
//! clear on the first polls after `begin_search` (host-side queueing), so
//! completion requires having seen the flag high first.

use rustc_hash::FxHashMap;
use tracing::{debug, info, warn};

use k9_core::{IntervalTimer, K9Config, OfficerId, SubjectId, TickCtx, Vec3};
use k9_tracker::{TrackerTuning, TrackingAgent};
use k9_world::capability::in_exclusion_zone;
use k9_world::{AgentMode, MoveSpeeds, World};

use crate::detect::{has_contraband, nearest_in_radius};

/// Seconds between construction and the unit wiring itself up.
const SETUP_DELAY: f32 = 0.25;

/// What the fleet should do with the unit after a tick.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[must_use]
pub enum UnitTick {
    Alive,
    /// The officer is gone or inside a station; the fleet must tear the
    /// unit down and drop it.
    Despawn,
}

// ── UnitController ────────────────────────────────────────────────────────────

/// One patrol officer assigned to K9 duty, with its tracking agent.
#[derive(Debug)]
pub struct UnitController {
    officer: OfficerId,
    tracker: TrackingAgent,
    cfg:     K9Config,

    ready:     bool,
    setup_acc: f32,

    detect_timer:   IntervalTimer,
    pursuit_target: Option<SubjectId>,
    tracking:       bool,
    /// Original speeds, present exactly while the boost is applied.
    saved_speeds:   Option<MoveSpeeds>,

    /// Waiting for the search we started to finish.
    listening:   bool,
    /// The active flag has been observed high since `begin_search`.
    seen_active: bool,

    last_search_at: FxHashMap<SubjectId, f64>,
}

impl UnitController {
    /// Bind `officer` and spawn its tracking agent.  The unit reports
    /// ready after the setup delay has elapsed.
    pub fn new<W: World>(world: &mut W, officer: OfficerId, cfg: K9Config) -> Self {
        let tuning = TrackerTuning {
            debug_logging: cfg.debug_logging,
            ..TrackerTuning::default()
        };
        let tracker = TrackingAgent::spawn(world, officer, tuning);
        info!(%officer, "unit assigned");

        Self {
            officer,
            tracker,
            detect_timer: IntervalTimer::new(cfg.recheck_interval),
            cfg,
            ready: false,
            setup_acc: 0.0,
            pursuit_target: None,
            tracking: false,
            saved_speeds: None,
            listening: false,
            seen_active: false,
            last_search_at: FxHashMap::default(),
        }
    }

    // ── Observers ─────────────────────────────────────────────────────────────

    pub fn officer(&self) -> OfficerId {
        self.officer
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn pursuit_target(&self) -> Option<SubjectId> {
        self.pursuit_target
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub fn tracker(&self) -> &TrackingAgent {
        &self.tracker
    }

    // ── Frame tick ────────────────────────────────────────────────────────────

    /// Advance the unit by one frame against the fleet's subject snapshot.
    pub fn tick<W: World>(&mut self, world: &mut W, ctx: TickCtx, subjects: &[SubjectId]) -> UnitTick {
        if !self.ready {
            self.setup_acc += ctx.dt;
            if self.setup_acc >= SETUP_DELAY {
                self.tracker.bind_officer(self.officer);
                self.ready = true;
            }
        }

        if !world.officer_exists(self.officer) || in_exclusion_zone(world, self.officer) {
            return UnitTick::Despawn;
        }

        self.tracker.frame(world, ctx);
        self.tracker.tick(world, ctx);

        if self.pursuit_target.is_some() {
            self.maintain_pursuit(world, ctx);
        } else if self.ready && self.detect_timer.tick(ctx.dt) {
            self.detect(world, ctx, subjects);
        }

        UnitTick::Alive
    }

    // ── Detection ─────────────────────────────────────────────────────────────

    fn detect<W: World>(&mut self, world: &mut W, ctx: TickCtx, subjects: &[SubjectId]) {
        let Some(pose) = world.officer_pose(self.officer) else {
            return;
        };

        let candidate =
            nearest_in_radius(world, subjects, pose.position, self.cfg.sniff_radius);
        let Some(candidate) = candidate else {
            self.set_tracking(world, false);
            return;
        };
        if !has_contraband(world, candidate) {
            self.set_tracking(world, false);
            return;
        }

        // The nose is onto something even when a pursuit can't start.
        self.set_tracking(world, true);

        if !self.cooldown_elapsed(candidate, ctx.now) {
            return;
        }
        if world.search_pending(candidate) {
            return;
        }

        self.pursuit_target = Some(candidate);
        self.tracker.set_pursuit_target(Some(candidate));
        self.command_pursuit(world, candidate);
        info!(officer = %self.officer, subject = %candidate, "pursuit engaged");
    }

    // ── Pursuit ───────────────────────────────────────────────────────────────

    fn maintain_pursuit<W: World>(&mut self, world: &mut W, ctx: TickCtx) {
        let Some(target) = self.pursuit_target else {
            return;
        };

        let Some(target_pos) = world.subject_position(target) else {
            self.reset_pursuit(world);
            return;
        };
        // A pending search we did not start means someone else got there.
        if world.search_pending(target) && !self.listening {
            self.reset_pursuit(world);
            return;
        }
        let Some(pose) = world.officer_pose(self.officer) else {
            return;
        };

        let d2 = pose.position.distance_sqr(target_pos);
        if d2 > self.cfg.sniff_radius_sqr() {
            if self.cfg.debug_logging {
                debug!(officer = %self.officer, subject = %target, "target escaped");
            }
            self.reset_pursuit(world);
            return;
        }

        if self.listening {
            self.poll_search(world, target, ctx);
            if self.pursuit_target.is_none() {
                return;
            }
        }

        // Idempotent for an unchanged destination; the host no-ops.
        self.command_pursuit(world, target);

        if d2 <= self.cfg.search_radius_sqr() && !self.listening && !world.search_active(self.officer) {
            if self.cooldown_elapsed(target, ctx.now) {
                world.begin_search(self.officer, target);
                self.listening = true;
                self.seen_active = false;
                info!(officer = %self.officer, subject = %target, "search started");
            } else {
                // Point-blank but cooled down: walk away rather than idle
                // next to the subject until the cooldown expires.
                self.reset_pursuit(world);
            }
        }
    }

    fn poll_search<W: World>(&mut self, world: &mut W, target: SubjectId, ctx: TickCtx) {
        let active = world.search_active(self.officer);
        if active {
            self.seen_active = true;
            return;
        }
        if self.seen_active {
            self.last_search_at.insert(target, ctx.now);
            self.listening = false;
            self.seen_active = false;
            if self.cfg.debug_logging {
                debug!(officer = %self.officer, subject = %target, "search completed");
            }
            self.reset_pursuit(world);
        }
        // Not yet seen active: the host is still queueing the search.
    }

    fn command_pursuit<W: World>(&mut self, world: &mut W, target: SubjectId) {
        let Some(target_pos) = world.subject_position(target) else {
            return;
        };
        if !world.can_move(self.officer) {
            warn!(officer = %self.officer, "movement capability unavailable, skipping pursuit command");
            return;
        }
        let goal: Vec3 = world
            .closest_reachable_point(self.officer, target_pos)
            .unwrap_or(target_pos);
        world.set_agent_mode(self.officer, AgentMode::IgnoreCosts);
        world.set_destination(self.officer, goal);
    }

    fn reset_pursuit<W: World>(&mut self, world: &mut W) {
        self.listening = false;
        self.seen_active = false;
        self.pursuit_target = None;
        self.tracker.set_pursuit_target(None);
        world.set_agent_mode(self.officer, AgentMode::Normal);
        self.set_tracking(world, false);
    }

    fn cooldown_elapsed(&self, subject: SubjectId, now: f64) -> bool {
        match self.last_search_at.get(&subject) {
            Some(&at) => now - at >= self.cfg.search_cooldown as f64,
            None => true,
        }
    }

    // ── Tracking toggle ───────────────────────────────────────────────────────

    /// Flip tracking mode.  The speed boost is applied at most once per
    /// entry and restored exactly once per exit; repeated calls with the
    /// same value are no-ops.
    pub fn set_tracking<W: World>(&mut self, world: &mut W, on: bool) {
        self.tracking = on;
        self.tracker.set_tracking(on);

        if on {
            if self.saved_speeds.is_none() {
                match world.movement_speeds(self.officer) {
                    Some(original) => {
                        world.set_movement_speeds(
                            self.officer,
                            original.scaled(self.cfg.pursuit_multiplier()),
                        );
                        self.saved_speeds = Some(original);
                    }
                    None => {
                        warn!(officer = %self.officer, "speed capability unavailable, no pursuit boost");
                    }
                }
            }
        } else if let Some(original) = self.saved_speeds.take() {
            world.set_movement_speeds(self.officer, original);
        }
    }

    /// Backdate a completed search, for exercising cooldown edges.
    #[cfg(test)]
    pub(crate) fn record_search(&mut self, subject: SubjectId, at: f64) {
        self.last_search_at.insert(subject, at);
    }

    // ── Teardown ──────────────────────────────────────────────────────────────

    /// Release everything the unit owns.  Called by the fleet after a
    /// `Despawn` tick result or a prune.
    pub fn teardown<W: World>(&mut self, world: &mut W) {
        self.listening = false;
        self.seen_active = false;
        self.pursuit_target = None;
        if let Some(original) = self.saved_speeds.take() {
            if world.officer_exists(self.officer) {
                world.set_movement_speeds(self.officer, original);
            }
        }
        self.tracker.teardown(world);
        info!(officer = %self.officer, "unit released");
    }
}
