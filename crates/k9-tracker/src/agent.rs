//! The tracking agent.
//!
//! # Lifecycle
//!
//! A unit spawns its agent next to the officer, re-binds it once the unit
//! finishes setup, and tears it down when the unit despawns.  Between those
//! points the agent runs a per-frame visual pass ([`frame`]) on every
//! process and a fixed-rate behavior loop ([`tick`]) on the authoritative
//! one.
//!
//! # Movement model
//!
//! The agent never owns a goal of its own: it follows the officer's heel
//! point, or, while its unit is tracking, the pursuit subject's live
//! position.  All movement goes through the host's [`NavCapability`]; if
//! the agent stops making progress while far from the officer it warps
//! back rather than staying wedged.
//!
//! [`frame`]: TrackingAgent::frame
//! [`tick`]: TrackingAgent::tick

use tracing::{debug, trace};

use k9_core::math::{delta_angle, remap, smooth_damp_angle};
use k9_core::{NavHandle, OfficerId, RepeatingTask, SubjectId, TickCtx, Vec3};
use k9_world::capability::in_exclusion_zone;
use k9_world::World;

use crate::state::{TrackerState, VisualOutput};
use crate::tuning::TrackerTuning;

// ── Visual constants ──────────────────────────────────────────────────────────

/// Two-segment walk/run blend: [0, WALK] → [0, 0.3], [WALK, RUN] → [0.3, 1].
const BLEND_WALK_SPEED: f32 = 1.664;
const BLEND_RUN_SPEED:  f32 = 4.352;
const BLEND_WALK_POINT: f32 = 0.3;

/// Facing alignment only runs within this multiple of the follow distance.
const ALIGN_RANGE_FACTOR: f32 = 1.5;
/// Velocities above this (m/s, squared below) mean the agent is moving and
/// should let the nav agent steer the facing.
const ALIGN_VELOCITY_SQR: f32 = 0.02 * 0.02;
const ALIGN_SMOOTH_TIME:  f32 = 0.15;
const ALIGN_MAX_SPEED:    f32 = 540.0;
/// Snap thresholds that end an alignment (degrees, degrees/second).
const ALIGN_SNAP_DELTA:    f32 = 0.5;
const ALIGN_SNAP_VELOCITY: f32 = 1.0;

// ── Behavior constants ────────────────────────────────────────────────────────

/// Squared per-tick displacement below which the agent counts as stuck.
const STUCK_MOVE_SQR: f32 = 0.01 * 0.01;
/// Stuck recovery only arms beyond this multiple of the follow distance.
const STUCK_RANGE_FACTOR: f32 = 2.0;

// ── TrackingAgent ─────────────────────────────────────────────────────────────

/// A single tracking agent bound to one officer.
#[derive(Debug)]
pub struct TrackingAgent {
    officer: OfficerId,
    nav:     NavHandle,
    tuning:  TrackerTuning,

    // Unit-written inputs.
    tracking:       bool,
    pursuit_target: Option<SubjectId>,

    // Behavior loop.
    behavior:   RepeatingTask,
    path_acc:   f32,
    last_tick_position: Vec3,
    stuck_secs: f32,
    warping:    bool,

    // Visual pass.
    frame_counter:  u64,
    last_frame_position: Vec3,
    yaw_deg:      f32,
    yaw_velocity: f32,
    state:        TrackerState,
    visual:       VisualOutput,
}

impl TrackingAgent {
    /// Create the nav agent at the officer's heel and start the behavior
    /// task (first fire after the configured start delay).
    pub fn spawn<W: World>(world: &mut W, officer: OfficerId, tuning: TrackerTuning) -> Self {
        let pose = world.officer_pose(officer);
        let desired = pose
            .map(|p| p.local_offset(tuning.heel_offset))
            .unwrap_or(Vec3::ZERO);
        // Off-mesh heel points fall back to a plain right-hand offset.
        let spawn_at = world
            .sample_navigable(desired, tuning.spawn_sample_radius)
            .or_else(|| pose.map(|p| p.position + p.right().scale(tuning.heel_offset.x)))
            .unwrap_or(desired);

        let nav = world.create_agent(spawn_at, &tuning.nav);
        world.set_agent_speed(nav, tuning.base_speed);

        debug!(%officer, %nav, position = %spawn_at, "tracking agent spawned");

        Self {
            officer,
            nav,
            behavior: RepeatingTask::new(tuning.tick_start_delay, tuning.tick_interval),
            tuning,
            tracking: false,
            pursuit_target: None,
            path_acc: 0.0,
            last_tick_position: spawn_at,
            stuck_secs: 0.0,
            warping: false,
            frame_counter: 0,
            last_frame_position: spawn_at,
            yaw_deg: pose.map(|p| p.yaw_deg).unwrap_or(0.0),
            yaw_velocity: 0.0,
            state: TrackerState::Idle,
            visual: VisualOutput::default(),
        }
    }

    // ── Unit-facing controls ──────────────────────────────────────────────────

    /// Re-point the agent at its officer after the unit finishes setup.
    pub fn bind_officer(&mut self, officer: OfficerId) {
        self.officer = officer;
    }

    pub fn set_tracking(&mut self, tracking: bool) {
        self.tracking = tracking;
    }

    pub fn set_pursuit_target(&mut self, target: Option<SubjectId>) {
        self.pursuit_target = target;
    }

    /// Cancel the behavior task and release the nav agent.
    pub fn teardown<W: World>(&mut self, world: &mut W) {
        self.behavior.cancel();
        world.destroy_agent(self.nav);
        debug!(officer = %self.officer, nav = %self.nav, "tracking agent torn down");
    }

    // ── Observers ─────────────────────────────────────────────────────────────

    pub fn officer(&self) -> OfficerId {
        self.officer
    }

    pub fn nav_handle(&self) -> NavHandle {
        self.nav
    }

    pub fn is_tracking(&self) -> bool {
        self.tracking
    }

    pub fn pursuit_target(&self) -> Option<SubjectId> {
        self.pursuit_target
    }

    pub fn state(&self) -> TrackerState {
        self.state
    }

    pub fn visual(&self) -> VisualOutput {
        self.visual
    }

    /// Current facing, degrees about Y.
    pub fn yaw_deg(&self) -> f32 {
        self.yaw_deg
    }

    pub fn position<W: World>(&self, world: &W) -> Option<Vec3> {
        world.agent_position(self.nav)
    }

    // ── Per-frame visual pass ─────────────────────────────────────────────────

    /// Runs on every process, every frame: movement magnitude, walk/run
    /// blend, behavior-state derivation (every other frame), and idle
    /// facing alignment.
    pub fn frame<W: World>(&mut self, world: &W, ctx: TickCtx) {
        let Some(position) = world.agent_position(self.nav) else {
            return;
        };
        self.frame_counter += 1;

        let movement = if world.has_authority() {
            world.agent_velocity(self.nav).map(Vec3::length).unwrap_or(0.0)
        } else {
            // Remote processes see replicated positions only.
            let moved = position.distance(self.last_frame_position);
            moved / ctx.dt.max(1e-4)
        };
        self.last_frame_position = position;

        if self.frame_counter % 2 == 0 {
            self.update_state(movement);
        }

        self.visual.speed_blend = if movement <= BLEND_WALK_SPEED {
            remap(movement, 0.0, BLEND_WALK_SPEED, 0.0, BLEND_WALK_POINT)
        } else {
            remap(movement, BLEND_WALK_SPEED, BLEND_RUN_SPEED, BLEND_WALK_POINT, 1.0)
        };

        self.align_facing(world, position, ctx);
    }

    fn update_state(&mut self, movement: f32) {
        let next = TrackerState::derive(self.tracking, movement);
        if next != self.state {
            if self.tuning.debug_logging {
                debug!(officer = %self.officer, from = %self.state, to = %next, "tracker state");
            }
            self.state = next;
        }
        self.visual.walking = next.is_walking();
        self.visual.tracking = next.is_tracking();
    }

    /// While parked at the heel, turn to match the officer's facing.  The
    /// nav agent steers the facing whenever it is actually moving.
    fn align_facing<W: World>(&mut self, world: &W, position: Vec3, ctx: TickCtx) {
        let Some(pose) = world.officer_pose(self.officer) else {
            return;
        };

        let heel = pose.local_offset(self.tuning.heel_offset);
        let align_range = self.tuning.follow_distance * ALIGN_RANGE_FACTOR;
        if position.distance_sqr(heel) > align_range * align_range {
            self.yaw_velocity = 0.0;
            return;
        }

        let moving = world
            .agent_velocity(self.nav)
            .is_some_and(|v| v.length_sqr() > ALIGN_VELOCITY_SQR)
            || world.agent_has_path(self.nav);
        if moving {
            self.yaw_velocity = 0.0;
            return;
        }

        let delta = delta_angle(self.yaw_deg, pose.yaw_deg);
        if delta.abs() < ALIGN_SNAP_DELTA && self.yaw_velocity.abs() < ALIGN_SNAP_VELOCITY {
            self.yaw_deg = pose.yaw_deg;
            self.yaw_velocity = 0.0;
            return;
        }

        self.yaw_deg = smooth_damp_angle(
            self.yaw_deg,
            pose.yaw_deg,
            &mut self.yaw_velocity,
            ALIGN_SMOOTH_TIME,
            ALIGN_MAX_SPEED,
            ctx.dt,
        );
    }

    // ── Fixed-rate behavior loop ──────────────────────────────────────────────

    /// Poll the behavior task; fires run only with authority.  A long frame
    /// runs the loop several times so the scheduled rate holds on average.
    pub fn tick<W: World>(&mut self, world: &mut W, ctx: TickCtx) {
        let fires = self.behavior.poll(ctx.dt);
        if fires == 0 || !world.has_authority() {
            return;
        }
        for _ in 0..fires {
            self.behavior_tick(world);
        }
    }

    fn behavior_tick<W: World>(&mut self, world: &mut W) {
        let officer_ok = world.officer_exists(self.officer)
            && world.officer_is_dead(self.officer) == Some(false);
        if !officer_ok || in_exclusion_zone(world, self.officer) {
            // Freeze in place until the officer is usable again.
            if world.agent_has_path(self.nav) {
                world.reset_agent_path(self.nav);
            }
            return;
        }

        self.path_acc += self.tuning.tick_interval;
        if self.path_acc >= self.tuning.path_update_interval {
            self.path_acc = 0.0;
            self.update_path(world);
        }

        self.check_stuck(world);
    }

    /// Recompute the destination: the pursuit subject while tracking,
    /// otherwise the officer's heel point, both snapped to the nav mesh.
    fn update_path<W: World>(&mut self, world: &mut W) {
        if self.warping {
            return;
        }
        let Some(position) = world.agent_position(self.nav) else {
            return;
        };
        let Some(pose) = world.officer_pose(self.officer) else {
            return;
        };

        let goal = match self.pursuit_target.filter(|_| self.tracking) {
            Some(subject) => world
                .subject_position(subject)
                .unwrap_or_else(|| pose.local_offset(self.tuning.heel_offset)),
            None => pose.local_offset(self.tuning.heel_offset),
        };
        let goal = world
            .sample_navigable(goal, self.tuning.path_sample_radius)
            .unwrap_or(goal);

        let officer_speed = world
            .current_speed(self.officer)
            .unwrap_or(self.tuning.base_speed);
        let speed = if position.distance_sqr(goal)
            > self.tuning.max_distance * self.tuning.max_distance
        {
            officer_speed * self.tuning.catchup_multiplier
        } else {
            officer_speed
        };

        world.set_agent_speed(self.nav, speed);
        world.set_agent_destination(self.nav, goal);

        if self.tuning.debug_logging {
            trace!(officer = %self.officer, goal = %goal, speed, "tracker path update");
        }
    }

    /// Warp back to the heel after sustained zero displacement while far
    /// from the officer.  Any meaningful displacement resets the fuse.
    fn check_stuck<W: World>(&mut self, world: &mut W) {
        let Some(position) = world.agent_position(self.nav) else {
            return;
        };
        let Some(pose) = world.officer_pose(self.officer) else {
            return;
        };

        let moved_sqr = position.distance_sqr(self.last_tick_position);
        self.last_tick_position = position;

        let stuck_range = self.tuning.follow_distance * STUCK_RANGE_FACTOR;
        let far = position.distance_sqr(pose.position) > stuck_range * stuck_range;

        if moved_sqr < STUCK_MOVE_SQR && far {
            self.stuck_secs += self.tuning.tick_interval;
            if self.stuck_secs >= self.tuning.stuck_check_secs && !self.warping {
                self.warp_to_officer(world, pose.local_offset(self.tuning.heel_offset));
            }
        } else {
            self.stuck_secs = 0.0;
        }
    }

    fn warp_to_officer<W: World>(&mut self, world: &mut W, heel: Vec3) {
        self.warping = true;

        let target = world
            .sample_navigable(heel, self.tuning.warp_sample_radius)
            .unwrap_or(heel);
        if !world.warp_agent(self.nav, target) {
            world.place_agent(self.nav, target);
        }
        world.reset_agent_path(self.nav);
        world.set_agent_destination(self.nav, target);

        debug!(officer = %self.officer, nav = %self.nav, to = %target, "tracker warped to officer");

        self.last_tick_position = target;
        self.stuck_secs = 0.0;
        self.warping = false;
    }
}
