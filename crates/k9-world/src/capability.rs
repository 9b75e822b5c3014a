//! Capability traits the engine consumes.
//!
//! # Pluggability
//!
//! The fleet, unit, and tracker code is generic over these traits, so a host
//! binds them to its own entity system while tests use
//! [`MemoryWorld`][crate::memory::MemoryWorld].  Each trait covers one
//! external interface; the [`World`] supertrait (with a blanket impl) is the
//! bound the engine actually takes.
//!
//! # Failure model
//!
//! Queries return `Option`/`bool`, never errors: a `None` means the entity or
//! capability is gone *right now* and the caller skips the action until its
//! next re-check cycle.  Mutating calls are fire-and-forget and must be
//! idempotent for unchanged arguments (e.g. re-issuing the same destination
//! every tick is expected to no-op in the host).

use k9_core::{NavHandle, OfficerId, Pose, RouteId, StationId, SubjectId, Vec3};

use crate::item::CarriedItem;

// ── Shared value types ────────────────────────────────────────────────────────

/// An officer's configured locomotion speeds.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MoveSpeeds {
    pub walk: f32,
    pub run:  f32,
}

impl MoveSpeeds {
    #[inline]
    pub fn new(walk: f32, run: f32) -> Self {
        Self { walk, run }
    }

    /// Both speeds scaled by `mult`.
    #[inline]
    pub fn scaled(self, mult: f32) -> Self {
        Self { walk: self.walk * mult, run: self.run * mult }
    }
}

/// Pathing cost mode for an officer's nav agent.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
#[non_exhaustive]
pub enum AgentMode {
    #[default]
    Normal,
    /// Path straight at the goal, ignoring area costs — used for pursuit.
    IgnoreCosts,
}

/// Shape of a foot-patrol route, enough to judge validity.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RouteInfo {
    pub waypoint_count: u32,
    pub start_index:    u32,
}

impl RouteInfo {
    /// A route is usable when it has at least one waypoint and its start
    /// index is within bounds.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.waypoint_count > 0 && self.start_index < self.waypoint_count
    }
}

/// Physical parameters for a tracking agent's nav-mesh agent.
///
/// Defaults describe a small-animal footprint with snappy turning that
/// yields to officers in avoidance.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NavTuning {
    pub radius:             f32,
    pub height:             f32,
    pub base_offset:        f32,
    pub speed:              f32,
    pub stopping_distance:  f32,
    pub angular_speed:      f32,
    pub acceleration:       f32,
    /// Lower value = higher avoidance priority in the host.
    pub avoidance_priority: u8,
}

impl Default for NavTuning {
    fn default() -> Self {
        Self {
            radius:             0.18,
            height:             0.45,
            base_offset:        0.02,
            speed:              4.2,
            stopping_distance:  1.0,
            angular_speed:      720.0,
            acceleration:       16.0,
            avoidance_priority: 60,
        }
    }
}

// ── Subject registry ──────────────────────────────────────────────────────────

/// Candidate subjects: position, perception-gated inventory, search flag.
pub trait SubjectRegistry {
    /// Identities of every subject currently known to the host.  The fleet
    /// snapshots this list on its refresh interval; positions are always
    /// re-resolved live.
    fn subject_ids(&self) -> Vec<SubjectId>;

    fn subject_position(&self, subject: SubjectId) -> Option<Vec3>;

    /// `true` when this process can see the subject's inventory (the subject
    /// is locally owned).  Remote subjects are never sniffable.
    fn inventory_visible(&self, subject: SubjectId) -> bool;

    /// Occupied carried slots in hotbar order.  Empty for unknown subjects.
    fn carried_items(&self, subject: SubjectId) -> Vec<CarriedItem>;

    /// `true` while a body search is already queued for this subject.
    fn search_pending(&self, subject: SubjectId) -> bool;
}

// ── Patrol-agent registry ─────────────────────────────────────────────────────

/// Officers: validity, pose, movement commands, and speed fields.
pub trait PatrolRegistry {
    fn officer_ids(&self) -> Vec<OfficerId>;

    fn officer_exists(&self, officer: OfficerId) -> bool;

    /// `Some(true)` dead, `Some(false)` alive, `None` when the health
    /// capability is unavailable (treated as invalid by the fleet).
    fn officer_is_dead(&self, officer: OfficerId) -> Option<bool>;

    fn officer_pose(&self, officer: OfficerId) -> Option<Pose>;

    fn can_move(&self, officer: OfficerId) -> bool;

    /// Nearest point on the nav mesh the officer could path to.
    fn closest_reachable_point(&self, officer: OfficerId, target: Vec3) -> Option<Vec3>;

    fn set_destination(&mut self, officer: OfficerId, destination: Vec3);

    fn set_agent_mode(&mut self, officer: OfficerId, mode: AgentMode);

    fn movement_speeds(&self, officer: OfficerId) -> Option<MoveSpeeds>;

    fn set_movement_speeds(&mut self, officer: OfficerId, speeds: MoveSpeeds);

    /// The officer's current locomotion speed (for the tracker to match).
    fn current_speed(&self, officer: OfficerId) -> Option<f32>;
}

// ── Exclusion zones ───────────────────────────────────────────────────────────

/// Stations — the zones units must not operate inside.
pub trait StationRegistry {
    fn station_ids(&self) -> Vec<StationId>;

    fn station_position(&self, station: StationId) -> Option<Vec3>;

    /// `true` if the station's resident pool contains the officer.
    fn station_contains(&self, station: StationId, officer: OfficerId) -> bool;
}

/// `true` if any station's resident pool contains the officer.
pub fn in_exclusion_zone<W: StationRegistry + ?Sized>(world: &W, officer: OfficerId) -> bool {
    world
        .station_ids()
        .iter()
        .any(|&station| world.station_contains(station, officer))
}

// ── Patrol dispatch ───────────────────────────────────────────────────────────

/// Route registry and group dispatch.
pub trait PatrolDispatch {
    fn route_ids(&self) -> Vec<RouteId>;

    fn route_info(&self, route: RouteId) -> Option<RouteInfo>;

    /// Ask the host to start a foot patrol of `size` on `route`, returning
    /// the assigned group members (possibly empty).
    fn start_foot_patrol(&mut self, route: RouteId, size: u32) -> Vec<OfficerId>;
}

// ── Body search ───────────────────────────────────────────────────────────────

/// The host's body-search action.  `begin_search` is fire-and-forget and
/// only meaningful on the authoritative process; progress is observed by
/// polling `search_active`, not by callback.
pub trait SearchCapability {
    fn begin_search(&mut self, officer: OfficerId, subject: SubjectId);

    /// `true` while the officer's search behavior is running.
    fn search_active(&self, officer: OfficerId) -> bool;
}

// ── Navigation ────────────────────────────────────────────────────────────────

/// Per-tracking-agent navigation: agent lifecycle, destination setting,
/// velocity queries, surface sampling, and teleports.
pub trait NavCapability {
    fn create_agent(&mut self, at: Vec3, tuning: &NavTuning) -> NavHandle;

    fn destroy_agent(&mut self, agent: NavHandle);

    fn agent_position(&self, agent: NavHandle) -> Option<Vec3>;

    fn agent_velocity(&self, agent: NavHandle) -> Option<Vec3>;

    fn set_agent_destination(&mut self, agent: NavHandle, destination: Vec3);

    fn set_agent_speed(&mut self, agent: NavHandle, speed: f32);

    fn agent_has_path(&self, agent: NavHandle) -> bool;

    fn reset_agent_path(&mut self, agent: NavHandle);

    /// Authoritative teleport.  `false` if the host refused the warp.
    fn warp_agent(&mut self, agent: NavHandle, to: Vec3) -> bool;

    /// Forced relocation fallback (disable, move, re-enable in the host).
    fn place_agent(&mut self, agent: NavHandle, at: Vec3);

    /// Nearest navigable point within `max_distance` of `near`.
    fn sample_navigable(&self, near: Vec3, max_distance: f32) -> Option<Vec3>;
}

// ── Authority ─────────────────────────────────────────────────────────────────

/// Single-designated-writer gate.  Only the authoritative process performs
/// movement, pathing, spawning, and `begin_search`; everyone else reads
/// state and drives visuals.
pub trait Authority {
    fn has_authority(&self) -> bool;
}

// ── World supertrait ──────────────────────────────────────────────────────────

/// Everything the engine needs from a host, in one bound.
pub trait World:
    SubjectRegistry
    + PatrolRegistry
    + StationRegistry
    + PatrolDispatch
    + SearchCapability
    + NavCapability
    + Authority
{
}

impl<T> World for T where
    T: SubjectRegistry
        + PatrolRegistry
        + StationRegistry
        + PatrolDispatch
        + SearchCapability
        + NavCapability
        + Authority
{
}
