//! `MemoryWorld` — a self-contained [`World`] implementation.
//!
//! Backs the engine's tests and headless runs.  Entities live in hash maps
//! keyed by their IDs; navigation is straight-line integration under
//! [`MemoryWorld::step`]; officers do not move on their own (fixtures place
//! them).  Mutators double as fixture builders, so tests read as a sequence
//! of world edits followed by engine ticks.

use std::collections::{HashMap, HashSet};

use k9_core::{NavHandle, OfficerId, Pose, RouteId, StationId, SubjectId, Vec3};

use crate::capability::{
    AgentMode, Authority, MoveSpeeds, NavCapability, NavTuning, PatrolDispatch,
    PatrolRegistry, RouteInfo, SearchCapability, StationRegistry, SubjectRegistry,
};
use crate::item::CarriedItem;

// ── Records ───────────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
struct SubjectRec {
    position:       Vec3,
    visible:        bool,
    items:          Vec<CarriedItem>,
    search_pending: bool,
}

#[derive(Clone, Debug)]
struct OfficerRec {
    pose:             Pose,
    /// `None` models a missing health capability.
    dead:             Option<bool>,
    can_move:         bool,
    speeds:           MoveSpeeds,
    current_speed:    f32,
    destination:      Option<Vec3>,
    mode:             AgentMode,
    search_active:    bool,
}

#[derive(Clone, Debug)]
struct StationRec {
    position:  Vec3,
    residents: HashSet<OfficerId>,
}

#[derive(Clone, Debug)]
struct RouteRec {
    info:    RouteInfo,
    /// Officers a dispatch on this route hands out, in order.
    members: Vec<OfficerId>,
}

#[derive(Clone, Debug)]
struct NavAgentRec {
    position:          Vec3,
    velocity:          Vec3,
    destination:       Option<Vec3>,
    speed:             f32,
    stopping_distance: f32,
}

// ── MemoryWorld ───────────────────────────────────────────────────────────────

/// In-memory world state.  See the module docs.
pub struct MemoryWorld {
    authority: bool,

    subjects: HashMap<SubjectId, SubjectRec>,
    officers: HashMap<OfficerId, OfficerRec>,
    stations: HashMap<StationId, StationRec>,
    routes:   HashMap<RouteId, RouteRec>,
    agents:   HashMap<NavHandle, NavAgentRec>,

    next_subject: u32,
    next_officer: u32,
    next_station: u32,
    next_route:   u32,
    next_agent:   u32,

    /// Every `begin_search` call, in order — inspected by tests.
    searches: Vec<(OfficerId, SubjectId)>,

    /// When `false`, `sample_navigable` finds nothing (off-mesh terrain).
    sampling_enabled: bool,
    /// When `false`, `warp_agent` refuses, exercising the place fallback.
    warp_enabled: bool,
}

impl Default for MemoryWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryWorld {
    /// An empty, authoritative world.
    pub fn new() -> Self {
        Self {
            authority: true,
            subjects: HashMap::new(),
            officers: HashMap::new(),
            stations: HashMap::new(),
            routes:   HashMap::new(),
            agents:   HashMap::new(),
            next_subject: 0,
            next_officer: 0,
            next_station: 0,
            next_route:   0,
            next_agent:   0,
            searches: Vec::new(),
            sampling_enabled: true,
            warp_enabled:     true,
        }
    }

    // ── Fixture mutators ──────────────────────────────────────────────────

    pub fn set_authority(&mut self, authority: bool) {
        self.authority = authority;
    }

    pub fn add_subject(&mut self, position: Vec3, items: Vec<CarriedItem>) -> SubjectId {
        let id = SubjectId(self.next_subject);
        self.next_subject += 1;
        self.subjects.insert(
            id,
            SubjectRec { position, visible: true, items, search_pending: false },
        );
        id
    }

    pub fn set_subject_position(&mut self, subject: SubjectId, position: Vec3) {
        if let Some(rec) = self.subjects.get_mut(&subject) {
            rec.position = position;
        }
    }

    pub fn set_inventory_visible(&mut self, subject: SubjectId, visible: bool) {
        if let Some(rec) = self.subjects.get_mut(&subject) {
            rec.visible = visible;
        }
    }

    pub fn set_search_pending(&mut self, subject: SubjectId, pending: bool) {
        if let Some(rec) = self.subjects.get_mut(&subject) {
            rec.search_pending = pending;
        }
    }

    pub fn remove_subject(&mut self, subject: SubjectId) {
        self.subjects.remove(&subject);
    }

    pub fn add_officer(&mut self, pose: Pose) -> OfficerId {
        let id = OfficerId(self.next_officer);
        self.next_officer += 1;
        self.officers.insert(
            id,
            OfficerRec {
                pose,
                dead: Some(false),
                can_move: true,
                speeds: MoveSpeeds::new(2.0, 5.0),
                current_speed: 2.0,
                destination: None,
                mode: AgentMode::Normal,
                search_active: false,
            },
        );
        id
    }

    pub fn set_officer_pose(&mut self, officer: OfficerId, pose: Pose) {
        if let Some(rec) = self.officers.get_mut(&officer) {
            rec.pose = pose;
        }
    }

    pub fn kill_officer(&mut self, officer: OfficerId) {
        if let Some(rec) = self.officers.get_mut(&officer) {
            rec.dead = Some(true);
        }
    }

    /// Drop the officer's health capability (lookup returns `None`).
    pub fn strip_officer_health(&mut self, officer: OfficerId) {
        if let Some(rec) = self.officers.get_mut(&officer) {
            rec.dead = None;
        }
    }

    pub fn remove_officer(&mut self, officer: OfficerId) {
        self.officers.remove(&officer);
    }

    pub fn set_officer_current_speed(&mut self, officer: OfficerId, speed: f32) {
        if let Some(rec) = self.officers.get_mut(&officer) {
            rec.current_speed = speed;
        }
    }

    pub fn add_station(&mut self, position: Vec3) -> StationId {
        let id = StationId(self.next_station);
        self.next_station += 1;
        self.stations.insert(id, StationRec { position, residents: HashSet::new() });
        id
    }

    /// Put an officer inside a station's resident pool.
    pub fn station_admit(&mut self, station: StationId, officer: OfficerId) {
        if let Some(rec) = self.stations.get_mut(&station) {
            rec.residents.insert(officer);
        }
    }

    pub fn station_expel(&mut self, station: StationId, officer: OfficerId) {
        if let Some(rec) = self.stations.get_mut(&station) {
            rec.residents.remove(&officer);
        }
    }

    pub fn add_route(&mut self, info: RouteInfo, members: Vec<OfficerId>) -> RouteId {
        let id = RouteId(self.next_route);
        self.next_route += 1;
        self.routes.insert(id, RouteRec { info, members });
        id
    }

    /// Flip the officer's search behavior back to inactive (search done).
    pub fn finish_search(&mut self, officer: OfficerId) {
        if let Some(rec) = self.officers.get_mut(&officer) {
            rec.search_active = false;
        }
    }

    pub fn set_sampling_enabled(&mut self, enabled: bool) {
        self.sampling_enabled = enabled;
    }

    pub fn set_warp_enabled(&mut self, enabled: bool) {
        self.warp_enabled = enabled;
    }

    // ── Inspection (tests) ────────────────────────────────────────────────

    /// All `begin_search` invocations so far, oldest first.
    pub fn searches(&self) -> &[(OfficerId, SubjectId)] {
        &self.searches
    }

    pub fn officer_destination(&self, officer: OfficerId) -> Option<Vec3> {
        self.officers.get(&officer).and_then(|rec| rec.destination)
    }

    pub fn officer_mode(&self, officer: OfficerId) -> Option<AgentMode> {
        self.officers.get(&officer).map(|rec| rec.mode)
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn agent_destination(&self, agent: NavHandle) -> Option<Vec3> {
        self.agents.get(&agent).and_then(|rec| rec.destination)
    }

    pub fn agent_speed(&self, agent: NavHandle) -> Option<f32> {
        self.agents.get(&agent).map(|rec| rec.speed)
    }

    // ── Integration ───────────────────────────────────────────────────────

    /// Advance straight-line nav-agent movement by `dt` seconds.
    ///
    /// Agents stop once within their stopping distance of the destination;
    /// officers are fixtures and never move on their own.
    pub fn step(&mut self, dt: f32) {
        for rec in self.agents.values_mut() {
            let Some(dest) = rec.destination else {
                rec.velocity = Vec3::ZERO;
                continue;
            };
            let offset = dest - rec.position;
            let dist = offset.length();
            if dist <= rec.stopping_distance.max(1e-3) {
                rec.destination = None;
                rec.velocity = Vec3::ZERO;
                continue;
            }
            let step = rec.speed * dt;
            if step >= dist {
                rec.position = dest;
                rec.destination = None;
                rec.velocity = Vec3::ZERO;
            } else {
                let dir = offset.scale(1.0 / dist);
                rec.position = rec.position + dir.scale(step);
                rec.velocity = dir.scale(rec.speed);
            }
        }
    }
}

// ── Capability impls ──────────────────────────────────────────────────────────

impl SubjectRegistry for MemoryWorld {
    fn subject_ids(&self) -> Vec<SubjectId> {
        let mut ids: Vec<SubjectId> = self.subjects.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    fn subject_position(&self, subject: SubjectId) -> Option<Vec3> {
        self.subjects.get(&subject).map(|rec| rec.position)
    }

    fn inventory_visible(&self, subject: SubjectId) -> bool {
        self.subjects.get(&subject).is_some_and(|rec| rec.visible)
    }

    fn carried_items(&self, subject: SubjectId) -> Vec<CarriedItem> {
        self.subjects
            .get(&subject)
            .map(|rec| rec.items.clone())
            .unwrap_or_default()
    }

    fn search_pending(&self, subject: SubjectId) -> bool {
        self.subjects.get(&subject).is_some_and(|rec| rec.search_pending)
    }
}

impl PatrolRegistry for MemoryWorld {
    fn officer_ids(&self) -> Vec<OfficerId> {
        let mut ids: Vec<OfficerId> = self.officers.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    fn officer_exists(&self, officer: OfficerId) -> bool {
        self.officers.contains_key(&officer)
    }

    fn officer_is_dead(&self, officer: OfficerId) -> Option<bool> {
        self.officers.get(&officer).and_then(|rec| rec.dead)
    }

    fn officer_pose(&self, officer: OfficerId) -> Option<Pose> {
        self.officers.get(&officer).map(|rec| rec.pose)
    }

    fn can_move(&self, officer: OfficerId) -> bool {
        self.officers.get(&officer).is_some_and(|rec| rec.can_move)
    }

    fn closest_reachable_point(&self, officer: OfficerId, target: Vec3) -> Option<Vec3> {
        if !self.officers.contains_key(&officer) || !self.sampling_enabled {
            return None;
        }
        Some(target)
    }

    fn set_destination(&mut self, officer: OfficerId, destination: Vec3) {
        if let Some(rec) = self.officers.get_mut(&officer) {
            rec.destination = Some(destination);
        }
    }

    fn set_agent_mode(&mut self, officer: OfficerId, mode: AgentMode) {
        if let Some(rec) = self.officers.get_mut(&officer) {
            rec.mode = mode;
        }
    }

    fn movement_speeds(&self, officer: OfficerId) -> Option<MoveSpeeds> {
        self.officers.get(&officer).map(|rec| rec.speeds)
    }

    fn set_movement_speeds(&mut self, officer: OfficerId, speeds: MoveSpeeds) {
        if let Some(rec) = self.officers.get_mut(&officer) {
            rec.speeds = speeds;
        }
    }

    fn current_speed(&self, officer: OfficerId) -> Option<f32> {
        self.officers.get(&officer).map(|rec| rec.current_speed)
    }
}

impl StationRegistry for MemoryWorld {
    fn station_ids(&self) -> Vec<StationId> {
        let mut ids: Vec<StationId> = self.stations.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    fn station_position(&self, station: StationId) -> Option<Vec3> {
        self.stations.get(&station).map(|rec| rec.position)
    }

    fn station_contains(&self, station: StationId, officer: OfficerId) -> bool {
        self.stations
            .get(&station)
            .is_some_and(|rec| rec.residents.contains(&officer))
    }
}

impl PatrolDispatch for MemoryWorld {
    fn route_ids(&self) -> Vec<RouteId> {
        let mut ids: Vec<RouteId> = self.routes.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    fn route_info(&self, route: RouteId) -> Option<RouteInfo> {
        self.routes.get(&route).map(|rec| rec.info)
    }

    fn start_foot_patrol(&mut self, route: RouteId, size: u32) -> Vec<OfficerId> {
        self.routes
            .get(&route)
            .map(|rec| rec.members.iter().take(size as usize).copied().collect())
            .unwrap_or_default()
    }
}

impl SearchCapability for MemoryWorld {
    fn begin_search(&mut self, officer: OfficerId, subject: SubjectId) {
        self.searches.push((officer, subject));
        if let Some(rec) = self.officers.get_mut(&officer) {
            rec.search_active = true;
        }
    }

    fn search_active(&self, officer: OfficerId) -> bool {
        self.officers.get(&officer).is_some_and(|rec| rec.search_active)
    }
}

impl NavCapability for MemoryWorld {
    fn create_agent(&mut self, at: Vec3, tuning: &NavTuning) -> NavHandle {
        let handle = NavHandle(self.next_agent);
        self.next_agent += 1;
        self.agents.insert(
            handle,
            NavAgentRec {
                position:          at,
                velocity:          Vec3::ZERO,
                destination:       None,
                speed:             tuning.speed,
                stopping_distance: tuning.stopping_distance,
            },
        );
        handle
    }

    fn destroy_agent(&mut self, agent: NavHandle) {
        self.agents.remove(&agent);
    }

    fn agent_position(&self, agent: NavHandle) -> Option<Vec3> {
        self.agents.get(&agent).map(|rec| rec.position)
    }

    fn agent_velocity(&self, agent: NavHandle) -> Option<Vec3> {
        self.agents.get(&agent).map(|rec| rec.velocity)
    }

    fn set_agent_destination(&mut self, agent: NavHandle, destination: Vec3) {
        if let Some(rec) = self.agents.get_mut(&agent) {
            rec.destination = Some(destination);
        }
    }

    fn set_agent_speed(&mut self, agent: NavHandle, speed: f32) {
        if let Some(rec) = self.agents.get_mut(&agent) {
            rec.speed = speed;
        }
    }

    fn agent_has_path(&self, agent: NavHandle) -> bool {
        self.agents.get(&agent).is_some_and(|rec| rec.destination.is_some())
    }

    fn reset_agent_path(&mut self, agent: NavHandle) {
        if let Some(rec) = self.agents.get_mut(&agent) {
            rec.destination = None;
            rec.velocity = Vec3::ZERO;
        }
    }

    fn warp_agent(&mut self, agent: NavHandle, to: Vec3) -> bool {
        if !self.warp_enabled {
            return false;
        }
        match self.agents.get_mut(&agent) {
            Some(rec) => {
                rec.position = to;
                rec.velocity = Vec3::ZERO;
                true
            }
            None => false,
        }
    }

    fn place_agent(&mut self, agent: NavHandle, at: Vec3) {
        if let Some(rec) = self.agents.get_mut(&agent) {
            rec.position = at;
            rec.velocity = Vec3::ZERO;
        }
    }

    fn sample_navigable(&self, near: Vec3, _max_distance: f32) -> Option<Vec3> {
        if self.sampling_enabled { Some(near) } else { None }
    }
}

impl Authority for MemoryWorld {
    fn has_authority(&self) -> bool {
        self.authority
    }
}
