//! The fleet manager.
//!
//! # Rate groups
//!
//! Three deliberately decoupled rates bound the per-frame cost:
//!
//! - every frame: tick each unit (cheap; detection inside is throttled),
//!   dropping units that request despawn;
//! - every second: refresh the cached subject snapshot in one atomic
//!   replacement;
//! - every five seconds: prune invalid units, then replenish.  Prune
//!   always runs first so a stale unit never holds a pool slot against
//!   a valid new spawn.
//!
//! The unit vector is arena-like: push on spawn, swap-remove on drop.
//! Order is not meaningful.

use tracing::{debug, info, warn};

use k9_core::{IntervalTimer, K9Config, K9Result, PatrolRng, SubjectId, TickCtx};
use k9_unit::{UnitController, UnitTick};
use k9_world::World;
use rustc_hash::FxHashSet;

use crate::spawn::{dispatch_recruit, find_closest_officer};

const SUBJECT_REFRESH_SECS: f32 = 1.0;
const FLEET_CHECK_SECS:     f32 = 5.0;
/// Spawn attempts allowed per missing unit before giving up until the
/// next fleet check.
const ATTEMPTS_PER_NEED: u32 = 3;

// ── FleetManager ──────────────────────────────────────────────────────────────

/// Owner of the live unit pool.
pub struct FleetManager {
    cfg: K9Config,
    rng: PatrolRng,

    units:    Vec<UnitController>,
    subjects: Vec<SubjectId>,

    refresh_timer: IntervalTimer,
    check_timer:   IntervalTimer,
}

impl FleetManager {
    /// Validate `cfg` and create an empty fleet.  `seed` fixes the spawn
    /// algorithm's random picks.
    pub fn new(cfg: K9Config, seed: u64) -> K9Result<Self> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            rng: PatrolRng::new(seed),
            units: Vec::new(),
            subjects: Vec::new(),
            refresh_timer: IntervalTimer::new(SUBJECT_REFRESH_SECS),
            check_timer: IntervalTimer::new(FLEET_CHECK_SECS),
        })
    }

    // ── Observers ─────────────────────────────────────────────────────────────

    pub fn units(&self) -> &[UnitController] {
        &self.units
    }

    /// The subject snapshot units scan against, as of the last refresh.
    pub fn cached_subjects(&self) -> &[SubjectId] {
        &self.subjects
    }

    pub fn config(&self) -> &K9Config {
        &self.cfg
    }

    // ── Frame tick ────────────────────────────────────────────────────────────

    /// Advance the whole fleet by one frame.
    pub fn tick<W: World>(&mut self, world: &mut W, ctx: TickCtx) {
        if self.refresh_timer.tick(ctx.dt) {
            self.subjects = world.subject_ids();
        }

        let mut i = 0;
        while i < self.units.len() {
            match self.units[i].tick(world, ctx, &self.subjects) {
                UnitTick::Alive => i += 1,
                UnitTick::Despawn => {
                    let mut unit = self.units.swap_remove(i);
                    debug!(officer = %unit.officer(), "unit despawned");
                    unit.teardown(world);
                }
            }
        }

        if self.check_timer.tick(ctx.dt) {
            self.prune(world);
            self.replenish(world);
        }
    }

    // ── Prune ─────────────────────────────────────────────────────────────────

    /// Drop every unit whose officer is gone, has no readable health, or
    /// is dead.  Runs before any count-based decision.
    fn prune<W: World>(&mut self, world: &mut W) {
        let mut i = 0;
        while i < self.units.len() {
            let officer = self.units[i].officer();
            if world.officer_exists(officer) && world.officer_is_dead(officer) == Some(false) {
                i += 1;
            } else {
                let mut unit = self.units.swap_remove(i);
                debug!(%officer, "pruning invalid unit");
                unit.teardown(world);
            }
        }
    }

    // ── Replenish ─────────────────────────────────────────────────────────────

    /// Spawn units until the pool reaches the cap, bounded in attempts.
    /// Only runs with write authority.
    fn replenish<W: World>(&mut self, world: &mut W) {
        if !world.has_authority() {
            return;
        }
        let need = (self.cfg.unit_count as usize).saturating_sub(self.units.len()) as u32;
        if need == 0 {
            return;
        }

        let stations = world.station_ids();
        if stations.is_empty() {
            warn!("no stations registered, cannot spawn units");
            return;
        }

        let mut assigned: FxHashSet<_> =
            self.units.iter().map(|unit| unit.officer()).collect();

        let mut spawned = 0u32;
        let mut attempts = 0u32;
        while spawned < need && attempts < need * ATTEMPTS_PER_NEED {
            attempts += 1;

            let Some(&station) = self.rng.choose(&stations) else {
                break;
            };
            let Some(station_pos) = world.station_position(station) else {
                continue;
            };

            let recruit = dispatch_recruit(world, &mut self.rng, &assigned)
                .or_else(|| find_closest_officer(world, station_pos, &assigned));
            let Some(officer) = recruit else {
                debug!(%station, "no recruitable officer this attempt");
                continue;
            };

            assigned.insert(officer);
            self.units
                .push(UnitController::new(world, officer, self.cfg.clone()));
            info!(%officer, %station, "unit spawned");
            spawned += 1;
        }

        if spawned < need {
            debug!(spawned, need, "replenish fell short, retrying next check");
        }
    }
}
