//! Recruit selection for new units.
//!
//! Two sources, tried in order per spawn attempt: ask the host to start a
//! one-officer foot patrol on a random valid route, then fall back to the
//! closest free officer near the chosen station.  Every miss degrades to
//! "retry next attempt".

use rustc_hash::FxHashSet;
use tracing::debug;

use k9_core::{OfficerId, PatrolRng, Vec3};
use k9_world::capability::in_exclusion_zone;
use k9_world::World;

/// How far from the station the fallback scan will look, in world units.
pub const CLOSEST_OFFICER_RADIUS: f32 = 100.0;

/// A dispatched foot patrol only needs its lead officer.
const DISPATCH_GROUP_SIZE: u32 = 1;

/// An officer is recruitable when it is alive, unassigned, and not inside
/// a station.  Dead or health-less officers would be pruned on the next
/// check anyway.
fn recruitable<W: World + ?Sized>(
    world:    &W,
    assigned: &FxHashSet<OfficerId>,
    officer:  OfficerId,
) -> bool {
    world.officer_is_dead(officer) == Some(false)
        && !assigned.contains(&officer)
        && !in_exclusion_zone(world, officer)
}

/// Request a one-officer patrol group on a random valid route and take its
/// first recruitable member.
pub fn dispatch_recruit<W: World + ?Sized>(
    world:    &mut W,
    rng:      &mut PatrolRng,
    assigned: &FxHashSet<OfficerId>,
) -> Option<OfficerId> {
    let routes = world.route_ids();
    let route = *rng.choose(&routes)?;
    if !world.route_info(route).is_some_and(|info| info.is_valid()) {
        debug!(%route, "skipping invalid patrol route");
        return None;
    }
    world
        .start_foot_patrol(route, DISPATCH_GROUP_SIZE)
        .into_iter()
        .find(|&officer| recruitable(world, assigned, officer))
}

/// Nearest recruitable officer within [`CLOSEST_OFFICER_RADIUS`] of `near`,
/// by squared distance.
pub fn find_closest_officer<W: World + ?Sized>(
    world:    &W,
    near:     Vec3,
    assigned: &FxHashSet<OfficerId>,
) -> Option<OfficerId> {
    let mut best: Option<(OfficerId, f32)> = None;
    for officer in world.officer_ids() {
        if !recruitable(world, assigned, officer) {
            continue;
        }
        let Some(pose) = world.officer_pose(officer) else {
            continue;
        };
        let d2 = near.distance_sqr(pose.position);
        if d2 < CLOSEST_OFFICER_RADIUS * CLOSEST_OFFICER_RADIUS
            && best.is_none_or(|(_, b)| d2 < b)
        {
            best = Some((officer, d2));
        }
    }
    best.map(|(officer, _)| officer)
}
