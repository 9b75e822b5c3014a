//! Detection scanning: who is close enough, and are they carrying.

use k9_core::{SubjectId, Vec3};
use k9_world::World;

/// `true` if the subject visibly carries contraband.
///
/// Inventories are only readable for locally-owned subjects; everyone else
/// is treated as clean regardless of what they carry.  The slot scan
/// short-circuits on the first hit.
pub fn has_contraband<W: World + ?Sized>(world: &W, subject: SubjectId) -> bool {
    if !world.inventory_visible(subject) {
        return false;
    }
    world
        .carried_items(subject)
        .iter()
        .any(|item| item.is_contraband())
}

/// Nearest candidate strictly inside `radius` of `from`, by squared
/// distance.  A candidate at exactly the radius is out of range.
pub fn nearest_in_radius<W: World + ?Sized>(
    world:    &W,
    subjects: &[SubjectId],
    from:     Vec3,
    radius:   f32,
) -> Option<SubjectId> {
    let mut best: Option<(SubjectId, f32)> = None;
    for &subject in subjects {
        let Some(position) = world.subject_position(subject) else {
            continue;
        };
        let d2 = from.distance_sqr(position);
        if d2 < radius * radius && best.is_none_or(|(_, b)| d2 < b) {
            best = Some((subject, d2));
        }
    }
    best.map(|(subject, _)| subject)
}
