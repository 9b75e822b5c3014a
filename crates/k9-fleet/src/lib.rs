//! `k9-fleet` — the fleet manager that keeps K9 units on the street.
//!
//! The [`FleetManager`] owns the live [`UnitController`][k9_unit::UnitController]
//! set and is the sole mutator of it.  On its five-second check it prunes
//! units whose officer has become unusable, then (with write authority)
//! replenishes up to the configured cap by recruiting officers near a
//! random station.  A one-second timer refreshes the cached subject
//! snapshot that all units scan against.
//!
//! | Module    | Contents                                 |
//! |-----------|------------------------------------------|
//! | [`spawn`] | Recruit selection (dispatch + fallback)  |
//! | [`fleet`] | `FleetManager`                           |

pub mod fleet;
pub mod spawn;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use fleet::FleetManager;
