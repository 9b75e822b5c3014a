//! `k9-core` — foundational types for the `k9-patrol` engine.
//!
//! This crate is a dependency of every other `k9-*` crate.  It intentionally
//! has no `k9-*` dependencies and minimal external ones (only `rand`,
//! `serde`, and `thiserror`).
//!
//! # What lives here
//!
//! | Module     | Contents                                               |
//! |------------|--------------------------------------------------------|
//! | [`ids`]    | `UnitId`, `OfficerId`, `SubjectId`, `StationId`, …     |
//! | [`math`]   | `Vec3`, `Pose`, remap, angular smoothing               |
//! | [`time`]   | `TickCtx`, `Clock`, `IntervalTimer`, `RepeatingTask`   |
//! | [`config`] | `K9Config`                                             |
//! | [`rng`]    | `PatrolRng`                                            |
//! | [`error`]  | `K9Error`, `K9Result`                                  |

pub mod config;
pub mod error;
pub mod ids;
pub mod math;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::K9Config;
pub use error::{K9Error, K9Result};
pub use ids::{NavHandle, OfficerId, RouteId, StationId, SubjectId, UnitId};
pub use math::{Pose, Vec3};
pub use rng::PatrolRng;
pub use time::{Clock, IntervalTimer, RepeatingTask, TickCtx};
