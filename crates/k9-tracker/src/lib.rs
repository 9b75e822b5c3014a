//! `k9-tracker` — the companion entity that follows its patrol officer.
//!
//! A [`TrackingAgent`] runs two decoupled loops:
//!
//! - a **per-frame** visual pass (speed blend, facing alignment, derived
//!   behavior state) that runs on every process, and
//! - a **fixed-rate behavior tick** (default 10 Hz, starting 1 s after
//!   spawn) that performs path maintenance and stuck recovery, on the
//!   authoritative process only.
//!
//! The tracker reads its unit's decisions (tracking flag, pursuit target)
//! but never writes unit state back.
//!
//! | Module     | Contents                                        |
//! |------------|-------------------------------------------------|
//! | [`tuning`] | `TrackerTuning`                                 |
//! | [`state`]  | `TrackerState`, `VisualOutput`                  |
//! | [`agent`]  | `TrackingAgent`                                 |

pub mod agent;
pub mod state;
pub mod tuning;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use agent::TrackingAgent;
pub use state::{TrackerState, VisualOutput};
pub use tuning::TrackerTuning;
