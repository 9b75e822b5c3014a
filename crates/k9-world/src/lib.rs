//! `k9-world` — the seam between the patrol engine and its host game.
//!
//! The engine never talks to a game engine directly.  Everything external —
//! subjects, officers, stations, patrol dispatch, body searches, navigation —
//! is reached through a small capability trait defined here, and every lookup
//! returns `Option`/`bool` so a stale reference degrades to "absent" instead
//! of a dangling handle.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`item`]       | `CarriedItem`, `ItemKind`, `LegalStatus`                  |
//! | [`capability`] | One trait per external interface + the `World` supertrait |
//! | [`memory`]     | `MemoryWorld` — in-memory implementation for tests and    |
//! |                | headless runs                                             |

pub mod capability;
pub mod item;
pub mod memory;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use capability::{
    in_exclusion_zone, AgentMode, Authority, MoveSpeeds, NavCapability, NavTuning,
    PatrolDispatch, PatrolRegistry, RouteInfo, SearchCapability, StationRegistry,
    SubjectRegistry, World,
};
pub use item::{CarriedItem, ItemKind, LegalStatus};
pub use memory::MemoryWorld;
