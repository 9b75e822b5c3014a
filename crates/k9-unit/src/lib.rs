//! `k9-unit` — the per-unit detection/pursuit/search state machine.
//!
//! A [`UnitController`] binds one patrol officer to K9 duty: it scans the
//! fleet's subject snapshot on a throttled interval, decides whether to
//! engage, drives the officer's navigation during a pursuit, triggers the
//! body search at close range, and enforces a per-subject re-search
//! cooldown.  Each unit exclusively owns one
//! [`TrackingAgent`][k9_tracker::TrackingAgent] and tears it down with
//! itself.
//!
//! | Module     | Contents                            |
//! |------------|-------------------------------------|
//! | [`detect`] | Contraband predicate, nearest scan  |
//! | [`unit`]   | `UnitController`, `UnitTick`        |

pub mod detect;
pub mod unit;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use unit::{UnitController, UnitTick};
