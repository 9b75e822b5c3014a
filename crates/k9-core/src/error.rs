//! Engine error type.
//!
//! Runtime lookup failures are not errors here: a missing officer, subject,
//! or capability degrades to "skip and re-check next cycle" by design, so
//! the fallible surface is limited to configuration handed in by the host.

use thiserror::Error;

/// The top-level error type for the `k9-*` crates.
#[derive(Debug, Error)]
pub enum K9Error {
    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `k9-*` crates.
pub type K9Result<T> = Result<T, K9Error>;
