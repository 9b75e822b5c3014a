//! Engine configuration.
//!
//! Typically loaded from a TOML/JSON file by the host and passed to the
//! fleet manager at construction.  Every option has the documented default,
//! so an empty config table is valid.

use serde::Deserialize;

use crate::{K9Error, K9Result};

/// Tunable parameters for the patrol behavior protocol.
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct K9Config {
    /// Maximum number of live units the fleet maintains.
    pub unit_count: u32,

    /// Detection range in world units.  Candidates at exactly this distance
    /// are excluded (strict comparison).
    pub sniff_radius: f32,

    /// Range at which a pursuit triggers a search (inclusive).  Convention:
    /// at most `sniff_radius`.
    pub search_radius: f32,

    /// Seconds between detection scans while a unit has no pursuit target.
    pub recheck_interval: f32,

    /// Minimum seconds before the same subject can be re-searched by the
    /// same unit.
    pub search_cooldown: f32,

    /// Multiplier applied to the officer's walk/run speed while tracking.
    /// Values below 1.0 are treated as 1.0 at the point of use.
    pub pursuit_speed_multiplier: f32,

    /// Gate for high-frequency debug log lines.  Warnings always emit.
    pub debug_logging: bool,
}

impl Default for K9Config {
    fn default() -> Self {
        Self {
            unit_count:               2,
            sniff_radius:             10.0,
            search_radius:            6.0,
            recheck_interval:         0.2,
            search_cooldown:          30.0,
            pursuit_speed_multiplier: 1.25,
            debug_logging:            false,
        }
    }
}

impl K9Config {
    /// Check the numeric options for internal consistency.
    pub fn validate(&self) -> K9Result<()> {
        fn positive(name: &str, v: f32) -> K9Result<()> {
            if v.is_finite() && v > 0.0 {
                Ok(())
            } else {
                Err(K9Error::Config(format!("{name} must be positive, got {v}")))
            }
        }

        positive("sniff_radius", self.sniff_radius)?;
        positive("search_radius", self.search_radius)?;
        positive("recheck_interval", self.recheck_interval)?;
        positive("search_cooldown", self.search_cooldown)?;
        positive("pursuit_speed_multiplier", self.pursuit_speed_multiplier)?;

        if self.search_radius > self.sniff_radius {
            return Err(K9Error::Config(format!(
                "search_radius ({}) must not exceed sniff_radius ({})",
                self.search_radius, self.sniff_radius
            )));
        }
        Ok(())
    }

    /// `sniff_radius²`, for squared-distance comparisons.
    #[inline]
    pub fn sniff_radius_sqr(&self) -> f32 {
        self.sniff_radius * self.sniff_radius
    }

    /// `search_radius²`, for squared-distance comparisons.
    #[inline]
    pub fn search_radius_sqr(&self) -> f32 {
        self.search_radius * self.search_radius
    }

    /// The speed multiplier with its 1.0 floor applied.
    #[inline]
    pub fn pursuit_multiplier(&self) -> f32 {
        self.pursuit_speed_multiplier.max(1.0)
    }
}
