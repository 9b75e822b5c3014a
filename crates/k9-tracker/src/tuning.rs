//! Tracker tunables.

use k9_core::Vec3;
use k9_world::NavTuning;

/// Behavior parameters for a tracking agent.
///
/// Defaults give a close heel on the officer's right, a 10 Hz behavior tick
/// that starts one second after spawn, and a four-second stuck fuse.
#[derive(Clone, Debug)]
pub struct TrackerTuning {
    /// Heel slack — the agent is "in formation" within this distance.
    pub follow_distance: f32,

    /// Fallback movement speed when the officer's own speed is unreadable.
    pub base_speed: f32,

    /// Beyond this distance from the heel point the agent gets a catch-up
    /// speed boost.
    pub max_distance: f32,

    /// Catch-up multiplier applied to the matched officer speed.
    pub catchup_multiplier: f32,

    /// Seconds between destination recomputes, nested in the behavior tick.
    pub path_update_interval: f32,

    /// Seconds of no displacement (while far from the officer) before a warp.
    pub stuck_check_secs: f32,

    /// Behavior tick period and its one-shot start delay.
    pub tick_interval:    f32,
    pub tick_start_delay: f32,

    /// Heel point in the officer's local frame (x = right, z = forward).
    pub heel_offset: Vec3,

    /// Nav-mesh sample radii for spawn placement, path targets, and warps.
    pub spawn_sample_radius: f32,
    pub path_sample_radius:  f32,
    pub warp_sample_radius:  f32,

    /// Physical nav-agent parameters handed to the nav capability.
    pub nav: NavTuning,

    /// Gate for high-frequency debug log lines.
    pub debug_logging: bool,
}

impl Default for TrackerTuning {
    fn default() -> Self {
        Self {
            follow_distance:     1.0,
            base_speed:          4.2,
            max_distance:        10.0,
            catchup_multiplier:  1.2,
            path_update_interval: 0.35,
            stuck_check_secs:    4.0,
            tick_interval:       0.1,
            tick_start_delay:    1.0,
            heel_offset:         Vec3::new(0.9, 0.0, -0.6),
            spawn_sample_radius: 2.0,
            path_sample_radius:  1.5,
            warp_sample_radius:  2.5,
            nav:                 NavTuning::default(),
            debug_logging:       false,
        }
    }
}
