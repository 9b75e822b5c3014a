//! Derived visual behavior state.
//!
//! The state machine is purely observational: it is recomputed from the
//! tracking flag and movement magnitude, drives animation outputs, and has
//! no authority over any decision.

/// The tracker's visible behavior state.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum TrackerState {
    /// Stationary, not tracking.
    #[default]
    Idle,
    /// Moving in formation behind the officer.
    Following,
    /// Moving with the nose down — a pursuit is on.
    Tracking,
    /// Tracking posture while stationary (e.g. target cornered).
    TrackingIdle,
}

/// Movement magnitudes at or below this read as "stationary".
const MOVE_EPSILON: f32 = 0.05;

impl TrackerState {
    /// Derive the state from the unit's tracking flag and the current
    /// movement-speed magnitude.
    pub fn derive(tracking: bool, movement_magnitude: f32) -> Self {
        let moving = movement_magnitude > MOVE_EPSILON;
        match (tracking, moving) {
            (true, true)   => TrackerState::Tracking,
            (true, false)  => TrackerState::TrackingIdle,
            (false, true)  => TrackerState::Following,
            (false, false) => TrackerState::Idle,
        }
    }

    /// Animation output: the walk cycle plays.
    #[inline]
    pub fn is_walking(self) -> bool {
        matches!(self, TrackerState::Following | TrackerState::Tracking)
    }

    /// Animation output: the tracking posture plays.
    #[inline]
    pub fn is_tracking(self) -> bool {
        matches!(self, TrackerState::Tracking | TrackerState::TrackingIdle)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TrackerState::Idle         => "idle",
            TrackerState::Following    => "following",
            TrackerState::Tracking     => "tracking",
            TrackerState::TrackingIdle => "tracking-idle",
        }
    }
}

impl std::fmt::Display for TrackerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Animation-facing outputs refreshed by the per-frame pass.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct VisualOutput {
    /// Walk/run blend in `[0, 1]`.
    pub speed_blend: f32,
    pub walking:     bool,
    pub tracking:    bool,
}
