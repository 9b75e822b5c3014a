//! Frame-time model: tick context, monotonic clock, and accumulator timers.
//!
//! # Design
//!
//! The engine is driven by an external frame scheduler that calls `tick(dt)`
//! once per frame.  Nothing blocks or suspends — every "wait" is expressed as
//! accumulated-time state checked on the next tick, owned by the instance
//! that is waiting.  Three timer shapes cover the whole engine:
//!
//! - [`Clock`] — the monotonic "now" in seconds, advanced once per frame by
//!   its single owner and read by everyone else via [`TickCtx`].
//! - [`IntervalTimer`] — fires at most once per frame once its interval has
//!   accumulated, then resets to zero (throttled periodic work: detection
//!   scans, fleet checks).
//! - [`RepeatingTask`] — a one-shot start delay followed by a fixed repeat
//!   interval; may fire several times on a long frame so the scheduled rate
//!   is honoured on average.  Cancellation is explicit and permanent.

// ── TickCtx ───────────────────────────────────────────────────────────────────

/// Per-frame timing context passed down through every `tick` call.
///
/// Cheap to copy; built once per frame from the owning [`Clock`].
#[derive(Copy, Clone, Debug)]
pub struct TickCtx {
    /// Seconds elapsed since the previous frame.
    pub dt: f32,
    /// Monotonic engine time in seconds (after this frame's advance).
    pub now: f64,
}

impl TickCtx {
    #[inline]
    pub fn new(dt: f32, now: f64) -> Self {
        Self { dt, now }
    }
}

// ── Clock ─────────────────────────────────────────────────────────────────────

/// Monotonic engine clock.  Holds no heap data; `f64` seconds keep
/// sub-millisecond precision for years of uptime.
#[derive(Clone, Debug, Default)]
pub struct Clock {
    now: f64,
}

impl Clock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance by one frame and return the context for this frame.
    #[inline]
    pub fn advance(&mut self, dt: f32) -> TickCtx {
        self.now += dt as f64;
        TickCtx::new(dt, self.now)
    }

    #[inline]
    pub fn now(&self) -> f64 {
        self.now
    }
}

// ── IntervalTimer ─────────────────────────────────────────────────────────────

/// Accumulator timer that fires at most once per frame.
///
/// On firing the accumulator resets to zero (not `acc -= interval`), so a
/// long frame does not cause a burst of catch-up fires.  This matches the
/// throttling intent: the guarded work runs *no more often than* the
/// interval.
#[derive(Clone, Debug)]
pub struct IntervalTimer {
    interval: f32,
    acc:      f32,
}

impl IntervalTimer {
    pub fn new(interval: f32) -> Self {
        Self { interval, acc: 0.0 }
    }

    /// Accumulate `dt`; `true` if the interval elapsed this frame.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.acc += dt;
        if self.acc >= self.interval {
            self.acc = 0.0;
            true
        } else {
            false
        }
    }

    #[inline]
    pub fn interval(&self) -> f32 {
        self.interval
    }
}

// ── RepeatingTask ─────────────────────────────────────────────────────────────

/// An explicit scheduled-callback slot: start after `start_delay`, then fire
/// every `interval` seconds until cancelled.
///
/// Unlike [`IntervalTimer`], a frame longer than the interval yields multiple
/// fires, so fixed-rate behavior loops (e.g. the tracking agent's 10 Hz
/// tick) keep their average rate under uneven frame times.
#[derive(Clone, Debug)]
pub struct RepeatingTask {
    start_delay: f32,
    interval:    f32,
    acc:         f32,
    started:     bool,
    cancelled:   bool,
}

impl RepeatingTask {
    pub fn new(start_delay: f32, interval: f32) -> Self {
        Self {
            start_delay,
            interval,
            acc: 0.0,
            started: false,
            cancelled: false,
        }
    }

    /// Accumulate `dt` and return how many times the task fires this frame.
    pub fn poll(&mut self, dt: f32) -> u32 {
        if self.cancelled || self.interval <= 0.0 {
            return 0;
        }
        self.acc += dt;

        let mut fires = 0;
        if !self.started {
            if self.acc < self.start_delay {
                return 0;
            }
            self.started = true;
            self.acc -= self.start_delay;
            fires += 1;
        }
        while self.acc >= self.interval {
            self.acc -= self.interval;
            fires += 1;
        }
        fires
    }

    /// Permanently stop the task.  Subsequent `poll` calls return 0.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancelled
    }

    #[inline]
    pub fn interval(&self) -> f32 {
        self.interval
    }
}
