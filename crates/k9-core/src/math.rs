//! 3-D vector, pose, and angular-smoothing primitives.
//!
//! `Vec3` uses `f32` throughout — positions in this engine are game-world
//! units at meter-ish scale, so single precision is plenty and keeps the
//! per-tick math cheap.  Distance comparisons prefer the squared forms to
//! avoid square roots in hot loops.

// ── Vec3 ──────────────────────────────────────────────────────────────────────

/// A position or offset in world space.  Y is up; yaw rotates about Y.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Vec3 = Vec3 { x: 0.0, y: 0.0, z: 0.0 };

    #[inline]
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn length_sqr(self) -> f32 {
        self.x * self.x + self.y * self.y + self.z * self.z
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_sqr().sqrt()
    }

    /// Squared distance — use for radius comparisons against `r * r`.
    #[inline]
    pub fn distance_sqr(self, other: Vec3) -> f32 {
        (self - other).length_sqr()
    }

    #[inline]
    pub fn distance(self, other: Vec3) -> f32 {
        self.distance_sqr(other).sqrt()
    }

    /// Copy with the Y component replaced (ground-plane projections).
    #[inline]
    pub fn with_y(self, y: f32) -> Vec3 {
        Vec3 { y, ..self }
    }

    #[inline]
    pub fn scale(self, s: f32) -> Vec3 {
        Vec3::new(self.x * s, self.y * s, self.z * s)
    }

    /// Heading of this offset in degrees about the Y axis (0° = +Z).
    ///
    /// Matches the convention used by [`Pose::yaw_deg`].
    #[inline]
    pub fn yaw_deg(self) -> f32 {
        self.x.atan2(self.z).to_degrees()
    }
}

impl std::ops::Add for Vec3 {
    type Output = Vec3;
    #[inline]
    fn add(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl std::ops::Sub for Vec3 {
    type Output = Vec3;
    #[inline]
    fn sub(self, rhs: Vec3) -> Vec3 {
        Vec3::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl std::fmt::Display for Vec3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

// ── Pose ──────────────────────────────────────────────────────────────────────

/// A position plus facing — enough of an entity transform to compute
/// local-frame offsets like the heel point.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    /// Facing about the Y axis, degrees; 0° looks down +Z.
    pub yaw_deg:  f32,
}

impl Pose {
    #[inline]
    pub fn new(position: Vec3, yaw_deg: f32) -> Self {
        Self { position, yaw_deg }
    }

    /// Unit vector the pose is facing.
    #[inline]
    pub fn forward(self) -> Vec3 {
        let yaw = self.yaw_deg.to_radians();
        Vec3::new(yaw.sin(), 0.0, yaw.cos())
    }

    /// Unit vector to the pose's right.
    #[inline]
    pub fn right(self) -> Vec3 {
        let yaw = self.yaw_deg.to_radians();
        Vec3::new(yaw.cos(), 0.0, -yaw.sin())
    }

    /// World-space point for a local-frame offset (x = right, z = forward).
    pub fn local_offset(self, offset: Vec3) -> Vec3 {
        self.position
            + self.right().scale(offset.x)
            + Vec3::new(0.0, offset.y, 0.0)
            + self.forward().scale(offset.z)
    }
}

// ── Scalar helpers ────────────────────────────────────────────────────────────

/// Map `value` from `[from_min, from_max]` onto `[to_min, to_max]`, clamped.
///
/// Degenerate source ranges return `to_min`.
pub fn remap(value: f32, from_min: f32, from_max: f32, to_min: f32, to_max: f32) -> f32 {
    if (from_max - from_min).abs() <= f32::EPSILON {
        return to_min;
    }
    let t = ((value - from_min) / (from_max - from_min)).clamp(0.0, 1.0);
    to_min + (to_max - to_min) * t
}

/// Shortest signed angular difference `target - current`, in degrees,
/// normalised to `(-180, 180]`.
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let mut delta = (target - current).rem_euclid(360.0);
    if delta > 180.0 {
        delta -= 360.0;
    }
    delta
}

/// Critically damped angular smoothing toward `target` (degrees).
///
/// `velocity` carries state between calls (degrees/second).  The caller is
/// responsible for snapping to `target` once the remaining delta and the
/// velocity fall below its jitter thresholds.
pub fn smooth_damp_angle(
    current:     f32,
    target:      f32,
    velocity:    &mut f32,
    smooth_time: f32,
    max_speed:   f32,
    dt:          f32,
) -> f32 {
    let target = current + delta_angle(current, target);

    let smooth_time = smooth_time.max(1e-4);
    let omega = 2.0 / smooth_time;
    let x = omega * dt;
    // Padé-style approximation of e^-x, stable for the step sizes we see.
    let exp = 1.0 / (1.0 + x + 0.48 * x * x + 0.235 * x * x * x);

    let max_change = max_speed * smooth_time;
    let change = (current - target).clamp(-max_change, max_change);
    let clamped_target = current - change;

    let temp = (*velocity + omega * change) * dt;
    *velocity = (*velocity - omega * temp) * exp;
    let mut output = clamped_target + (change + temp) * exp;

    // Prevent overshooting past the true target.
    if (target - current > 0.0) == (output > target) {
        output = target;
        *velocity = if dt > 0.0 { (output - target) / dt } else { 0.0 };
    }
    output
}
