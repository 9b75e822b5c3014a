//! Strongly typed, zero-cost identifier wrappers.
//!
//! Every external entity the engine touches — officers, subjects, stations,
//! patrol routes, nav agents — is referenced by ID, never by a held handle.
//! IDs are resolved against the owning capability each tick and treated as
//! possibly-gone, so a stale ID degrades to a `None` lookup rather than a
//! dangling reference.  All IDs are `Copy + Ord + Hash` so they work as map
//! keys without ceremony.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" — equivalent to `u32::MAX`.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Identity of one patrol assignment (officer + tracking agent pair).
    pub struct UnitId(u32);
}

typed_id! {
    /// External patrol-agent (officer) entity.  Not owned by the engine.
    pub struct OfficerId(u32);
}

typed_id! {
    /// External subject entity that may carry contraband.
    pub struct SubjectId(u32);
}

typed_id! {
    /// External exclusion-zone station.
    pub struct StationId(u32);
}

typed_id! {
    /// External foot-patrol route.
    pub struct RouteId(u32);
}

typed_id! {
    /// Handle to a navigation agent owned by the external nav capability.
    pub struct NavHandle(u32);
}
