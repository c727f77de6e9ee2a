//! Typed identifiers for vehicles and parking zones.
//!
//! A `VehicleId` is a slot index into the roster's column `Vec`s; a `ZoneId`
//! counts parking zones from the upstream end of the corridor.

use std::fmt;

/// Newtype over an integer index with `INVALID`, `index()` and conversions.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Placeholder for an unset slot.
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Position in the roster columns.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
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
    /// Index of a vehicle slot in the SoA roster.
    pub struct VehicleId(u32);
}

typed_id! {
    /// Index of a parking zone, `0..N` in driving order.
    pub struct ZoneId(u32);
}

impl ZoneId {
    /// Apply a signed offset, returning `None` if the result would be negative.
    ///
    /// No upper bound is checked here; the zone count lives in the corridor.
    #[inline]
    pub fn offset(self, delta: i32) -> Option<ZoneId> {
        let shifted = i64::from(self.0) + i64::from(delta);
        u32::try_from(shifted).ok().map(ZoneId)
    }

    /// The zone immediately upstream, or `None` for zone 0.
    #[inline]
    pub fn previous(self) -> Option<ZoneId> {
        self.0.checked_sub(1).map(ZoneId)
    }
}
