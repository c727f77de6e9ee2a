//! The behavioral state tag carried by every curbside vehicle.

use std::fmt;

use crate::CoreError;

/// Discrete parking behavior of a vehicle.
///
/// The normal progression is `Inflow → Parking → Parked → Outflow`, with a
/// `Parked → Parking` re-entry when a parked vehicle starts rolling before its
/// dwell time is up.  `Outflow` is absorbing.
///
/// `Slowing` is part of the closed set so every consumer handles it, but the
/// current transition table never produces it.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ParkingState {
    /// Driving in from the collector edge; no stop planned yet.
    #[default]
    Inflow,
    /// Reserved: decelerating before committing to a zone.
    Slowing,
    /// Approaching the assigned zone and pulling to the curb.
    Parking,
    /// Stationary in the assigned zone, accumulating dwell time.
    Parked,
    /// Dwell complete; leaving the corridor.
    Outflow,
}

impl ParkingState {
    /// Every state, in tag order.
    pub const ALL: [ParkingState; 5] = [
        ParkingState::Inflow,
        ParkingState::Slowing,
        ParkingState::Parking,
        ParkingState::Parked,
        ParkingState::Outflow,
    ];

    /// Compact numeric tag (`inflow = 0 … outflow = 4`).
    #[inline]
    pub fn tag(self) -> u8 {
        match self {
            ParkingState::Inflow  => 0,
            ParkingState::Slowing => 1,
            ParkingState::Parking => 2,
            ParkingState::Parked  => 3,
            ParkingState::Outflow => 4,
        }
    }

    /// `true` while the vehicle still heads for a zone (not parked, not leaving).
    #[inline]
    pub fn is_approaching(self) -> bool {
        matches!(
            self,
            ParkingState::Inflow | ParkingState::Slowing | ParkingState::Parking
        )
    }

    /// `true` once the parking episode is over (`Parked` or `Outflow`).
    #[inline]
    pub fn has_parked(self) -> bool {
        matches!(self, ParkingState::Parked | ParkingState::Outflow)
    }

    /// Lower-case label, useful for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            ParkingState::Inflow  => "inflow",
            ParkingState::Slowing => "slowing",
            ParkingState::Parking => "parking",
            ParkingState::Parked  => "parked",
            ParkingState::Outflow => "outflow",
        }
    }
}

impl TryFrom<u8> for ParkingState {
    type Error = CoreError;

    /// Decode a raw tag.  Unknown tags are an error, never a silent default.
    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        ParkingState::ALL
            .get(tag as usize)
            .copied()
            .ok_or(CoreError::UnknownState(tag))
    }
}

impl std::str::FromStr for ParkingState {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ParkingState::ALL
            .into_iter()
            .find(|state| state.as_str() == s.trim())
            .ok_or_else(|| CoreError::Parse(format!("unknown parking state {s:?}")))
    }
}

impl fmt::Display for ParkingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
