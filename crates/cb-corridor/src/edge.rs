//! Corridor edge identifiers.

use std::fmt;
use std::str::FromStr;

use cb_core::ZoneId;

use crate::CorridorError;

/// One directed edge of the corridor.
///
/// Ordering follows driving order: `Inflow < Parking(0) < … < Outflow`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CorridorEdge {
    /// Collector edge feeding the first parking zone.
    Inflow,
    /// The curbside edge of one parking zone.
    Parking(ZoneId),
    /// Collector edge draining the last parking zone.
    Outflow,
}

impl CorridorEdge {
    /// Zone served by this edge, or `None` on the collector edges.
    #[inline]
    pub fn zone(self) -> Option<ZoneId> {
        match self {
            CorridorEdge::Parking(zone) => Some(zone),
            CorridorEdge::Inflow | CorridorEdge::Outflow => None,
        }
    }

    /// `true` for the inflow and outflow collector edges.
    #[inline]
    pub fn is_collector(self) -> bool {
        self.zone().is_none()
    }
}

impl fmt::Display for CorridorEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorridorEdge::Inflow        => f.write_str("inflow"),
            CorridorEdge::Parking(zone) => write!(f, "parking_{}", zone.0),
            CorridorEdge::Outflow       => f.write_str("outflow"),
        }
    }
}

impl FromStr for CorridorEdge {
    type Err = CorridorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "inflow" => Ok(CorridorEdge::Inflow),
            "outflow" => Ok(CorridorEdge::Outflow),
            other => other
                .strip_prefix("parking_")
                .and_then(|n| n.parse::<u32>().ok())
                .map(|n| CorridorEdge::Parking(ZoneId(n)))
                .ok_or_else(|| CorridorError::EdgeName(s.to_owned())),
        }
    }
}
