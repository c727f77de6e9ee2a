//! One vehicle's request to enter the corridor.

use cb_core::{Tick, VehicleId, ZoneId};

/// A vehicle entering the corridor at `depart_tick`.
///
/// `desired_zone` is a preference only: it is clamped to the corridor and may
/// be reassigned by the spot allocator once the vehicle nears it.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Arrival {
    pub vehicle:      VehicleId,
    pub depart_tick:  Tick,
    pub desired_zone: ZoneId,
    /// Configured total dwell time, s.
    pub dwell_secs:   f64,
}
