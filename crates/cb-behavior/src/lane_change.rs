//! Lane action per state.

use cb_core::{LaneChange, ParkingState, VehicleId};

use crate::SimulationAdapter;

/// Maps a state to a lane-change request.
///
/// Approaching vehicles head for the curb, departing vehicles pull away from
/// it, everyone else keeps their lane.  Whether the target lane exists is the
/// host's concern.
#[derive(Copy, Clone, Debug, Default)]
pub struct LaneChangeSelector;

impl LaneChangeSelector {
    pub fn select(state: ParkingState) -> LaneChange {
        match state {
            ParkingState::Inflow  => LaneChange::Keep,
            ParkingState::Slowing => LaneChange::TowardCurb,
            ParkingState::Parking => LaneChange::TowardCurb,
            ParkingState::Parked  => LaneChange::Keep,
            ParkingState::Outflow => LaneChange::AwayFromCurb,
        }
    }

    /// Select from the current state and commit the request.
    pub fn apply<A: SimulationAdapter + ?Sized>(&self, adapter: &mut A, vehicle: VehicleId) -> LaneChange {
        let change = Self::select(adapter.get_state(vehicle));
        adapter.apply_lane_change(vehicle, change);
        change
    }
}
