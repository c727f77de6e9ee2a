//! Discrete parking-state transitions.

use cb_core::{ParkingState, VehicleId, ZoneId, STOPPED_SPEED};
use cb_corridor::CorridorEdge;

use crate::SimulationAdapter;

/// The readings one transition is computed from.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StateInputs {
    pub state:          ParkingState,
    pub edge:           CorridorEdge,
    pub speed:          f64,
    pub zone:           ZoneId,
    pub dwell_elapsed:  f64,
    /// Dwell threshold after the configured divisor has been applied.
    pub dwell_required: f64,
}

/// One state update: `from == to` when nothing changed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub from: ParkingState,
    pub to:   ParkingState,
}

impl Transition {
    #[inline]
    pub fn changed(&self) -> bool {
        self.from != self.to
    }
}

/// Advances a vehicle's [`ParkingState`] once per tick.
///
/// | from      | condition                                                    | to        |
/// |-----------|--------------------------------------------------------------|-----------|
/// | `Inflow`  | zone is 0, or on `parking_{zone-1}` or any later parking edge | `Parking` |
/// | `Parking` | on `parking_{zone}` and speed `< 1e-3`                       | `Parked`  |
/// | `Parked`  | dwell elapsed `>=` required                                  | `Outflow` |
/// | `Parked`  | otherwise, speed `> 1e-3`                                    | `Parking` |
/// | `Outflow` | always                                                       | `Outflow` |
///
/// Any row not listed keeps the previous state.  `Slowing` is never produced;
/// a vehicle found in it is held there.
#[derive(Copy, Clone, Debug)]
pub struct VehicleStateMachine {
    dwell_time_divisor: f64,
}

impl Default for VehicleStateMachine {
    fn default() -> Self {
        Self { dwell_time_divisor: 1.0 }
    }
}

impl VehicleStateMachine {
    /// `dwell_time_divisor` scales every vehicle's configured dwell down
    /// before the `Parked → Outflow` check.  Validated by `ControllerConfig`.
    pub fn new(dwell_time_divisor: f64) -> Self {
        Self { dwell_time_divisor }
    }

    #[inline]
    pub fn dwell_time_divisor(&self) -> f64 {
        self.dwell_time_divisor
    }

    /// Pure transition function.
    pub fn next_state(inputs: &StateInputs) -> ParkingState {
        match inputs.state {
            ParkingState::Inflow => {
                if reached_approach(inputs.edge, inputs.zone) {
                    ParkingState::Parking
                } else {
                    ParkingState::Inflow
                }
            }
            ParkingState::Slowing => ParkingState::Slowing,
            ParkingState::Parking => {
                if inputs.edge == CorridorEdge::Parking(inputs.zone) && inputs.speed < STOPPED_SPEED {
                    ParkingState::Parked
                } else {
                    ParkingState::Parking
                }
            }
            ParkingState::Parked => {
                // Release wins over re-entry when both hold.
                if inputs.dwell_elapsed >= inputs.dwell_required {
                    ParkingState::Outflow
                } else if inputs.speed > STOPPED_SPEED {
                    ParkingState::Parking
                } else {
                    ParkingState::Parked
                }
            }
            ParkingState::Outflow => ParkingState::Outflow,
        }
    }

    /// Read the inputs for `vehicle` from `adapter`.
    pub fn inputs<A: SimulationAdapter + ?Sized>(&self, adapter: &A, vehicle: VehicleId) -> StateInputs {
        StateInputs {
            state:          adapter.get_state(vehicle),
            edge:           adapter.get_edge(vehicle),
            speed:          adapter.get_speed(vehicle),
            zone:           adapter.get_zone(vehicle),
            dwell_elapsed:  adapter.get_dwell_elapsed(vehicle),
            dwell_required: adapter.get_dwell_required(vehicle) / self.dwell_time_divisor,
        }
    }

    /// Compute and commit the next state for `vehicle`.
    pub fn advance<A: SimulationAdapter + ?Sized>(&self, adapter: &mut A, vehicle: VehicleId) -> Transition {
        let inputs = self.inputs(&*adapter, vehicle);
        let to = Self::next_state(&inputs);
        let transition = Transition { from: inputs.state, to };
        if transition.changed() {
            log::debug!(
                "{vehicle}: {} -> {} on {} (zone {}, v = {:.4})",
                transition.from, transition.to, inputs.edge, inputs.zone.0, inputs.speed
            );
            adapter.set_state(vehicle, to);
        }
        transition
    }
}

/// `true` once an inflowing vehicle is close enough to start its approach.
fn reached_approach(edge: CorridorEdge, zone: ZoneId) -> bool {
    if zone.0 == 0 {
        return true;
    }
    match edge.zone() {
        Some(current) => current.0 + 1 >= zone.0,
        None => false,
    }
}
