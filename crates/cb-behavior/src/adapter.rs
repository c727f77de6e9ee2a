//! The host simulator boundary.

use cb_core::{DriverParams, LaneChange, ParkingState, VehicleId, ZoneId};
use cb_corridor::{Corridor, CorridorEdge};

use crate::Leader;

/// Everything the controller reads from and writes to the host simulator.
///
/// Reads reflect the host's state at the start of the current tick.  Writes
/// to `state` and `zone` are visible to later reads in the same tick;
/// acceleration and lane-change commands are only applied by the host after
/// every vehicle has been controlled.
///
/// The only view of *other* vehicles is [`get_ids_on_edge`][Self::get_ids_on_edge]
/// plus the per-vehicle getters, so occupancy queries never depend on the
/// host's internal storage.
pub trait SimulationAdapter {
    /// Static corridor geometry (zone count, zone length, lanes, speed limit).
    fn corridor(&self) -> &Corridor;

    fn get_state(&self, vehicle: VehicleId) -> ParkingState;
    fn set_state(&mut self, vehicle: VehicleId, state: ParkingState);

    fn get_edge(&self, vehicle: VehicleId) -> CorridorEdge;
    fn get_lane(&self, vehicle: VehicleId) -> u8;
    /// Distance from the start of the current edge, m.
    fn get_position(&self, vehicle: VehicleId) -> f64;
    /// Current speed, m/s.
    fn get_speed(&self, vehicle: VehicleId) -> f64;

    fn get_zone(&self, vehicle: VehicleId) -> ZoneId;
    fn set_zone(&mut self, vehicle: VehicleId, zone: ZoneId);

    /// Active vehicles currently on `edge`, in ascending id order.
    fn get_ids_on_edge(&self, edge: CorridorEdge) -> Vec<VehicleId>;

    /// Advance the dwell clock by one tick.  A no-op unless the vehicle is
    /// `Parked` and stationary.
    fn update_dwell_elapsed(&mut self, vehicle: VehicleId);
    fn get_dwell_elapsed(&self, vehicle: VehicleId) -> f64;
    /// Configured total dwell, s (before any divisor is applied).
    fn get_dwell_required(&self, vehicle: VehicleId) -> f64;

    /// Car-following constants for `vehicle`.
    fn get_driver(&self, vehicle: VehicleId) -> DriverParams;
    /// The vehicle ahead in the same lane, if the host can see one.
    fn get_leader(&self, vehicle: VehicleId) -> Option<Leader>;

    fn apply_acceleration(&mut self, vehicle: VehicleId, accel: f64);
    fn apply_lane_change(&mut self, vehicle: VehicleId, change: LaneChange);
}
