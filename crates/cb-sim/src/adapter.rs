//! `StoreAdapter` — the `SimulationAdapter` the tick loop hands to controllers.

use cb_behavior::{Leader, SimulationAdapter};
use cb_core::{DriverParams, LaneChange, ParkingState, VehicleId, ZoneId};
use cb_corridor::{Corridor, CorridorEdge};
use cb_mobility::KinematicsEngine;
use cb_vehicle::VehicleStore;

/// Adapts the SoA roster plus the kinematics engine to the controller's
/// view of the host.
///
/// Lives for the duration of one vehicle's control call.  Commands land in
/// `accel_cmd` / `lane_cmd` and only take effect in the apply phase.
pub struct StoreAdapter<'a> {
    store:  &'a mut VehicleStore,
    engine: &'a KinematicsEngine,
}

impl<'a> StoreAdapter<'a> {
    pub fn new(store: &'a mut VehicleStore, engine: &'a KinematicsEngine) -> Self {
        Self { store, engine }
    }
}

impl SimulationAdapter for StoreAdapter<'_> {
    fn corridor(&self) -> &Corridor {
        self.engine.corridor()
    }

    fn get_state(&self, vehicle: VehicleId) -> ParkingState {
        self.store.state[vehicle.index()]
    }

    fn set_state(&mut self, vehicle: VehicleId, state: ParkingState) {
        self.store.state[vehicle.index()] = state;
    }

    fn get_edge(&self, vehicle: VehicleId) -> CorridorEdge {
        self.store.edge[vehicle.index()]
    }

    fn get_lane(&self, vehicle: VehicleId) -> u8 {
        self.store.lane[vehicle.index()]
    }

    fn get_position(&self, vehicle: VehicleId) -> f64 {
        self.store.position[vehicle.index()]
    }

    fn get_speed(&self, vehicle: VehicleId) -> f64 {
        self.store.speed[vehicle.index()]
    }

    fn get_zone(&self, vehicle: VehicleId) -> ZoneId {
        self.store.zone[vehicle.index()]
    }

    fn set_zone(&mut self, vehicle: VehicleId, zone: ZoneId) {
        self.store.zone[vehicle.index()] = zone;
    }

    fn get_ids_on_edge(&self, edge: CorridorEdge) -> Vec<VehicleId> {
        self.store.ids_on_edge(edge)
    }

    fn update_dwell_elapsed(&mut self, vehicle: VehicleId) {
        self.engine.accumulate_dwell(&mut *self.store, vehicle);
    }

    fn get_dwell_elapsed(&self, vehicle: VehicleId) -> f64 {
        self.store.dwell_elapsed[vehicle.index()]
    }

    fn get_dwell_required(&self, vehicle: VehicleId) -> f64 {
        self.store.dwell_required[vehicle.index()]
    }

    fn get_driver(&self, vehicle: VehicleId) -> DriverParams {
        self.store.driver[vehicle.index()]
    }

    fn get_leader(&self, vehicle: VehicleId) -> Option<Leader> {
        self.engine.leader(&*self.store, vehicle)
    }

    fn apply_acceleration(&mut self, vehicle: VehicleId, accel: f64) {
        self.store.accel_cmd[vehicle.index()] = accel;
    }

    fn apply_lane_change(&mut self, vehicle: VehicleId, change: LaneChange) {
        self.store.lane_cmd[vehicle.index()] = change;
    }
}
