//! `KinematicsEngine` — the apply phase of the tick.

use cb_behavior::Leader;
use cb_core::{ParkingState, VehicleId, STOPPED_SPEED};
use cb_corridor::Corridor;
use cb_vehicle::VehicleStore;

use crate::{advance_along, find_leader, integrate_speed, MobilityError, MobilityResult, Placement};

/// Applies controller commands to the roster, one tick at a time.
///
/// Owns the corridor geometry and the step length; the roster is passed in
/// so the simulation can hand the same store to the control phase.
#[derive(Clone, Debug)]
pub struct KinematicsEngine {
    corridor:  Corridor,
    step_secs: f64,
}

impl KinematicsEngine {
    pub fn new(corridor: Corridor, step_secs: f64) -> MobilityResult<Self> {
        if !step_secs.is_finite() || step_secs <= 0.0 {
            return Err(MobilityError::InvalidStep(step_secs));
        }
        Ok(Self { corridor, step_secs })
    }

    #[inline]
    pub fn corridor(&self) -> &Corridor {
        &self.corridor
    }

    #[inline]
    pub fn step_secs(&self) -> f64 {
        self.step_secs
    }

    /// The vehicle ahead of `vehicle` in its lane, if any.
    pub fn leader(&self, store: &VehicleStore, vehicle: VehicleId) -> Option<Leader> {
        find_leader(&self.corridor, store, vehicle)
    }

    /// Add one step to the dwell clock of a parked, stationary vehicle.
    pub fn accumulate_dwell(&self, store: &mut VehicleStore, vehicle: VehicleId) {
        let i = vehicle.index();
        if store.state[i] == ParkingState::Parked && store.speed[i] < STOPPED_SPEED {
            store.dwell_elapsed[i] += self.step_secs;
        }
    }

    /// Apply the pending lane-change request of `vehicle`.
    ///
    /// Returns `true` if the lane changed.  Requests for a lane the current
    /// edge does not have are dropped.
    pub fn change_lane(&self, store: &mut VehicleStore, vehicle: VehicleId) -> bool {
        let i = vehicle.index();
        let change = store.lane_cmd[i];
        let edge = store.edge[i];
        match change.target_lane(store.lane[i]) {
            Some(target) if target == store.lane[i] => false,
            Some(target) if self.corridor.has_lane(edge, target) => {
                store.lane[i] = target;
                true
            }
            _ => {
                log::trace!("{vehicle}: lane change {change} from lane {} ignored on {edge}", store.lane[i]);
                false
            }
        }
    }

    /// Integrate one step for `vehicle`.  Returns `true` if it left the
    /// corridor; its slot is then left as it was for the caller to retire.
    pub fn move_vehicle(&self, store: &mut VehicleStore, vehicle: VehicleId) -> MobilityResult<bool> {
        if !store.is_active(vehicle) {
            return Err(MobilityError::NotActive { vehicle });
        }
        let i = vehicle.index();
        if !self.corridor.contains(store.edge[i]) {
            return Err(MobilityError::OffCorridor { vehicle });
        }

        let (speed, distance) = integrate_speed(
            store.speed[i],
            store.accel_cmd[i],
            self.step_secs,
            self.corridor.speed_limit(),
        );
        store.speed[i] = speed;

        let from = Placement {
            edge:     store.edge[i],
            lane:     store.lane[i],
            position: store.position[i],
        };
        match advance_along(&self.corridor, from, distance) {
            Some(at) => {
                store.edge[i] = at.edge;
                store.lane[i] = at.lane;
                store.position[i] = at.position;
                Ok(false)
            }
            None => Ok(true),
        }
    }

    /// Apply every active vehicle's commands.  Returns the vehicles that
    /// exited, in ascending id order.
    pub fn step(&self, store: &mut VehicleStore) -> MobilityResult<Vec<VehicleId>> {
        let active: Vec<VehicleId> = store.active_ids().collect();
        let mut exited = Vec::new();
        for vehicle in active {
            self.change_lane(store, vehicle);
            if self.move_vehicle(store, vehicle)? {
                exited.push(vehicle);
            }
        }
        Ok(exited)
    }
}
