//! Plain data row types written by output backends.

use cb_core::{LaneChange, ParkingState, Tick, VehicleId};
use cb_corridor::{Corridor, CorridorEdge};
use cb_sim::TickStats;
use cb_vehicle::VehicleStore;

/// One active vehicle's kinematic and parking state at a given tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleSnapshotRow {
    pub tick:            u64,
    pub time_secs:       f64,
    pub vehicle:         u32,
    pub state:           ParkingState,
    pub edge:            CorridorEdge,
    pub lane:            u8,
    pub position:        f64,
    /// Distance from the start of `inflow`.
    pub global_position: f64,
    pub speed:           f64,
    pub zone:            u32,
    /// Acceleration commanded during the last control phase.
    pub accel:           f64,
    pub lane_change:     LaneChange,
    pub dwell_elapsed:   f64,
}

impl VehicleSnapshotRow {
    /// Snapshot `vehicle` from the store.  The caller guarantees the slot is
    /// in range.
    pub fn capture(
        tick: Tick,
        time_secs: f64,
        vehicle: VehicleId,
        store: &VehicleStore,
        corridor: &Corridor,
    ) -> Self {
        let i = vehicle.index();
        let edge = store.edge[i];
        Self {
            tick: tick.0,
            time_secs,
            vehicle: vehicle.0,
            state: store.state[i],
            edge,
            lane: store.lane[i],
            position: store.position[i],
            global_position: corridor.global_position(edge, store.position[i]),
            speed: store.speed[i],
            zone: store.zone[i].0,
            accel: store.accel_cmd[i],
            lane_change: store.lane_cmd[i],
            dwell_elapsed: store.dwell_elapsed[i],
        }
    }
}

/// Summary counters for one simulation tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:        u64,
    pub time_secs:   f64,
    pub spawned:     u64,
    pub deferred:    u64,
    pub transitions: u64,
    pub exited:      u64,
    pub active:      u64,
    pub parked:      u64,
}

impl TickSummaryRow {
    pub fn from_stats(tick: Tick, time_secs: f64, stats: &TickStats) -> Self {
        Self {
            tick: tick.0,
            time_secs,
            spawned: stats.spawned as u64,
            deferred: stats.deferred as u64,
            transitions: stats.transitions as u64,
            exited: stats.exited as u64,
            active: stats.active as u64,
            parked: stats.parked as u64,
        }
    }
}
