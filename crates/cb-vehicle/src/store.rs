//! Core vehicle storage: `VehicleStore` (SoA data).

use cb_core::{DriverParams, LaneChange, ParkingState, VehicleId, ZoneId};
use cb_corridor::CorridorEdge;

use crate::{VehicleError, VehicleResult};

// ── Spawn ─────────────────────────────────────────────────────────────────────

/// Everything needed to put a vehicle on the corridor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Spawn {
    pub edge:           CorridorEdge,
    pub lane:           u8,
    pub position:       f64,
    pub speed:          f64,
    /// First assigned zone, already resolved against the corridor.
    pub zone:           ZoneId,
    /// Configured total dwell time, s.
    pub dwell_required: f64,
}

// ── VehicleStore ──────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all vehicle state.
///
/// Every `Vec` field has exactly `capacity()` elements; the `VehicleId` value
/// is the index into all of them:
///
/// ```ignore
/// let v = store.speed[vehicle.index()];  // O(1), cache-friendly
/// ```
///
/// Fields are `pub` for direct indexed access on hot paths.  Only the
/// simulation host writes the kinematic fields (`edge` … `speed`); the
/// controller writes `state`, `zone` and the two command arrays through the
/// adapter.
pub struct VehicleStore {
    /// `true` while the slot holds a vehicle on the corridor.
    pub active: Vec<bool>,

    // ── Behavioral state ──────────────────────────────────────────────────
    pub state: Vec<ParkingState>,

    /// Assigned parking zone.
    pub zone: Vec<ZoneId>,

    // ── Kinematic state (host-owned) ──────────────────────────────────────
    pub edge: Vec<CorridorEdge>,

    /// Lane index on `edge`; 0 is the curb lane.
    pub lane: Vec<u8>,

    /// Distance from the start of `edge`, m.
    pub position: Vec<f64>,

    /// Current speed, m/s.
    pub speed: Vec<f64>,

    // ── Dwell bookkeeping ─────────────────────────────────────────────────
    /// Seconds spent stationary while `Parked`.
    pub dwell_elapsed: Vec<f64>,

    /// Configured total dwell, s.
    pub dwell_required: Vec<f64>,

    // ── Static per-vehicle config ─────────────────────────────────────────
    pub driver: Vec<DriverParams>,

    // ── Commands written during the control phase ─────────────────────────
    pub accel_cmd: Vec<f64>,
    pub lane_cmd: Vec<LaneChange>,
}

impl VehicleStore {
    /// Number of slots (active or not).
    #[inline]
    pub fn capacity(&self) -> usize {
        self.active.len()
    }

    /// `true` if the roster has no slots at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    #[inline]
    pub fn is_active(&self, vehicle: VehicleId) -> bool {
        self.active.get(vehicle.index()).copied().unwrap_or(false)
    }

    /// Number of vehicles currently on the corridor.
    pub fn active_count(&self) -> usize {
        self.active.iter().filter(|&&a| a).count()
    }

    /// Iterator over all slot ids in ascending index order.
    pub fn vehicle_ids(&self) -> impl Iterator<Item = VehicleId> + '_ {
        (0..self.capacity() as u32).map(VehicleId)
    }

    /// Active vehicle ids in ascending index order.
    pub fn active_ids(&self) -> impl Iterator<Item = VehicleId> + '_ {
        self.vehicle_ids().filter(|&v| self.active[v.index()])
    }

    /// Active vehicles currently on `edge`, ascending by id.
    pub fn ids_on_edge(&self, edge: CorridorEdge) -> Vec<VehicleId> {
        self.active_ids()
            .filter(|&v| self.edge[v.index()] == edge)
            .collect()
    }

    /// Number of vehicles in `state`.
    pub fn count_in_state(&self, state: ParkingState) -> usize {
        self.active_ids()
            .filter(|&v| self.state[v.index()] == state)
            .count()
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Activate slot `vehicle` with a fresh `Inflow` state.
    pub fn spawn(&mut self, vehicle: VehicleId, spawn: Spawn) -> VehicleResult<()> {
        let i = self.slot(vehicle)?;
        if self.active[i] {
            return Err(VehicleError::AlreadyActive(vehicle));
        }
        self.active[i]         = true;
        self.state[i]          = ParkingState::Inflow;
        self.zone[i]           = spawn.zone;
        self.edge[i]           = spawn.edge;
        self.lane[i]           = spawn.lane;
        self.position[i]       = spawn.position;
        self.speed[i]          = spawn.speed;
        self.dwell_elapsed[i]  = 0.0;
        self.dwell_required[i] = spawn.dwell_required;
        self.accel_cmd[i]      = 0.0;
        self.lane_cmd[i]       = LaneChange::Keep;
        Ok(())
    }

    /// Deactivate `vehicle` and reset every per-vehicle field.
    ///
    /// Driver constants are static config and survive a retire.
    pub fn retire(&mut self, vehicle: VehicleId) -> VehicleResult<()> {
        let i = self.slot(vehicle)?;
        self.active[i]         = false;
        self.state[i]          = ParkingState::Inflow;
        self.zone[i]           = ZoneId::INVALID;
        self.edge[i]           = CorridorEdge::Inflow;
        self.lane[i]           = 0;
        self.position[i]       = 0.0;
        self.speed[i]          = 0.0;
        self.dwell_elapsed[i]  = 0.0;
        self.dwell_required[i] = 0.0;
        self.accel_cmd[i]      = 0.0;
        self.lane_cmd[i]       = LaneChange::Keep;
        Ok(())
    }

    fn slot(&self, vehicle: VehicleId) -> VehicleResult<usize> {
        let i = vehicle.index();
        if i >= self.capacity() {
            return Err(VehicleError::OutOfRange { id: vehicle, capacity: self.capacity() });
        }
        Ok(i)
    }

    // ── Package-private constructor used by VehicleStoreBuilder ───────────

    pub(crate) fn new(capacity: usize, driver: Vec<DriverParams>) -> Self {
        Self {
            active:         vec![false; capacity],
            state:          vec![ParkingState::Inflow; capacity],
            zone:           vec![ZoneId::INVALID; capacity],
            edge:           vec![CorridorEdge::Inflow; capacity],
            lane:           vec![0; capacity],
            position:       vec![0.0; capacity],
            speed:          vec![0.0; capacity],
            dwell_elapsed:  vec![0.0; capacity],
            dwell_required: vec![0.0; capacity],
            driver,
            accel_cmd:      vec![0.0; capacity],
            lane_cmd:       vec![LaneChange::Keep; capacity],
        }
    }
}
