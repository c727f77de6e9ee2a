//! Longitudinal command: free flow far from the zone, a blend toward a
//! controlled stop near it.

use cb_core::{DriverParams, ParkingState, VehicleId};

use crate::idm::{approach_accel, free_flow_accel};
use crate::{BehaviorError, BehaviorResult, Leader, SimulationAdapter};

/// Blend window, in zone lengths.
pub const SLOW_WINDOW_ZONES: f64 = 5.0;

/// Computes the acceleration command from state and remaining distance.
///
/// With `L = 5 · zone_length` and `gap` the signed distance to the stop
/// point, an approaching vehicle gets
///
/// ```text
/// a = a_free                                     if gap > L
/// a = (g · a_free + (L − g) · a_ctrl(g)) / L     otherwise, g = max(gap, min_gap)
/// ```
///
/// which is continuous at `gap == L`.  `Parked` vehicles get 0; `Outflow`
/// vehicles and vehicles on a collector edge get `a_free`.
#[derive(Copy, Clone, Debug)]
pub struct AccelerationBlender {
    min_gap: f64,
}

impl Default for AccelerationBlender {
    fn default() -> Self {
        Self { min_gap: crate::idm::MIN_GAP }
    }
}

impl AccelerationBlender {
    pub fn new(min_gap: f64) -> Self {
        Self { min_gap }
    }

    #[inline]
    pub fn min_gap(&self) -> f64 {
        self.min_gap
    }

    /// Width of the blend window for a corridor with zones `zone_length` long.
    #[inline]
    pub fn slow_window(zone_length: f64) -> f64 {
        SLOW_WINDOW_ZONES * zone_length
    }

    /// Blend `a_free` with the controlled approach at `gap` inside a window
    /// of width `slow_window`.
    pub fn blend(&self, params: &DriverParams, speed: f64, a_free: f64, gap: f64, slow_window: f64) -> f64 {
        if gap > slow_window {
            return a_free;
        }
        let g = gap.max(self.min_gap);
        let a_ctrl = approach_accel(params, speed, g);
        (g * a_free + (slow_window - g) * a_ctrl) / slow_window
    }

    /// Command for a vehicle in `state`.
    ///
    /// `approach_gap` is `None` on a collector edge.
    pub fn command(
        &self,
        state:        ParkingState,
        params:       &DriverParams,
        speed:        f64,
        leader:       Option<Leader>,
        approach_gap: Option<f64>,
        zone_length:  f64,
    ) -> f64 {
        match state {
            ParkingState::Parked => 0.0,
            ParkingState::Outflow => free_flow_accel(params, speed, leader),
            ParkingState::Inflow | ParkingState::Slowing | ParkingState::Parking => {
                let a_free = free_flow_accel(params, speed, leader);
                match approach_gap {
                    Some(gap) => self.blend(params, speed, a_free, gap, Self::slow_window(zone_length)),
                    None => a_free,
                }
            }
        }
    }

    /// Read everything for `vehicle` from `adapter` and compute its command.
    ///
    /// Fails with [`BehaviorError::NumericFault`] rather than emit a
    /// non-finite acceleration.
    pub fn compute<A: SimulationAdapter + ?Sized>(&self, adapter: &A, vehicle: VehicleId) -> BehaviorResult<f64> {
        let corridor = adapter.corridor();
        let approach_gap = corridor.approach_gap(
            adapter.get_edge(vehicle),
            adapter.get_position(vehicle),
            adapter.get_zone(vehicle),
        );
        let accel = self.command(
            adapter.get_state(vehicle),
            &adapter.get_driver(vehicle),
            adapter.get_speed(vehicle),
            adapter.get_leader(vehicle),
            approach_gap,
            corridor.zone_length(),
        );
        if accel.is_finite() {
            Ok(accel)
        } else {
            Err(BehaviorError::NumericFault { vehicle, value: accel })
        }
    }
}
