//! The `VehicleController` trait and its two implementations.

use cb_core::{LaneChange, VehicleId, ZoneId};

use crate::idm::free_flow_accel;
use crate::{
    AccelerationBlender, Allocation, BehaviorError, BehaviorResult, LaneChangeSelector,
    SimulationAdapter, SpotAllocator, Transition, VehicleStateMachine,
};

// ── ControllerConfig ──────────────────────────────────────────────────────────

/// Tunables of [`CurbsideController`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ControllerConfig {
    /// Each vehicle's configured dwell is divided by this before the
    /// release check.  `1.0` uses dwell times as configured.
    pub dwell_time_divisor: f64,
    /// How many zones ahead of the current one the allocator plans.
    pub lookahead_zones: u32,
    /// Floor on the distance to the stop point in the approach law, m.
    pub min_approach_gap: f64,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            dwell_time_divisor: 1.0,
            lookahead_zones:    5,
            min_approach_gap:   crate::idm::MIN_GAP,
        }
    }
}

impl ControllerConfig {
    pub fn validate(&self) -> BehaviorResult<()> {
        if !self.dwell_time_divisor.is_finite() || self.dwell_time_divisor <= 0.0 {
            return Err(BehaviorError::Config(format!(
                "dwell_time_divisor must be finite and positive, got {}",
                self.dwell_time_divisor
            )));
        }
        if !self.min_approach_gap.is_finite() || self.min_approach_gap <= 0.0 {
            return Err(BehaviorError::Config(format!(
                "min_approach_gap must be finite and positive, got {}",
                self.min_approach_gap
            )));
        }
        Ok(())
    }
}

// ── ControlCommand ────────────────────────────────────────────────────────────

/// What a controller decided for one vehicle this tick.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ControlCommand {
    pub vehicle:      VehicleId,
    pub transition:   Transition,
    pub allocation:   Allocation,
    /// Assigned zone after allocation.
    pub zone:         ZoneId,
    pub acceleration: f64,
    pub lane_change:  LaneChange,
}

// ── VehicleController ─────────────────────────────────────────────────────────

/// Per-vehicle control law invoked once per tick by the host.
///
/// Implementations read the tick snapshot through the adapter, may update
/// the vehicle's state and zone, and must finish by writing an acceleration
/// and a lane-change command.
pub trait VehicleController: Send + Sync + 'static {
    fn control<A: SimulationAdapter + ?Sized>(
        &self,
        adapter: &mut A,
        vehicle: VehicleId,
    ) -> BehaviorResult<ControlCommand>;
}

// ── CurbsideController ────────────────────────────────────────────────────────

/// The curbside parking controller.
///
/// ```
/// use cb_behavior::{ControllerConfig, CurbsideController};
///
/// let controller = CurbsideController::new(ControllerConfig::default()).unwrap();
/// assert_eq!(controller.allocator().lookahead_zones(), 5);
/// ```
#[derive(Clone, Debug)]
pub struct CurbsideController {
    state_machine: VehicleStateMachine,
    allocator:     SpotAllocator,
    blender:       AccelerationBlender,
    lane_selector: LaneChangeSelector,
}

impl CurbsideController {
    pub fn new(config: ControllerConfig) -> BehaviorResult<Self> {
        config.validate()?;
        Ok(Self {
            state_machine: VehicleStateMachine::new(config.dwell_time_divisor),
            allocator:     SpotAllocator::new(config.lookahead_zones),
            blender:       AccelerationBlender::new(config.min_approach_gap),
            lane_selector: LaneChangeSelector,
        })
    }

    pub fn state_machine(&self) -> &VehicleStateMachine {
        &self.state_machine
    }

    pub fn allocator(&self) -> &SpotAllocator {
        &self.allocator
    }

    pub fn blender(&self) -> &AccelerationBlender {
        &self.blender
    }
}

impl VehicleController for CurbsideController {
    fn control<A: SimulationAdapter + ?Sized>(
        &self,
        adapter: &mut A,
        vehicle: VehicleId,
    ) -> BehaviorResult<ControlCommand> {
        adapter.update_dwell_elapsed(vehicle);

        let transition = self.state_machine.advance(adapter, vehicle);

        let allocation = if transition.to.is_approaching() {
            self.allocator.allocate(adapter, vehicle)
        } else {
            Allocation::NotApplicable
        };

        let acceleration = self.blender.compute(&*adapter, vehicle)?;
        adapter.apply_acceleration(vehicle, acceleration);
        let lane_change = self.lane_selector.apply(adapter, vehicle);

        let command = ControlCommand {
            vehicle,
            transition,
            allocation,
            zone: adapter.get_zone(vehicle),
            acceleration,
            lane_change,
        };
        log::trace!(
            "{vehicle}: {} zone {} a = {acceleration:.3} lane {lane_change}",
            transition.to, command.zone.0
        );
        Ok(command)
    }
}

// ── FreeFlowController ────────────────────────────────────────────────────────

/// Through traffic: pure car following in the current lane, no parking.
///
/// The state tag is left untouched.
#[derive(Copy, Clone, Debug, Default)]
pub struct FreeFlowController;

impl VehicleController for FreeFlowController {
    fn control<A: SimulationAdapter + ?Sized>(
        &self,
        adapter: &mut A,
        vehicle: VehicleId,
    ) -> BehaviorResult<ControlCommand> {
        let state = adapter.get_state(vehicle);
        let acceleration = free_flow_accel(
            &adapter.get_driver(vehicle),
            adapter.get_speed(vehicle),
            adapter.get_leader(vehicle),
        );
        if !acceleration.is_finite() {
            return Err(BehaviorError::NumericFault { vehicle, value: acceleration });
        }
        adapter.apply_acceleration(vehicle, acceleration);
        adapter.apply_lane_change(vehicle, LaneChange::Keep);
        Ok(ControlCommand {
            vehicle,
            transition: Transition { from: state, to: state },
            allocation: Allocation::NotApplicable,
            zone: adapter.get_zone(vehicle),
            acceleration,
            lane_change: LaneChange::Keep,
        })
    }
}
