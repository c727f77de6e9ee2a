//! `cb-behavior` — the per-vehicle curbside parking controller.
//!
//! # Crate layout
//!
//! | Module             | Contents                                                   |
//! |--------------------|------------------------------------------------------------|
//! | [`adapter`]        | `SimulationAdapter` — the host simulator boundary          |
//! | [`state_machine`]  | `VehicleStateMachine`, `StateInputs`, `Transition`         |
//! | [`allocator`]      | `SpotAllocator`, `Allocation`, `PROBE_ORDER`               |
//! | [`idm`]            | Intelligent Driver Model, `Leader`                         |
//! | [`blender`]        | `AccelerationBlender` — free flow ↔ controlled approach    |
//! | [`lane_change`]    | `LaneChangeSelector`                                       |
//! | [`controller`]     | `VehicleController`, `CurbsideController`, `FreeFlowController`, `ControllerConfig` |
//! | [`error`]          | `BehaviorError`, `BehaviorResult<T>`                       |
//!
//! # Per-tick control flow
//!
//! For each vehicle, [`CurbsideController::control`] runs:
//!
//! 1. `update_dwell_elapsed` on the adapter (no-op unless parked and stopped).
//! 2. [`VehicleStateMachine`] advances the state tag.
//! 3. [`SpotAllocator`] may reassign the target zone while the vehicle is
//!    still approaching.
//! 4. [`AccelerationBlender`] computes the longitudinal command.
//! 5. [`LaneChangeSelector`] picks the lane action.
//!
//! Steps 2–5 read the same adapter snapshot; the two commands are written
//! back at the end.  The host applies them after every vehicle has been
//! controlled.

pub mod adapter;
pub mod allocator;
pub mod blender;
pub mod controller;
pub mod error;
pub mod idm;
pub mod lane_change;
pub mod state_machine;


pub use adapter::SimulationAdapter;
pub use allocator::{Allocation, SpotAllocator, PROBE_ORDER};
pub use blender::AccelerationBlender;
pub use controller::{
    ControlCommand, ControllerConfig, CurbsideController, FreeFlowController, VehicleController,
};
pub use error::{BehaviorError, BehaviorResult};
pub use idm::Leader;
pub use lane_change::LaneChangeSelector;
pub use state_machine::{StateInputs, Transition, VehicleStateMachine};
