//! `cb-sim` — tick loop orchestrator for the curbside parking simulator.
//!
//! # Three-phase tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Spawn    — drain arrivals due this tick onto `inflow`; an arrival
//!                whose entry point is blocked is pushed to the next tick.
//!   ② Control  — for each active vehicle in ascending VehicleId order, run
//!                VehicleController::control through a StoreAdapter.
//!   ③ Apply    — KinematicsEngine integrates the commands; vehicles that
//!                ran off `outflow` are retired.
//! ```
//!
//! The control phase is strictly sequential.  Zone and state writes made for
//! one vehicle are visible to every vehicle controlled after it in the same
//! tick, but positions and lanes only change in the apply phase.  Two
//! vehicles may therefore still target the same free zone in one tick; the
//! outcome depends only on their ids and is re-resolved the next tick.
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use cb_behavior::{ControllerConfig, CurbsideController};
//! use cb_core::SimConfig;
//! use cb_corridor::{Corridor, CorridorConfig};
//! use cb_sim::{NoopObserver, SimBuilder};
//! use cb_vehicle::VehicleStoreBuilder;
//!
//! let corridor = Corridor::new(CorridorConfig::default())?;
//! let store = VehicleStoreBuilder::new(arrivals.len()).build()?;
//! let controller = CurbsideController::new(ControllerConfig::default())?;
//! let mut sim = SimBuilder::new(SimConfig::default(), corridor, store, controller)
//!     .arrivals(arrivals)
//!     .build()?;
//! sim.run(&mut NoopObserver)?;
//! ```

pub mod adapter;
pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;

#[cfg(test)]
mod tests;

pub use adapter::StoreAdapter;
pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, TickStats};
pub use sim::Sim;
