//! Simulation observer trait for progress reporting and data collection.

use cb_behavior::Transition;
use cb_core::{Tick, VehicleId};
use cb_corridor::Corridor;
use cb_vehicle::VehicleStore;

/// Counters for one completed tick, passed to
/// [`SimObserver::on_tick_end`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickStats {
    /// Vehicles that entered the corridor this tick.
    pub spawned: usize,
    /// Arrivals pushed back because the entry point was blocked.
    pub deferred: usize,
    /// State changes made by the control phase.
    pub transitions: usize,
    /// Vehicles retired after leaving `outflow`.
    pub exited: usize,
    /// Vehicles on the corridor at the end of the tick.
    pub active: usize,
    /// Of those, how many are `Parked`.
    pub parked: usize,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
///         if tick.0 % self.interval == 0 {
///             println!("{tick}: {} active, {} parked", stats.active, stats.parked);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called during the control phase whenever a vehicle's state changes.
    fn on_state_change(&mut self, _tick: Tick, _vehicle: VehicleId, _transition: Transition) {}

    /// Called when a vehicle leaves the end of `outflow`, just before its
    /// slot is reset.
    fn on_vehicle_exit(&mut self, _tick: Tick, _vehicle: VehicleId) {}

    /// Called at the end of each tick.
    fn on_tick_end(&mut self, _tick: Tick, _stats: &TickStats) {}

    /// Called at snapshot intervals (every `config.output_interval_ticks` ticks).
    ///
    /// Provides read-only access to the roster and the corridor so that
    /// output writers can record a snapshot without the sim needing to know
    /// about any specific output format.
    fn on_snapshot(&mut self, _tick: Tick, _store: &VehicleStore, _corridor: &Corridor) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
