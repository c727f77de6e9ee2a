//! The `Sim` struct and its tick loop.

use cb_behavior::{SpotAllocator, VehicleController};
use cb_core::{ParkingState, SimClock, SimConfig, Tick, VEHICLE_LENGTH};
use cb_corridor::CorridorEdge;
use cb_demand::{Arrival, ArrivalQueue};
use cb_mobility::KinematicsEngine;
use cb_vehicle::{Spawn, VehicleStore};

use crate::{SimObserver, SimResult, StoreAdapter, TickStats};

/// Lane new vehicles enter `inflow` in.
const ENTRY_LANE: u8 = 0;

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<C>` holds all simulation state and drives the three-phase tick loop:
///
/// 1. **Spawn**: arrivals due this tick enter `inflow` at position 0.  An
///    arrival is deferred to the next tick while another vehicle is within
///    one vehicle length plus its jam distance of the entry point.
/// 2. **Control** (sequential, ascending `VehicleId`): the controller reads
///    and writes the roster through a [`StoreAdapter`].
/// 3. **Apply**: the [`KinematicsEngine`] integrates every command; vehicles
///    past the end of `outflow` are retired.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<C: VehicleController> {
    /// Global configuration (step length, horizon, seed, …).
    pub config: SimConfig,

    /// Simulation clock: the current tick and its simulated time.
    pub clock: SimClock,

    /// Vehicle roster (SoA arrays).
    pub store: VehicleStore,

    /// Host kinematics; owns the corridor geometry.
    pub engine: KinematicsEngine,

    /// The control law.  Called once per active vehicle per tick.
    pub controller: C,

    /// Arrivals not yet on the corridor, keyed by the tick they are due.
    pub arrivals: ArrivalQueue,

    /// Speed at which vehicles enter `inflow`, m/s.
    pub entry_speed: f64,
}

impl<C: VehicleController> Sim<C> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    ///
    /// Calls observer hooks at every tick boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            self.step(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step(observer)?;
        }
        Ok(())
    }

    /// `true` once every arrival has entered and left the corridor.
    pub fn is_drained(&self) -> bool {
        self.arrivals.is_empty() && self.store.active_count() == 0
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let stats = self.process_tick(now, observer)?;
        observer.on_tick_end(now, &stats);
        if self.config.output_interval_ticks > 0
            && now.0.is_multiple_of(self.config.output_interval_ticks)
        {
            observer.on_snapshot(now, &self.store, self.engine.corridor());
        }
        self.clock.advance();
        Ok(())
    }

    fn process_tick<O: SimObserver>(&mut self, now: Tick, observer: &mut O) -> SimResult<TickStats> {
        let mut stats = TickStats::default();

        // ── Phase 1: spawn due arrivals ───────────────────────────────────
        for arrival in self.arrivals.drain_due(now) {
            if self.entry_blocked(&arrival) {
                log::debug!("{now}: entry blocked, deferring {}", arrival.vehicle);
                self.arrivals.push(now.offset(1), arrival);
                stats.deferred += 1;
                continue;
            }
            self.spawn(&arrival)?;
            stats.spawned += 1;
        }

        // ── Phase 2: control (sequential, ascending id) ───────────────────
        let active: Vec<_> = self.store.active_ids().collect();
        for vehicle in active {
            let mut adapter = StoreAdapter::new(&mut self.store, &self.engine);
            let command = self.controller.control(&mut adapter, vehicle)?;
            if command.transition.changed() {
                stats.transitions += 1;
                observer.on_state_change(now, vehicle, command.transition);
            }
        }

        // ── Phase 3: apply commands, retire exits ─────────────────────────
        for vehicle in self.engine.step(&mut self.store)? {
            log::debug!("{now}: {vehicle} left the corridor");
            observer.on_vehicle_exit(now, vehicle);
            self.store.retire(vehicle)?;
            stats.exited += 1;
        }

        stats.active = self.store.active_count();
        stats.parked = self.store.count_in_state(ParkingState::Parked);
        Ok(stats)
    }

    /// `true` while another vehicle sits too close to the entry point for
    /// `arrival` to enter without overlapping it.
    fn entry_blocked(&self, arrival: &Arrival) -> bool {
        let clearance = VEHICLE_LENGTH + self.store.driver[arrival.vehicle.index()].s0;
        self.store
            .ids_on_edge(CorridorEdge::Inflow)
            .into_iter()
            .any(|other| self.store.position[other.index()] < clearance)
    }

    fn spawn(&mut self, arrival: &Arrival) -> SimResult<()> {
        let zone = SpotAllocator::initial_zone(self.engine.corridor(), arrival.desired_zone);
        self.store.spawn(
            arrival.vehicle,
            Spawn {
                edge:           CorridorEdge::Inflow,
                lane:           ENTRY_LANE,
                position:       0.0,
                speed:          self.entry_speed,
                zone,
                dwell_required: arrival.dwell_secs,
            },
        )?;
        log::debug!(
            "{}: {} entered, zone {} (wanted {}), dwell {:.1} s",
            self.clock.current_tick, arrival.vehicle, zone.0, arrival.desired_zone.0, arrival.dwell_secs
        );
        Ok(())
    }
}
