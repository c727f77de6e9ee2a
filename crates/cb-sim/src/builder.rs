//! Fluent builder for constructing a [`Sim`].

use std::collections::HashSet;

use cb_behavior::VehicleController;
use cb_core::SimConfig;
use cb_corridor::Corridor;
use cb_demand::{Arrival, ArrivalQueue};
use cb_mobility::KinematicsEngine;
use cb_vehicle::VehicleStore;

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<C>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — step length, horizon, seed, snapshot interval
/// - [`Corridor`] — validated geometry
/// - [`VehicleStore`] — from [`cb_vehicle::VehicleStoreBuilder`]; one slot
///   per arriving vehicle id
/// - `C: VehicleController` — the control law
///
/// # Optional inputs (have defaults)
///
/// | Method             | Default                        |
/// |--------------------|--------------------------------|
/// | `.arrivals(v)`     | No arrivals                    |
/// | `.entry_speed(v)`  | The corridor speed limit       |
pub struct SimBuilder<C: VehicleController> {
    config:      SimConfig,
    corridor:    Corridor,
    store:       VehicleStore,
    controller:  C,
    arrivals:    Vec<Arrival>,
    entry_speed: Option<f64>,
}

impl<C: VehicleController> SimBuilder<C> {
    /// Create a builder with all required inputs.
    pub fn new(config: SimConfig, corridor: Corridor, store: VehicleStore, controller: C) -> Self {
        Self {
            config,
            corridor,
            store,
            controller,
            arrivals: Vec::new(),
            entry_speed: None,
        }
    }

    /// Vehicles to feed into the corridor.  Each id must be unique and fit
    /// the roster.
    pub fn arrivals(mut self, arrivals: Vec<Arrival>) -> Self {
        self.arrivals = arrivals;
        self
    }

    /// Speed at which vehicles enter `inflow`, m/s.
    pub fn entry_speed(mut self, speed: f64) -> Self {
        self.entry_speed = Some(speed);
        self
    }

    /// Validate inputs, build the arrival queue and kinematics engine, and
    /// return a ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<C>> {
        self.config.validate()?;

        let capacity = self.store.capacity();
        let mut seen = HashSet::with_capacity(self.arrivals.len());
        for arrival in &self.arrivals {
            if arrival.vehicle.index() >= capacity {
                return Err(SimError::VehicleOutOfRange { vehicle: arrival.vehicle, capacity });
            }
            if !seen.insert(arrival.vehicle) {
                return Err(SimError::Config(format!(
                    "{} has more than one arrival",
                    arrival.vehicle
                )));
            }
        }

        let speed_limit = self.corridor.speed_limit();
        let entry_speed = self.entry_speed.unwrap_or(speed_limit);
        if !entry_speed.is_finite() || !(0.0..=speed_limit).contains(&entry_speed) {
            return Err(SimError::Config(format!(
                "entry speed {entry_speed} outside [0, {speed_limit}]"
            )));
        }

        let engine = KinematicsEngine::new(self.corridor, self.config.step_secs)?;

        Ok(Sim {
            clock:      self.config.make_clock(),
            config:     self.config,
            store:      self.store,
            engine,
            controller: self.controller,
            arrivals:   ArrivalQueue::from_arrivals(self.arrivals),
            entry_speed,
        })
    }
}
