//! Seeded uniform demand.
//!
//! Vehicles arrive at a fixed headway, each wanting a zone drawn uniformly
//! from the corridor and a dwell drawn uniformly from a range.

use cb_core::{SimRng, Tick, VehicleId, ZoneId};

use crate::{Arrival, DemandError, DemandResult};

/// Parameters for [`DemandGenerator`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DemandConfig {
    /// How many vehicles to generate.
    pub vehicles: usize,
    /// Ticks between consecutive arrivals.
    pub headway_ticks: u64,
    /// Tick of the first arrival.
    pub first_tick: u64,
    /// Shortest dwell, s.
    pub min_dwell_secs: f64,
    /// Longest dwell, s.
    pub max_dwell_secs: f64,
}

impl Default for DemandConfig {
    fn default() -> Self {
        Self {
            vehicles:       5,
            headway_ticks:  25,
            first_tick:     0,
            min_dwell_secs: 10.0,
            max_dwell_secs: 30.0,
        }
    }
}

impl DemandConfig {
    pub fn validate(&self) -> DemandResult<()> {
        if !self.min_dwell_secs.is_finite()
            || !self.max_dwell_secs.is_finite()
            || self.min_dwell_secs < 0.0
            || self.max_dwell_secs < self.min_dwell_secs
        {
            return Err(DemandError::Config(format!(
                "dwell range [{}, {}] must be finite, non-negative and ordered",
                self.min_dwell_secs, self.max_dwell_secs
            )));
        }
        Ok(())
    }
}

/// Draws arrivals for a corridor with `zone_count` zones.
pub struct DemandGenerator {
    config:     DemandConfig,
    zone_count: u32,
}

impl DemandGenerator {
    pub fn new(config: DemandConfig, zone_count: u32) -> DemandResult<Self> {
        config.validate()?;
        if zone_count == 0 {
            return Err(DemandError::Config("zone_count must be at least 1".into()));
        }
        Ok(Self { config, zone_count })
    }

    /// Generate `config.vehicles` arrivals with ids `0..vehicles`.
    pub fn generate(&self, rng: &mut SimRng) -> Vec<Arrival> {
        (0..self.config.vehicles)
            .map(|i| {
                let dwell_secs = if self.config.max_dwell_secs > self.config.min_dwell_secs {
                    rng.gen_range(self.config.min_dwell_secs..=self.config.max_dwell_secs)
                } else {
                    self.config.min_dwell_secs
                };
                Arrival {
                    vehicle:      VehicleId(i as u32),
                    depart_tick:  Tick(self.config.first_tick + i as u64 * self.config.headway_ticks),
                    desired_zone: ZoneId(rng.gen_range(0..self.zone_count)),
                    dwell_secs,
                }
            })
            .collect()
    }
}
