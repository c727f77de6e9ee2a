//! JSON scenario file.
//!
//! Every section is optional; missing fields take the library defaults, so
//! `{}` is a valid scenario (five 40 m zones, two lanes, 10 m/s).

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use cb_behavior::ControllerConfig;
use cb_core::{DriverParams, SimConfig};
use cb_corridor::CorridorConfig;
use cb_demand::DemandConfig;

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub sim:        SimConfig,
    pub corridor:   CorridorConfig,
    /// Car-following constants shared by every vehicle.
    pub driver:     DriverParams,
    pub controller: ControllerConfig,
    /// Used only when no arrivals CSV is given.
    pub demand:     DemandConfig,
    /// Speed at which vehicles enter `inflow`.  Defaults to the speed limit.
    pub entry_speed: Option<f64>,
}

impl ScenarioConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing scenario {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_takes_defaults() {
        let s: ScenarioConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(s.corridor.number_parking_zones, 5);
        assert_eq!(s.controller.lookahead_zones, 5);
        assert_eq!(s.sim.step_secs, 0.2);
        assert!(s.entry_speed.is_none());
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let s: ScenarioConfig = serde_json::from_str(
            r#"{ "corridor": { "number_parking_zones": 8 }, "controller": { "dwell_time_divisor": 2.0 } }"#,
        )
        .unwrap();
        assert_eq!(s.corridor.number_parking_zones, 8);
        assert_eq!(s.corridor.lanes, 2);
        assert_eq!(s.controller.dwell_time_divisor, 2.0);
        assert_eq!(s.controller.lookahead_zones, 5);
    }

    #[test]
    fn bundled_scenario_parses() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("scenarios/five_zones.json");
        let s = ScenarioConfig::load(&path).unwrap();
        assert_eq!(s.demand.vehicles, 8);
        assert_eq!(s.sim.output_interval_ticks, 5);
    }

    #[test]
    fn unknown_file_is_an_error() {
        assert!(ScenarioConfig::load(Path::new("/nonexistent/scenario.json")).is_err());
    }
}
