//! CSV arrival loader.
//!
//! # CSV format
//!
//! One row per vehicle.  Each `vehicle_id` may appear at most once.
//!
//! ```csv
//! vehicle_id,depart_tick,desired_zone,dwell_secs
//! 0,0,3,120
//! 1,25,7,60.5
//! ```
//!
//! `desired_zone` is not range-checked here; the simulation clamps it against
//! the corridor when the vehicle spawns.

use std::collections::HashSet;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use cb_core::{Tick, VehicleId, ZoneId};

use crate::{Arrival, DemandError};

// ── CSV record ────────────────────────────────────────────────────────────────

#[derive(Deserialize)]
struct ArrivalRecord {
    vehicle_id:   u32,
    depart_tick:  u64,
    desired_zone: u32,
    dwell_secs:   f64,
}

// ── Public API ────────────────────────────────────────────────────────────────

/// Load arrivals from a CSV file, sorted by `(depart_tick, vehicle_id)`.
pub fn load_arrivals_csv(path: &Path) -> Result<Vec<Arrival>, DemandError> {
    let file = std::fs::File::open(path).map_err(DemandError::Io)?;
    load_arrivals_reader(file)
}

/// Like [`load_arrivals_csv`] but accepts any `Read` source.
///
/// Useful for testing (pass a `std::io::Cursor`) or embedded scenarios.
pub fn load_arrivals_reader<R: Read>(reader: R) -> Result<Vec<Arrival>, DemandError> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut seen: HashSet<u32> = HashSet::new();
    let mut arrivals = Vec::new();

    for result in csv_reader.deserialize::<ArrivalRecord>() {
        let row = result.map_err(|e| DemandError::Parse(e.to_string()))?;

        if !seen.insert(row.vehicle_id) {
            return Err(DemandError::Parse(format!(
                "vehicle {} appears more than once",
                row.vehicle_id
            )));
        }
        if !row.dwell_secs.is_finite() || row.dwell_secs < 0.0 {
            return Err(DemandError::Parse(format!(
                "vehicle {}: dwell_secs must be finite and non-negative, got {}",
                row.vehicle_id, row.dwell_secs
            )));
        }

        arrivals.push(Arrival {
            vehicle:      VehicleId(row.vehicle_id),
            depart_tick:  Tick(row.depart_tick),
            desired_zone: ZoneId(row.desired_zone),
            dwell_secs:   row.dwell_secs,
        });
    }

    arrivals.sort_by_key(|a| (a.depart_tick, a.vehicle));
    Ok(arrivals)
}
