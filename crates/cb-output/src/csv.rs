//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `vehicle_snapshots.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::{OutputResult, TickSummaryRow, VehicleSnapshotRow};
use crate::writer::OutputWriter;

pub const SNAPSHOT_HEADER: [&str; 13] = [
    "tick", "time_secs", "vehicle", "state", "edge", "lane", "position",
    "global_position", "speed", "zone", "accel", "lane_change", "dwell_elapsed",
];

pub const SUMMARY_HEADER: [&str; 8] = [
    "tick", "time_secs", "spawned", "deferred", "transitions", "exited", "active", "parked",
];

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut snapshots = Writer::from_path(dir.join("vehicle_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        Ok(Self { snapshots, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[VehicleSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.tick.to_string(),
                format!("{:.3}", row.time_secs),
                row.vehicle.to_string(),
                row.state.as_str().to_owned(),
                row.edge.to_string(),
                row.lane.to_string(),
                format!("{:.3}", row.position),
                format!("{:.3}", row.global_position),
                format!("{:.3}", row.speed),
                row.zone.to_string(),
                format!("{:.4}", row.accel),
                row.lane_change.offset().to_string(),
                format!("{:.3}", row.dwell_elapsed),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            format!("{:.3}", row.time_secs),
            row.spawned.to_string(),
            row.deferred.to_string(),
            row.transitions.to_string(),
            row.exited.to_string(),
            row.active.to_string(),
            row.parked.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
