//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `vehicle_snapshots` and `tick_summaries`.

use std::path::Path;

use rusqlite::Connection;

use crate::{OutputResult, TickSummaryRow, VehicleSnapshotRow};
use crate::writer::OutputWriter;

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS vehicle_snapshots (
                 tick            INTEGER NOT NULL,
                 time_secs       REAL    NOT NULL,
                 vehicle         INTEGER NOT NULL,
                 state           TEXT    NOT NULL,
                 edge            TEXT    NOT NULL,
                 lane            INTEGER NOT NULL,
                 position        REAL    NOT NULL,
                 global_position REAL    NOT NULL,
                 speed           REAL    NOT NULL,
                 zone            INTEGER NOT NULL,
                 accel           REAL    NOT NULL,
                 lane_change     INTEGER NOT NULL,
                 dwell_elapsed   REAL    NOT NULL
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick        INTEGER PRIMARY KEY,
                 time_secs   REAL    NOT NULL,
                 spawned     INTEGER NOT NULL,
                 deferred    INTEGER NOT NULL,
                 transitions INTEGER NOT NULL,
                 exited      INTEGER NOT NULL,
                 active      INTEGER NOT NULL,
                 parked      INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_snapshots(&mut self, rows: &[VehicleSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO vehicle_snapshots \
                 (tick, time_secs, vehicle, state, edge, lane, position, global_position, \
                  speed, zone, accel, lane_change, dwell_elapsed) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
            )?;
            for row in rows {
                stmt.execute(rusqlite::params![
                    row.tick as i64,
                    row.time_secs,
                    row.vehicle,
                    row.state.as_str(),
                    row.edge.to_string(),
                    row.lane,
                    row.position,
                    row.global_position,
                    row.speed,
                    row.zone,
                    row.accel,
                    row.lane_change.offset(),
                    row.dwell_elapsed,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries \
             (tick, time_secs, spawned, deferred, transitions, exited, active, parked) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            rusqlite::params![
                row.tick as i64,
                row.time_secs,
                row.spawned as i64,
                row.deferred as i64,
                row.transitions as i64,
                row.exited as i64,
                row.active as i64,
                row.parked as i64,
            ],
        )?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}
