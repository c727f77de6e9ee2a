//! Integration tests for cb-output.

#[cfg(test)]
mod csv_tests {
    use cb_core::{LaneChange, ParkingState, ZoneId};
    use cb_corridor::CorridorEdge;
    use tempfile::TempDir;

    use crate::csv::{CsvWriter, SNAPSHOT_HEADER, SUMMARY_HEADER};
    use crate::row::{TickSummaryRow, VehicleSnapshotRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    pub(super) fn snap_row(vehicle: u32, tick: u64) -> VehicleSnapshotRow {
        VehicleSnapshotRow {
            tick,
            time_secs:       tick as f64 * 0.2,
            vehicle,
            state:           ParkingState::Parking,
            edge:            CorridorEdge::Parking(ZoneId(3)),
            lane:            1,
            position:        12.5,
            global_position: 612.5,
            speed:           8.25,
            zone:            4,
            accel:           -1.5,
            lane_change:     LaneChange::TowardCurb,
            dwell_elapsed:   0.0,
        }
    }

    fn summary_row(tick: u64) -> TickSummaryRow {
        TickSummaryRow {
            tick,
            time_secs:   tick as f64 * 0.2,
            spawned:     1,
            deferred:    0,
            transitions: 2,
            exited:      0,
            active:      3,
            parked:      1,
        }
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("vehicle_snapshots.csv").exists());
        assert!(dir.path().join("tick_summaries.csv").exists());
    }

    #[test]
    fn csv_creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("runs").join("a");
        let _w = CsvWriter::new(&nested).unwrap();
        assert!(nested.join("tick_summaries.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("vehicle_snapshots.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, SNAPSHOT_HEADER);

        let mut rdr2 = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, SUMMARY_HEADER);
    }

    #[test]
    fn csv_snapshot_fields() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 5), snap_row(1, 5)]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("vehicle_snapshots.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[0][0], "5");          // tick
        assert_eq!(&rows[0][1], "1.000");      // time_secs
        assert_eq!(&rows[1][2], "1");          // vehicle
        assert_eq!(&rows[0][3], "parking");
        assert_eq!(&rows[0][4], "parking_3");
        assert_eq!(&rows[0][7], "612.500");
        assert_eq!(&rows[0][9], "4");          // zone
        assert_eq!(&rows[0][11], "-1");        // toward the curb
    }

    #[test]
    fn csv_tick_summary_fields() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(3)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "3");
        assert_eq!(&rows[0][4], "2");          // transitions
        assert_eq!(&rows[0][7], "1");          // parked
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_snapshot_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[]).unwrap();
    }
}

// ── Observer tests ────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use cb_behavior::{ControllerConfig, CurbsideController};
    use cb_core::{SimConfig, Tick, VehicleId, ZoneId};
    use cb_corridor::{Corridor, CorridorConfig};
    use cb_demand::Arrival;
    use cb_sim::SimBuilder;
    use cb_vehicle::VehicleStoreBuilder;
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::observer::SimOutputObserver;
    use crate::row::{TickSummaryRow, VehicleSnapshotRow};
    use crate::writer::OutputWriter;
    use crate::{OutputError, OutputResult};

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn config(total_ticks: u64, output_interval_ticks: u64) -> SimConfig {
        SimConfig { step_secs: 0.2, total_ticks, seed: 3, output_interval_ticks }
    }

    fn arrival(vehicle: u32, tick: u64) -> Arrival {
        Arrival {
            vehicle:      VehicleId(vehicle),
            depart_tick:  Tick(tick),
            desired_zone: ZoneId(2),
            dwell_secs:   5.0,
        }
    }

    #[test]
    fn integration_csv() {
        let config = config(20, 5);
        let corridor = Corridor::new(CorridorConfig::default()).unwrap();
        let store = VehicleStoreBuilder::new(1).build().unwrap();
        let controller = CurbsideController::new(ControllerConfig::default()).unwrap();
        let mut sim = SimBuilder::new(config.clone(), corridor, store, controller)
            .arrivals(vec![arrival(0, 0)])
            .build()
            .unwrap();

        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer, &config);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        // interval 5 over 20 ticks → ticks 0, 5, 10, 15 with one vehicle each
        let mut rdr = csv::Reader::from_path(dir.path().join("vehicle_snapshots.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 4);
        let ticks: Vec<_> = rows.iter().map(|r| r[0].to_owned()).collect();
        assert_eq!(ticks, ["0", "5", "10", "15"]);

        // positions advance along inflow
        let global: Vec<f64> = rows.iter().map(|r| r[7].parse().unwrap()).collect();
        assert!(global.windows(2).all(|w| w[1] > w[0]), "{global:?}");

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let summaries: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(summaries.len(), 20);
        assert_eq!(&summaries[0][2], "1", "spawned on tick 0");
    }

    /// Fails every write after the first `ok` calls.
    struct Flaky {
        ok:       usize,
        calls:    usize,
        finished: bool,
    }

    impl Flaky {
        fn tick(&mut self) -> OutputResult<()> {
            self.calls += 1;
            if self.calls > self.ok {
                return Err(OutputError::Io(std::io::Error::other(format!("call {}", self.calls))));
            }
            Ok(())
        }
    }

    impl OutputWriter for Flaky {
        fn write_snapshots(&mut self, _rows: &[VehicleSnapshotRow]) -> OutputResult<()> {
            self.tick()
        }
        fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
            self.tick()
        }
        fn finish(&mut self) -> OutputResult<()> {
            self.finished = true;
            Ok(())
        }
    }

    #[test]
    fn first_error_is_kept() {
        let config = config(5, 0);
        let corridor = Corridor::new(CorridorConfig::default()).unwrap();
        let store = VehicleStoreBuilder::new(1).build().unwrap();
        let controller = CurbsideController::new(ControllerConfig::default()).unwrap();
        let mut sim = SimBuilder::new(config.clone(), corridor, store, controller)
            .build()
            .unwrap();

        let mut obs = SimOutputObserver::new(Flaky { ok: 2, calls: 0, finished: false }, &config);
        sim.run(&mut obs).unwrap();

        let err = obs.take_error().expect("error stored");
        assert!(err.to_string().contains("call 3"), "{err}");
        assert!(obs.take_error().is_none(), "taken once");

        let writer = obs.into_writer();
        assert_eq!(writer.calls, 5);
        assert!(writer.finished);
    }

    #[test]
    fn empty_roster_writes_no_snapshot_rows() {
        let config = config(3, 1);
        let corridor = Corridor::new(CorridorConfig::default()).unwrap();
        let store = VehicleStoreBuilder::new(1).build().unwrap();
        let controller = CurbsideController::new(ControllerConfig::default()).unwrap();
        let mut sim = SimBuilder::new(config.clone(), corridor, store, controller)
            .build()
            .unwrap();

        let dir = tmp();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap(), &config);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join("vehicle_snapshots.csv")).unwrap();
        assert_eq!(rdr.records().count(), 0);
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use tempfile::TempDir;

    use super::csv_tests::snap_row;
    use crate::row::TickSummaryRow;
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    #[test]
    fn sqlite_db_created() {
        let dir = tmp();
        let _w = SqliteWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("output.db").exists());
    }

    #[test]
    fn sqlite_snapshot_count() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 1), snap_row(1, 1), snap_row(2, 1)]).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM vehicle_snapshots", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn sqlite_state_and_edge_stored_as_text() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(7, 0)]).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let (state, edge, lane_change): (String, String, i64) = conn
            .query_row(
                "SELECT state, edge, lane_change FROM vehicle_snapshots WHERE vehicle = 7",
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .unwrap();
        assert_eq!(state, "parking");
        assert_eq!(edge, "parking_3");
        assert_eq!(lane_change, -1);
    }

    #[test]
    fn sqlite_duplicate_summary_tick_rejected() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        let row = TickSummaryRow {
            tick: 4, time_secs: 0.8, spawned: 0, deferred: 0,
            transitions: 0, exited: 0, active: 0, parked: 0,
        };
        w.write_tick_summary(&row).unwrap();
        assert!(w.write_tick_summary(&row).is_err(), "tick is the primary key");
    }

    #[test]
    fn sqlite_finish_idempotent() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }
}
