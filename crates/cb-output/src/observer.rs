//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use cb_core::{SimClock, SimConfig, Tick};
use cb_corridor::Corridor;
use cb_sim::{SimObserver, TickStats};
use cb_vehicle::VehicleStore;
use log::warn;

use crate::row::{TickSummaryRow, VehicleSnapshotRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes vehicle snapshots and tick summaries to any
/// [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    clock:      SimClock,
    rows:       Vec<VehicleSnapshotRow>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config` to convert ticks
    /// to simulated seconds.
    pub fn new(writer: W, config: &SimConfig) -> Self {
        Self {
            writer,
            clock:      config.make_clock(),
            rows:       Vec::new(),
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            warn!("output write failed: {e}");
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, stats: &TickStats) {
        let row = TickSummaryRow::from_stats(tick, self.clock.secs_at(tick), stats);
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, store: &VehicleStore, corridor: &Corridor) {
        let time_secs = self.clock.secs_at(tick);
        self.rows.clear();
        self.rows.extend(
            store
                .active_ids()
                .map(|v| VehicleSnapshotRow::capture(tick, time_secs, v, store, corridor)),
        );

        if !self.rows.is_empty() {
            let result = self.writer.write_snapshots(&self.rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
