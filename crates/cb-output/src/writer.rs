//! The `OutputWriter` trait implemented by all backend writers.

use crate::{OutputResult, TickSummaryRow, VehicleSnapshotRow};

/// Trait implemented by the CSV and SQLite writers.
///
/// Errors are surfaced to the observer, which keeps the first one for
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of vehicle snapshots.
    fn write_snapshots(&mut self, rows: &[VehicleSnapshotRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
