//! The `OutputWriter` trait implemented by all backend writers.

use crate::{BotSnapshotRow, OutputResult, TickSummaryRow};

/// Trait implemented by CSV, SQLite, and Parquet writers.
///
/// The observer never sees these errors directly: they are stored and
/// retrieved with [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write a batch of bot snapshots.
    fn write_snapshots(&mut self, rows: &[BotSnapshotRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.  Safe to call twice.
    fn finish(&mut self) -> OutputResult<()>;
}
