//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `bot_snapshots.csv`
//! - `tick_summaries.csv`
//!
//! A bot without a target space has an empty `target_space` cell.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::row::NO_SPACE;
use crate::writer::OutputWriter;
use crate::{BotSnapshotRow, OutputResult, TickSummaryRow};

pub const SNAPSHOT_HEADER: [&str; 7] = ["bot_id", "tick", "x", "y", "heading", "state", "target_space"];

pub const SUMMARY_HEADER: [&str; 9] = [
    "tick",
    "elapsed_ms",
    "active_bots",
    "parked_bots",
    "free_spaces",
    "spawned",
    "vacated",
    "parked",
    "departed",
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
        let mut snapshots = Writer::from_path(dir.join("bot_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        Ok(Self {
            snapshots,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[BotSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            let target = if row.target_space == NO_SPACE {
                String::new()
            } else {
                row.target_space.to_string()
            };
            self.snapshots.write_record(&[
                row.bot_id.to_string(),
                row.tick.to_string(),
                format!("{:.2}", row.x),
                format!("{:.2}", row.y),
                row.heading.to_owned(),
                row.state.to_owned(),
                target,
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.elapsed_ms.to_string(),
            row.active_bots.to_string(),
            row.parked_bots.to_string(),
            row.free_spaces.to_string(),
            row.spawned.to_string(),
            row.vacated.to_string(),
            row.parked.to_string(),
            row.departed.to_string(),
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
