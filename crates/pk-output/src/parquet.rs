//! Parquet output backend (feature `parquet`).
//!
//! Creates two files in the configured output directory:
//! - `bot_snapshots.parquet`
//! - `tick_summaries.parquet`

use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Float32Builder, StringBuilder, UInt32Builder, UInt64Builder};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use parquet::basic::Compression;
use parquet::file::properties::WriterProperties;

use crate::row::NO_SPACE;
use crate::writer::OutputWriter;
use crate::{BotSnapshotRow, OutputResult, TickSummaryRow};

fn snapshot_schema() -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("bot_id",       DataType::UInt32,  false),
        Field::new("tick",         DataType::UInt64,  false),
        Field::new("x",            DataType::Float32, false),
        Field::new("y",            DataType::Float32, false),
        Field::new("heading",      DataType::Utf8,    false),
        Field::new("state",        DataType::Utf8,    false),
        Field::new("target_space", DataType::UInt32,  true),
    ]))
}

fn summary_schema() -> Arc<Schema> {
    let counters = [
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
    Arc::new(Schema::new(
        counters
            .iter()
            .map(|name| Field::new(*name, DataType::UInt64, false))
            .collect::<Vec<_>>(),
    ))
}

fn snappy_props() -> WriterProperties {
    WriterProperties::builder()
        .set_compression(Compression::SNAPPY)
        .build()
}

/// Writes simulation output to two Parquet files.
///
/// `finish()` **must** be called to write the Parquet file footer; files
/// written without calling `finish()` cannot be opened by Parquet readers.
pub struct ParquetWriter {
    snapshots:   Option<ArrowWriter<File>>,
    summaries:   Option<ArrowWriter<File>>,
    snap_schema: Arc<Schema>,
    summ_schema: Arc<Schema>,
}

impl ParquetWriter {
    /// Create both Parquet files in `dir`.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let snap_schema = snapshot_schema();
        let summ_schema = summary_schema();

        let snap_file = File::create(dir.join("bot_snapshots.parquet"))?;
        let snapshots = ArrowWriter::try_new(snap_file, Arc::clone(&snap_schema), Some(snappy_props()))?;

        let summ_file = File::create(dir.join("tick_summaries.parquet"))?;
        let summaries = ArrowWriter::try_new(summ_file, Arc::clone(&summ_schema), Some(snappy_props()))?;

        Ok(Self {
            snapshots: Some(snapshots),
            summaries: Some(summaries),
            snap_schema,
            summ_schema,
        })
    }
}

impl OutputWriter for ParquetWriter {
    fn write_snapshots(&mut self, rows: &[BotSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let Some(writer) = self.snapshots.as_mut() else {
            return Ok(());
        };

        let mut bot_ids  = UInt32Builder::new();
        let mut ticks    = UInt64Builder::new();
        let mut xs       = Float32Builder::new();
        let mut ys       = Float32Builder::new();
        let mut headings = StringBuilder::new();
        let mut states   = StringBuilder::new();
        let mut targets  = UInt32Builder::new();

        for row in rows {
            bot_ids.append_value(row.bot_id);
            ticks.append_value(row.tick);
            xs.append_value(row.x);
            ys.append_value(row.y);
            headings.append_value(row.heading);
            states.append_value(row.state);
            targets.append_option((row.target_space != NO_SPACE).then_some(row.target_space));
        }

        let batch = RecordBatch::try_new(
            Arc::clone(&self.snap_schema),
            vec![
                Arc::new(bot_ids.finish()),
                Arc::new(ticks.finish()),
                Arc::new(xs.finish()),
                Arc::new(ys.finish()),
                Arc::new(headings.finish()),
                Arc::new(states.finish()),
                Arc::new(targets.finish()),
            ],
        )?;
        writer.write(&batch)?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        let Some(writer) = self.summaries.as_mut() else {
            return Ok(());
        };

        let values = [
            row.tick,
            row.elapsed_ms,
            row.active_bots,
            row.parked_bots,
            row.free_spaces,
            row.spawned,
            row.vacated,
            row.parked,
            row.departed,
        ];
        let columns = values
            .iter()
            .map(|&v| {
                let mut b = UInt64Builder::new();
                b.append_value(v);
                Arc::new(b.finish()) as arrow::array::ArrayRef
            })
            .collect();

        let batch = RecordBatch::try_new(Arc::clone(&self.summ_schema), columns)?;
        writer.write(&batch)?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if let Some(w) = self.snapshots.take() {
            w.close()?;
        }
        if let Some(w) = self.summaries.take() {
            w.close()?;
        }
        Ok(())
    }
}
