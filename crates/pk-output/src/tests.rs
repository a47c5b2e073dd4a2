//! Integration tests for pk-output.

use tempfile::TempDir;

use crate::row::{BotSnapshotRow, NO_SPACE, TickSummaryRow};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn tmp() -> TempDir {
    tempfile::tempdir().expect("create temp dir")
}

fn snap_row(bot_id: u32, tick: u64, target_space: u32) -> BotSnapshotRow {
    BotSnapshotRow {
        bot_id,
        tick,
        x: 100.0 + bot_id as f32,
        y: 265.0,
        heading: "west",
        state: if target_space == NO_SPACE { "searching" } else { "parking" },
        target_space,
    }
}

fn summary_row(tick: u64) -> TickSummaryRow {
    TickSummaryRow {
        tick,
        elapsed_ms: tick * 16,
        active_bots: 3,
        parked_bots: 2,
        free_spaces: 1,
        spawned: 1,
        vacated: 0,
        parked: 1,
        departed: 0,
    }
}

// ── CSV tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod csv_tests {
    use crate::csv::{CsvWriter, SNAPSHOT_HEADER, SUMMARY_HEADER};
    use crate::row::NO_SPACE;
    use crate::writer::OutputWriter;

    use super::{snap_row, summary_row, tmp};

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("bot_snapshots.csv").exists());
        assert!(dir.path().join("tick_summaries.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("bot_snapshots.csv")).unwrap();
        let headers: Vec<_> = rdr.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers, SNAPSHOT_HEADER);

        let mut rdr2 = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let headers2: Vec<_> = rdr2.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(headers2, SUMMARY_HEADER);
    }

    #[test]
    fn csv_snapshot_rows() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let rows = vec![snap_row(0, 5, NO_SPACE), snap_row(1, 5, 4), snap_row(2, 5, NO_SPACE)];
        w.write_snapshots(&rows).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("bot_snapshots.csv")).unwrap();
        let read_rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(read_rows.len(), 3);
        assert_eq!(&read_rows[0][0], "0");      // bot_id
        assert_eq!(&read_rows[0][1], "5");      // tick
        assert_eq!(&read_rows[0][2], "100.00"); // x
        assert_eq!(&read_rows[0][4], "west");
        assert_eq!(&read_rows[0][5], "searching");
        assert_eq!(&read_rows[0][6], "", "no target is an empty cell");
        assert_eq!(&read_rows[1][5], "parking");
        assert_eq!(&read_rows[1][6], "4");
    }

    #[test]
    fn csv_tick_summary_row() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(3)).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let read_rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(read_rows.len(), 1);
        let cells: Vec<&str> = read_rows[0].iter().collect();
        assert_eq!(cells, ["3", "48", "3", "2", "1", "1", "0", "1", "0"]);
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

    #[test]
    fn missing_directory_is_an_error() {
        let dir = tmp();
        let result = CsvWriter::new(&dir.path().join("does/not/exist"));
        assert!(result.is_err());
    }
}

// ── Observer ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod observer_tests {
    use pk_agent::BotState;
    use pk_behavior::LotBehavior;
    use pk_core::{Heading, LotLayout, Point, SchedulerConfig, SimConfig, SpaceId};
    use pk_lot::ParkingLot;
    use pk_sim::SimBuilder;
    use pk_spatial::AStarRouter;

    use crate::csv::CsvWriter;
    use crate::observer::SimOutputObserver;

    use super::tmp;

    /// Scheduler silenced so the only bots are the ones placed by the test.
    fn quiet_config(total_ticks: u64, output_interval_ticks: u64) -> SimConfig {
        SimConfig {
            total_ticks,
            seed: 7,
            num_threads: Some(1),
            output_interval_ticks,
            scheduler: SchedulerConfig {
                first_preselect_ms: 1_000_000_000,
                entrance_spawning: false,
                first_vacancy_ms: 1_000_000_000,
                ..SchedulerConfig::default()
            },
            ..SimConfig::default()
        }
    }

    #[test]
    fn integration_csv() {
        let config = quiet_config(6, 2);
        let behavior = LotBehavior::new(&config.behavior, &config.make_clock()).unwrap();
        let mut sim = SimBuilder::new(config, behavior, AStarRouter)
            .bot(Point::new(400.0, 245.0), Heading::West, BotState::Searching)
            .bot(Point::new(200.0, 285.0), Heading::East, BotState::Searching)
            .bot(Point::new(40.0, 160.0), Heading::North, BotState::Searching)
            .build()
            .unwrap();

        let dir = tmp();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer);
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");

        // output_interval = 2 → snapshots at ticks 0, 2, 4 (3 ticks × 3 bots)
        let mut rdr = csv::Reader::from_path(dir.path().join("bot_snapshots.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 9, "expected 3 ticks × 3 bots = 9 snapshot rows, got {}", rows.len());
        assert!(rows.iter().all(|r| &r[5] == "searching"));

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let summaries: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(summaries.len(), 6);
        assert_eq!(&summaries[5][0], "5");
        assert_eq!(&summaries[5][1], "80", "tick 5 at 16 ms per tick");
        assert_eq!(&summaries[5][4], "0", "the lot starts full");
    }

    #[test]
    fn parked_bot_reports_its_space() {
        let mut lot = ParkingLot::full(&LotLayout::default());
        lot.vacate(SpaceId(4)).unwrap();
        let config = quiet_config(1, 1);
        let behavior = LotBehavior::new(&config.behavior, &config.make_clock()).unwrap();
        let mut sim = SimBuilder::new(config, behavior, AStarRouter)
            .lot(lot)
            .bot(Point::new(120.0, 195.0), Heading::South, BotState::Parked { space: SpaceId(4) })
            .build()
            .unwrap();

        let dir = tmp();
        let mut obs = SimOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        sim.run(&mut obs).unwrap();
        assert!(obs.take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join("bot_snapshots.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][5], "parked");
        assert_eq!(&rows[0][6], "4");
    }
}

// ── SQLite tests ──────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "sqlite"))]
mod sqlite_tests {
    use crate::row::NO_SPACE;
    use crate::sqlite::SqliteWriter;
    use crate::writer::OutputWriter;

    use super::{snap_row, summary_row, tmp};

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
        let rows = vec![snap_row(0, 1, NO_SPACE), snap_row(1, 1, 4), snap_row(2, 1, NO_SPACE)];
        w.write_snapshots(&rows).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let count: i64 = conn
            .query_row("SELECT COUNT(*) FROM bot_snapshots", [], |r| r.get(0))
            .unwrap();
        assert_eq!(count, 3);
    }

    #[test]
    fn sqlite_missing_target_is_null() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 0, NO_SPACE), snap_row(1, 0, 9)]).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let none: Option<i64> = conn
            .query_row("SELECT target_space FROM bot_snapshots WHERE bot_id = 0", [], |r| r.get(0))
            .unwrap();
        assert_eq!(none, None);
        let some: Option<i64> = conn
            .query_row("SELECT target_space FROM bot_snapshots WHERE bot_id = 1", [], |r| r.get(0))
            .unwrap();
        assert_eq!(some, Some(9));
    }

    #[test]
    fn sqlite_tick_summary() {
        let dir = tmp();
        let mut w = SqliteWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(7)).unwrap();
        w.finish().unwrap();

        let conn = rusqlite::Connection::open(dir.path().join("output.db")).unwrap();
        let (tick, elapsed, free): (i64, i64, i64) = conn
            .query_row(
                "SELECT tick, elapsed_ms, free_spaces FROM tick_summaries WHERE tick = 7",
                [],
                |r| Ok((r.get(0)?, r.get(1)?, r.get(2)?)),
            )
            .unwrap();
        assert_eq!(tick, 7);
        assert_eq!(elapsed, 112);
        assert_eq!(free, 1);
    }
}

// ── Parquet tests ─────────────────────────────────────────────────────────────

#[cfg(all(test, feature = "parquet"))]
mod parquet_tests {
    use arrow::datatypes::DataType;
    use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;

    use crate::parquet::ParquetWriter;
    use crate::row::NO_SPACE;
    use crate::writer::OutputWriter;

    use super::{snap_row, summary_row, tmp};

    #[test]
    fn parquet_files_created() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert!(dir.path().join("bot_snapshots.parquet").exists());
        assert!(dir.path().join("tick_summaries.parquet").exists());
    }

    #[test]
    fn parquet_snapshot_rows() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.write_snapshots(&[snap_row(0, 2, NO_SPACE), snap_row(1, 2, 4)]).unwrap();
        w.finish().unwrap();

        let file = std::fs::File::open(dir.path().join("bot_snapshots.parquet")).unwrap();
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
        let schema = builder.schema().clone();
        let batches: Vec<_> = builder.build().unwrap().map(|b| b.unwrap()).collect();
        let total_rows: usize = batches.iter().map(|b| b.num_rows()).sum();
        assert_eq!(total_rows, 2);

        let field_names: Vec<&str> = schema.fields().iter().map(|f| f.name().as_str()).collect();
        assert_eq!(field_names, ["bot_id", "tick", "x", "y", "heading", "state", "target_space"]);

        let target = schema.field_with_name("target_space").unwrap();
        assert!(target.is_nullable());
        assert_eq!(batches[0].column(6).null_count(), 1);
    }

    #[test]
    fn parquet_summary_columns_are_u64() {
        let dir = tmp();
        let mut w = ParquetWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&summary_row(1)).unwrap();
        w.finish().unwrap();

        let file = std::fs::File::open(dir.path().join("tick_summaries.parquet")).unwrap();
        let builder = ParquetRecordBatchReaderBuilder::try_new(file).unwrap();
        let schema = builder.schema().clone();
        assert_eq!(schema.fields().len(), 9);
        assert!(schema.fields().iter().all(|f| *f.data_type() == DataType::UInt64));
    }

    #[test]
    fn parquet_finish_required() {
        // Dropping the writer without finish() leaves the footer unwritten.
        let dir = tmp();
        {
            let mut w = ParquetWriter::new(dir.path()).unwrap();
            w.write_snapshots(&[snap_row(0, 0, NO_SPACE)]).unwrap();
        }

        let file = std::fs::File::open(dir.path().join("bot_snapshots.parquet")).unwrap();
        assert!(ParquetRecordBatchReaderBuilder::try_new(file).is_err());
    }
}
