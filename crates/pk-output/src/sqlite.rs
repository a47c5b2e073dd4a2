//! SQLite output backend (feature `sqlite`).
//!
//! Creates a single `output.db` file in the configured output directory with
//! two tables: `bot_snapshots` and `tick_summaries`.  A bot without a target
//! space stores `NULL` in `target_space`.

use std::path::Path;

use rusqlite::Connection;

use crate::row::NO_SPACE;
use crate::writer::OutputWriter;
use crate::{BotSnapshotRow, OutputResult, TickSummaryRow};

/// Writes simulation output to an SQLite database.
pub struct SqliteWriter {
    conn:     Connection,
    finished: bool,
}

impl SqliteWriter {
    /// Open (or create) `output.db` in `dir` and initialise the schema.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let conn = Connection::open(dir.join("output.db"))?;

        conn.execute_batch(
            "PRAGMA journal_mode = WAL;
             PRAGMA synchronous  = NORMAL;
             CREATE TABLE IF NOT EXISTS bot_snapshots (
                 bot_id       INTEGER NOT NULL,
                 tick         INTEGER NOT NULL,
                 x            REAL    NOT NULL,
                 y            REAL    NOT NULL,
                 heading      TEXT    NOT NULL,
                 state        TEXT    NOT NULL,
                 target_space INTEGER
             );
             CREATE TABLE IF NOT EXISTS tick_summaries (
                 tick        INTEGER PRIMARY KEY,
                 elapsed_ms  INTEGER NOT NULL,
                 active_bots INTEGER NOT NULL,
                 parked_bots INTEGER NOT NULL,
                 free_spaces INTEGER NOT NULL,
                 spawned     INTEGER NOT NULL,
                 vacated     INTEGER NOT NULL,
                 parked      INTEGER NOT NULL,
                 departed    INTEGER NOT NULL
             );",
        )?;

        Ok(Self { conn, finished: false })
    }
}

impl OutputWriter for SqliteWriter {
    fn write_snapshots(&mut self, rows: &[BotSnapshotRow]) -> OutputResult<()> {
        if rows.is_empty() {
            return Ok(());
        }
        let tx = self.conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO bot_snapshots \
                 (bot_id, tick, x, y, heading, state, target_space) \
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for row in rows {
                let target = (row.target_space != NO_SPACE).then_some(row.target_space);
                stmt.execute(rusqlite::params![
                    row.bot_id,
                    row.tick,
                    row.x as f64,
                    row.y as f64,
                    row.heading,
                    row.state,
                    target,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.conn.execute(
            "INSERT INTO tick_summaries \
             (tick, elapsed_ms, active_bots, parked_bots, free_spaces, spawned, vacated, parked, departed) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            rusqlite::params![
                row.tick,
                row.elapsed_ms,
                row.active_bots,
                row.parked_bots,
                row.free_spaces,
                row.spawned,
                row.vacated,
                row.parked,
                row.departed,
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
