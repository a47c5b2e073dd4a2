//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`.

use pk_agent::{BotState, BotStore};
use pk_core::Tick;
use pk_lot::ParkingLot;
use pk_sim::{SimObserver, TickSummary};

use crate::row::{BotSnapshotRow, NO_SPACE, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that writes bot snapshots and tick summaries to any
/// [`OutputWriter`] backend (CSV, SQLite, Parquet, …).
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, s: &TickSummary) {
        let row = TickSummaryRow {
            tick:        s.tick.0,
            elapsed_ms:  s.elapsed_ms,
            active_bots: s.active_bots as u64,
            parked_bots: s.parked_bots as u64,
            free_spaces: s.free_spaces as u64,
            spawned:     s.spawned as u64,
            vacated:     s.vacated as u64,
            parked:      s.parked as u64,
            departed:    s.departed as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, bots: &BotStore, _lot: &ParkingLot) {
        let rows: Vec<BotSnapshotRow> = bots
            .iter()
            .map(|b| {
                let target = match b.state {
                    BotState::Parked { space } => Some(space),
                    _ => b.target(),
                };
                BotSnapshotRow {
                    bot_id:       b.id.0,
                    tick:         tick.0,
                    x:            b.pos.x,
                    y:            b.pos.y,
                    heading:      b.heading.as_str(),
                    state:        b.state.kind().as_str(),
                    target_space: target.map_or(NO_SPACE, |s| s.0),
                }
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
