//! Simulation observer trait for progress reporting and data collection.

use pk_agent::BotStore;
use pk_core::Tick;
use pk_lot::ParkingLot;

/// What happened during one tick, reported to
/// [`SimObserver::on_tick_end`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TickSummary {
    pub tick:        Tick,
    pub elapsed_ms:  u64,
    /// Bots still driving at the end of the tick.
    pub active_bots: usize,
    pub parked_bots: usize,
    pub free_spaces: usize,
    /// Bots added this tick, exiting and incoming.
    pub spawned:     usize,
    /// Spaces freed by the scheduler this tick (0 or 1).
    pub vacated:     usize,
    /// Bots that pulled into a space this tick.
    pub parked:      usize,
    /// Bots that left through the entrance this tick.
    pub departed:    usize,
}

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, s: &TickSummary) {
///         if s.tick.0 % self.interval == 0 {
///             println!("{}: {} free, {} driving", s.tick, s.free_spaces, s.active_bots);
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called at the end of each tick, after all intents were applied.
    fn on_tick_end(&mut self, _summary: &TickSummary) {}

    /// Called every `config.output_interval_ticks` ticks with read-only
    /// access to the bots and the lot.
    fn on_snapshot(&mut self, _tick: Tick, _bots: &BotStore, _lot: &ParkingLot) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
