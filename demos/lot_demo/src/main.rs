//! lot_demo — one headless run of the parklot simulation.
//!
//! ```text
//! lot_demo [CONFIG.json] [OUTPUT_DIR]
//! ```
//!
//! Without a config file the reference lot runs for two simulated minutes:
//! every space starts taken, one is vacated every five seconds and a new car
//! arrives at the entrance every five seconds.  Bot snapshots and per-tick
//! counters go to `OUTPUT_DIR` (default `output/lot_demo`) as CSV, along with
//! the final lot state as JSON.  Set `RUST_LOG=debug` to follow individual
//! claims and re-plans.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use log::info;

use pk_agent::{BotStore, StateKind};
use pk_behavior::LotBehavior;
use pk_core::{SimConfig, Tick};
use pk_lot::ParkingLot;
use pk_output::{CsvWriter, OutputWriter, SimOutputObserver};
use pk_sim::{SimBuilder, SimObserver, TickSummary};
use pk_spatial::AStarRouter;

const DEFAULT_OUTPUT_DIR: &str = "output/lot_demo";

/// Log a progress line every this many simulated seconds.
const PROGRESS_EVERY_MS: u64 = 10_000;

// ── Observer wrapper: CSV output plus running totals ─────────────────────────

struct DemoObserver<W: OutputWriter> {
    inner:         SimOutputObserver<W>,
    snapshot_rows: usize,
    summary_rows:  usize,
    parked:        usize,
    departed:      usize,
    vacated:       usize,
    progress_tick: u64,
}

impl<W: OutputWriter> DemoObserver<W> {
    fn new(inner: SimOutputObserver<W>, progress_tick: u64) -> Self {
        Self {
            inner,
            snapshot_rows: 0,
            summary_rows: 0,
            parked: 0,
            departed: 0,
            vacated: 0,
            progress_tick: progress_tick.max(1),
        }
    }
}

impl<W: OutputWriter> SimObserver for DemoObserver<W> {
    fn on_tick_end(&mut self, s: &TickSummary) {
        self.summary_rows += 1;
        self.parked += s.parked;
        self.departed += s.departed;
        self.vacated += s.vacated;
        if s.tick.0 > 0 && s.tick.0 % self.progress_tick == 0 {
            info!(
                "{}: {:>3} driving, {:>3} parked, {:>2} free",
                s.tick, s.active_bots, s.parked_bots, s.free_spaces
            );
        }
        self.inner.on_tick_end(s);
    }

    fn on_snapshot(&mut self, tick: Tick, bots: &BotStore, lot: &ParkingLot) {
        self.snapshot_rows += bots.len();
        self.inner.on_snapshot(tick, bots, lot);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── Config ────────────────────────────────────────────────────────────────────

fn load_config(path: Option<&Path>) -> Result<SimConfig> {
    let Some(path) = path else {
        return Ok(SimConfig::default());
    };
    let text = fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config = serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args_os().skip(1);
    let config_path = args.next().map(PathBuf::from);
    let output_dir = args.next().map_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR), PathBuf::from);

    let config = load_config(config_path.as_deref())?;
    let clock = config.make_clock();
    info!(
        "seed {}, {} ticks of {} ms, snapshot every {} ticks",
        config.seed, config.total_ticks, config.tick_duration_ms, config.output_interval_ticks
    );

    // 1. Build the sim on the reference layout, starting from a full lot.
    let behavior = LotBehavior::new(&config.behavior, &clock)?;
    let mut sim = SimBuilder::new(config, behavior, AStarRouter).build()?;
    info!(
        "lot: {} spaces, road network of {} nodes",
        sim.lot.len(),
        sim.network.node_count()
    );

    // 2. Output.
    fs::create_dir_all(&output_dir).with_context(|| format!("creating {}", output_dir.display()))?;
    let writer = CsvWriter::new(&output_dir)?;
    let mut obs = DemoObserver::new(SimOutputObserver::new(writer), clock.ticks_for_ms(PROGRESS_EVERY_MS));

    // 3. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        eprintln!("output error: {e}");
    }

    // 4. Final state as JSON.
    let snapshot = sim.snapshot();
    let json_path = output_dir.join("final_snapshot.json");
    serde_json::to_writer_pretty(BufWriter::new(File::create(&json_path)?), &snapshot)?;

    // 5. Summary.
    println!();
    println!("Simulation complete in {:.3} s", elapsed.as_secs_f64());
    println!("  bot_snapshots.csv   : {} rows", obs.snapshot_rows);
    println!("  tick_summaries.csv  : {} rows", obs.summary_rows);
    println!("  final_snapshot.json : {}", json_path.display());
    println!();
    println!("{:<12} {:>6}", "Event", "Count");
    println!("{}", "-".repeat(19));
    println!("{:<12} {:>6}", "vacated", obs.vacated);
    println!("{:<12} {:>6}", "parked", obs.parked);
    println!("{:<12} {:>6}", "departed", obs.departed);
    println!();
    println!("{:<12} {:>6}", "State", "Bots");
    println!("{}", "-".repeat(19));
    for kind in [StateKind::Searching, StateKind::Parking, StateKind::Exiting, StateKind::Parked] {
        println!("{:<12} {:>6}", kind.as_str(), sim.bots.count(kind));
    }
    println!("{:<12} {:>6}", "free spaces", sim.free_spaces());

    Ok(())
}
