//! Run configuration.
//!
//! All durations are in simulated milliseconds and are converted to tick
//! counts once, through [`SimClock::ticks_for_ms`], when the simulation is
//! built.  Every struct here implements `Default` with the values of the
//! reference lot, and with the `serde` feature every field is optional in a
//! config file (`#[serde(default)]`).

use crate::{PkError, PkResult, SimClock, Tick};

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// `SimBuilder`.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Simulated milliseconds per tick.  Default: 16 (about 60 frames/s).
    pub tick_duration_ms: u32,

    /// Total ticks to simulate.
    pub total_ticks: u64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Worker thread count passed to Rayon.  `None` uses all logical cores.
    pub num_threads: Option<usize>,

    /// Emit bot snapshots every N ticks.  1 = every tick.
    pub output_interval_ticks: u64,

    /// Distance a bot covers per tick, in lot units.
    pub bot_speed: f32,

    pub scheduler: SchedulerConfig,

    pub behavior: BehaviorConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            tick_duration_ms: 16,
            total_ticks: 60 * 60 * 2, // two simulated minutes at 60 fps
            seed: 0,
            num_threads: None,
            output_interval_ticks: 60,
            bot_speed: 1.5,
            scheduler: SchedulerConfig::default(),
            behavior: BehaviorConfig::default(),
        }
    }
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.tick_duration_ms)
    }

    /// Reject values the tick loop cannot work with.
    pub fn validate(&self) -> PkResult<()> {
        if self.tick_duration_ms == 0 {
            return Err(PkError::Config("tick_duration_ms must be positive".into()));
        }
        if !(self.bot_speed > 0.0) {
            return Err(PkError::Config(format!("bot_speed must be positive, got {}", self.bot_speed)));
        }
        if self.output_interval_ticks == 0 {
            return Err(PkError::Config("output_interval_ticks must be at least 1".into()));
        }
        if self.scheduler.spawn_interval_ms == 0 || self.scheduler.vacancy_interval_ms == 0 {
            return Err(PkError::Config("scheduler intervals must be positive".into()));
        }
        Ok(())
    }
}

// ── SchedulerConfig ───────────────────────────────────────────────────────────

/// Timing of the vacancy scheduler and the entrance spawner.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SchedulerConfig {
    /// When the first next-to-vacate space is picked, so the first incoming
    /// bot already has a destination.
    pub first_preselect_ms: u64,

    /// Spawn incoming bots below the entrance at all.  Vacancy-driven exiting
    /// bots are unaffected.
    pub entrance_spawning: bool,

    pub first_spawn_ms: u64,
    pub spawn_interval_ms: u64,

    pub first_vacancy_ms: u64,
    pub vacancy_interval_ms: u64,

    /// No incoming bot appears while another bot is closer than this to the
    /// spawn point.
    pub spawn_clearance: f32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            first_preselect_ms: 3_000,
            entrance_spawning: true,
            first_spawn_ms: 4_000,
            spawn_interval_ms: 5_000,
            first_vacancy_ms: 5_000,
            vacancy_interval_ms: 5_000,
            spawn_clearance: 60.0,
        }
    }
}

// ── BehaviorConfig ────────────────────────────────────────────────────────────

/// Tunables of the bot state machine.
///
/// Geometry that scales with the road (lane offset, intersection radius)
/// lives on `LotLayout` instead.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BehaviorConfig {
    /// A waypoint counts as reached inside this radius.
    pub waypoint_reach: f32,

    /// Maximum lateral correction per tick when drifting into lane.
    pub lane_snap_step: f32,

    /// Minimum time between two heading changes after a blocked step.
    pub blocked_cooldown_ms: u64,

    /// Minimum time between two random turns of a searching bot.
    pub search_turn_cooldown_ms: u64,

    /// After this many consecutive blocked ticks a bot re-runs navigation
    /// even though it is still blocked.
    pub stuck_ticks: u32,

    /// Inside this distance of a free target, steps that approach the target
    /// skip the parking-space and wall collision tests.
    pub approach_radius: f32,

    /// Inside this distance of the target, a bot blocked by a space keeps its
    /// heading instead of turning away.
    pub hold_heading_radius: f32,

    /// Right after leaving a space, an exiting bot ignores every space within
    /// this radius ...
    pub exit_exclusion_radius: f32,
    /// ... for this long.
    pub exit_exclusion_ms: u64,

    /// Distance from the target centre beyond which a bot at the end of its
    /// route turns along the road to line up with the space.
    pub align_tolerance: f32,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            waypoint_reach: 15.0,
            lane_snap_step: 0.5,
            blocked_cooldown_ms: 300,
            search_turn_cooldown_ms: 1_000,
            stuck_ticks: 10,
            approach_radius: 120.0,
            hold_heading_radius: 80.0,
            exit_exclusion_radius: 100.0,
            exit_exclusion_ms: 2_000,
            align_tolerance: 10.0,
        }
    }
}
