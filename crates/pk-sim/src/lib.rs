//! `pk-sim` — tick loop orchestrator for the parklot simulation.
//!
//! # Tick loop
//!
//! ```text
//! for tick in 0..config.total_ticks:
//!   ① Scheduler — pre-select the next space to vacate; vacate one space and
//!                 spawn an exiting bot beside it; spawn an incoming bot
//!                 below the entrance.
//!   ② Behavior  — per bot: steer → mobility step (→ on_blocked) → settle,
//!                 collecting intents (parallel with the `parallel` feature).
//!   ③ Apply     — for each bot in ascending BotId order:
//!                   Claim(s)   → reserve s, or back to searching if taken
//!                   Release(s) → drop the reservation
//!                   Park(s)    → mark s occupied by the bot
//!                   Depart     → remove the bot
//!   ④ Observer  — on_tick_end(summary), on_snapshot every N ticks
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the behavior phase on Rayon's thread pool.        |
//! | `fx-hash`  | FxHash for the claim index.                            |
//! | `serde`    | Serde derives on `LotSnapshot` and its contents.       |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use pk_behavior::LotBehavior;
//! use pk_core::SimConfig;
//! use pk_sim::{NoopObserver, SimBuilder};
//! use pk_spatial::AStarRouter;
//!
//! let config = SimConfig::default();
//! let behavior = LotBehavior::new(&config.behavior, &config.make_clock())?;
//! let mut sim = SimBuilder::new(config, behavior, AStarRouter).build()?;
//! sim.run(&mut NoopObserver)?;
//! println!("{} spaces free", sim.free_spaces());
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod scheduler;
pub mod sim;
pub mod snapshot;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver, TickSummary};
pub use scheduler::{ScheduleEvents, VacancyScheduler, entrance_spawn_point, exit_spawn_pose};
pub use sim::{Sim, targets_unique};
pub use snapshot::{BotView, LotSnapshot, SpaceView};
