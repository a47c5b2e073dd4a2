//! `pk-behavior` — what a bot decides to do each tick.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                        |
//! |-------------|-----------------------------------------------------------------|
//! | [`intent`]  | `Intent` (`Claim`, `Release`, `Park`, `Depart`), `Block`        |
//! | [`context`] | `SimContext<'a>` — read-only tick snapshot shared by all bots   |
//! | [`model`]   | `BehaviorModel` trait                                           |
//! | [`lot`]     | `LotBehavior` — the searching / parking / exiting state machine |
//! | [`steer`]   | route following, direct-steering fallbacks, alternate headings |
//! | [`noop`]    | `NoopBehavior` — bots that never decide anything                |
//! | [`error`]   | `BehaviorError`, `BehaviorResult<T>`                            |
//!
//! # Design notes
//!
//! Each tick the simulation runs, per bot:
//!
//! 1. `steer`: state transitions, route refresh, heading choice.
//! 2. The mobility step; on failure `on_blocked` picks what to do next.
//! 3. `settle`: the parking arrival check.
//!
//! These touch only the bot itself, its RNG and the read-only
//! [`SimContext`].  Anything that changes shared state (space claims,
//! occupancy, removal) comes back as an [`Intent`] and is applied afterwards,
//! one bot at a time in ascending id order.  `BehaviorModel` therefore only
//! needs to be `Send + Sync`.

pub mod context;
pub mod error;
pub mod intent;
pub mod lot;
pub mod model;
pub mod noop;
pub mod steer;


pub use context::SimContext;
pub use error::{BehaviorError, BehaviorResult};
pub use intent::{Block, Intent};
pub use lot::LotBehavior;
pub use model::BehaviorModel;
pub use noop::NoopBehavior;
