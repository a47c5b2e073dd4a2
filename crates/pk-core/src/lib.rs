//! `pk-core` — foundational types for the `parklot` simulation.
//!
//! This crate is a dependency of every other `pk-*` crate.  It intentionally
//! has no `pk-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                |
//! |-----------------|---------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `EdgeId`, `SpaceId`, `BotId`                  |
//! | [`geo`]         | `Point`, `Rect`, `Heading`                              |
//! | [`time`]        | `Tick`, `SimClock`                                      |
//! | [`config`]      | `SimConfig`, `SchedulerConfig`, `BehaviorConfig`        |
//! | [`layout`]      | `LotLayout` — static lot geometry and derived coordinates |
//! | [`rng`]         | `BotRng` (per-bot), `SimRng` (global)                   |
//! | [`error`]       | `PkError`, `PkResult`                                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types; needed to load configuration from JSON. |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod layout;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{BehaviorConfig, SchedulerConfig, SimConfig};
pub use error::{PkError, PkResult};
pub use geo::{Heading, Point, Rect};
pub use ids::{BotId, EdgeId, NodeId, SpaceId};
pub use layout::{LotLayout, SpaceSide};
pub use rng::{BotRng, SimRng};
pub use time::{SimClock, Tick};
