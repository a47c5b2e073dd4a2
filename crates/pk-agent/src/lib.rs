//! `pk-agent` — the bots of the parklot simulation.
//!
//! # Crate layout
//!
//! | Module    | Contents                                                     |
//! |-----------|--------------------------------------------------------------|
//! | [`bot`]   | `Bot`, the tagged-union `BotState`, `RouteProgress`          |
//! | [`store`] | `BotStore` — live bots in id order plus their `BotRngs`      |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                  |
//! |---------|---------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on all public types.  |

pub mod bot;
pub mod store;


pub use bot::{Bot, BotState, RouteProgress, StateKind};
pub use store::{BotRngs, BotStore};
