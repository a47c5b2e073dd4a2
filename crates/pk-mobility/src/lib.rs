//! `pk-mobility` — moving cars one step at a time.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                        |
//! |------------|-----------------------------------------------------------------|
//! | [`engine`] | `MobilityEngine` — candidate step, validation, commit or block  |
//! | [`player`] | step and park checks offered to the player-car controller       |
//! | [`error`]  | `MobilityError`, `MobilityResult<T>`                            |
//!
//! # Movement model
//!
//! Every tick a moving bot tries one step of `speed` along its heading:
//!
//! 1. The entrance passage (southbound out past the canvas edge, or
//!    northbound in from below it) is always allowed.
//! 2. Otherwise the candidate centre must be on a road and inside the lot.
//! 3. The car body at the candidate must not overlap a wall, a parking space
//!    (minus the exclusions below) or the player's car.  A parking bot close
//!    to its free target may ignore spaces and walls while it gets closer.
//! 4. A valid step is committed and the car drifts toward its lane; an
//!    invalid one leaves the bot where it was, flagged as blocked.
//!
//! Bots never test against each other.

pub mod engine;
pub mod error;
pub mod player;

#[cfg(test)]
mod tests;

pub use engine::{MobilityEngine, StepOutcome};
pub use error::{MobilityError, MobilityResult};
pub use player::{player_park_target, player_step_allowed};
