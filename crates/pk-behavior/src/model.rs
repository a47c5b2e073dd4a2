//! The `BehaviorModel` trait — the main extension point for bot logic.

use pk_agent::Bot;
use pk_core::BotRng;

use crate::{Block, Intent, SimContext};

/// Pluggable bot behavior.
///
/// Callbacks receive the bot mutably (its position, heading, route and
/// counters are its own), a read-only [`SimContext`] and the bot's
/// [`BotRng`], so decisions are deterministic regardless of thread ordering.
///
/// # Required methods
///
/// Only [`steer`][Self::steer] is required.  The blocked and settle hooks
/// have no-op defaults.
///
/// # Thread safety
///
/// With the `parallel` feature of pk-sim the callbacks run for many bots at
/// once, so implementations must be `Send + Sync`.  Per-bot state belongs in
/// the [`Bot`], not in the model.
pub trait BehaviorModel: Send + Sync + 'static {
    /// Called once per live bot per tick, before it moves.
    ///
    /// Update the bot's state and heading and return the shared-state
    /// changes it asks for.  Returning [`Intent::Depart`] removes the bot;
    /// it does not move this tick.
    fn steer(&self, bot: &mut Bot, ctx: &SimContext<'_>, rng: &mut BotRng) -> Vec<Intent>;

    /// Called when the bot's step this tick was refused.
    ///
    /// Default: keep the heading.
    fn on_blocked(&self, _bot: &mut Bot, _block: Block, _ctx: &SimContext<'_>, _rng: &mut BotRng) {}

    /// Called after the step, whether or not it succeeded.
    ///
    /// Default: returns no intents.
    fn settle(&self, _bot: &mut Bot, _ctx: &SimContext<'_>) -> Vec<Intent> {
        vec![]
    }
}
