//! A no-op behavior model — bots never decide anything.

use pk_agent::Bot;
use pk_core::BotRng;

use crate::{BehaviorModel, Intent, SimContext};

/// A [`BehaviorModel`] that never changes a bot and never asks for anything.
///
/// Bots keep driving straight until blocked.  Useful in tests of the
/// mobility and scheduler layers.
pub struct NoopBehavior;

impl BehaviorModel for NoopBehavior {
    fn steer(&self, _bot: &mut Bot, _ctx: &SimContext<'_>, _rng: &mut BotRng) -> Vec<Intent> {
        vec![]
    }
}
