//! Target-space ownership.
//!
//! A bot holding a claim on a space is the only bot allowed to drive to it.
//! The index is two mirrored maps so both "who claimed this space?" and
//! "which space did this bot claim?" are O(1).  A bot holds at most one claim.

use pk_core::{BotId, SpaceId};

use crate::{LotError, LotResult};

#[cfg(feature = "fx-hash")]
type Map<K, V> = rustc_hash::FxHashMap<K, V>;
#[cfg(not(feature = "fx-hash"))]
type Map<K, V> = std::collections::HashMap<K, V>;

#[derive(Debug, Default, Clone)]
pub struct ClaimIndex {
    by_space: Map<SpaceId, BotId>,
    by_bot:   Map<BotId, SpaceId>,
}

impl ClaimIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `bot` is headed for `space`.
    ///
    /// Re-claiming the same pair is a no-op.  A bot claiming a new space
    /// gives up its previous one.  Fails if another bot holds `space`.
    pub fn claim(&mut self, space: SpaceId, bot: BotId) -> LotResult<()> {
        match self.by_space.get(&space) {
            Some(&holder) if holder == bot => return Ok(()),
            Some(&holder) => return Err(LotError::AlreadyClaimed { space, by: holder }),
            None => {}
        }
        self.release_bot(bot);
        self.by_space.insert(space, bot);
        self.by_bot.insert(bot, space);
        Ok(())
    }

    /// Drop `bot`'s claim on `space`.  Returns `false` if `bot` did not hold it.
    pub fn release(&mut self, space: SpaceId, bot: BotId) -> bool {
        if self.by_space.get(&space) != Some(&bot) {
            return false;
        }
        self.by_space.remove(&space);
        self.by_bot.remove(&bot);
        true
    }

    /// Drop whatever `bot` holds.
    pub fn release_bot(&mut self, bot: BotId) -> Option<SpaceId> {
        let space = self.by_bot.remove(&bot)?;
        self.by_space.remove(&space);
        Some(space)
    }

    #[inline]
    pub fn claimant(&self, space: SpaceId) -> Option<BotId> {
        self.by_space.get(&space).copied()
    }

    #[inline]
    pub fn claim_of(&self, bot: BotId) -> Option<SpaceId> {
        self.by_bot.get(&bot).copied()
    }

    #[inline]
    pub fn is_claimed(&self, space: SpaceId) -> bool {
        self.by_space.contains_key(&space)
    }

    pub fn len(&self) -> usize {
        self.by_space.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_space.is_empty()
    }

    /// All `(space, bot)` pairs, sorted by space.
    pub fn pairs(&self) -> Vec<(SpaceId, BotId)> {
        let mut v: Vec<_> = self.by_space.iter().map(|(&s, &b)| (s, b)).collect();
        v.sort_unstable();
        v
    }
}
