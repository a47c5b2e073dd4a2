//! Bot storage: `BotStore` (bots in id order) with its `BotRngs`.
//!
//! # Why two vectors?
//!
//! The behavior phase mutates each bot and draws from that bot's RNG while
//! reading the shared lot state.  Keeping the RNGs in their own vector, at
//! the same index as the bot, lets the tick loop hand out disjoint
//! `(&mut Bot, &mut BotRng)` pairs, sequentially or with Rayon:
//!
//! ```ignore
//! let (bots, rngs) = store.split_mut();
//! bots.par_iter_mut()
//!     .zip(rngs.par_iter_mut())
//!     .map(|(bot, rng)| update(bot, &ctx, rng))
//!     .collect::<Vec<_>>();
//! ```

use pk_core::{BotId, BotRng, Heading, Point};

use crate::{Bot, BotState, StateKind};

// ── BotRngs ───────────────────────────────────────────────────────────────────

/// Per-bot RNG state, index-aligned with the bots of a [`BotStore`].
///
/// A bot's stream is seeded from the run seed and its id, and ids are never
/// reused, so removing other bots never shifts anybody's random sequence.
pub struct BotRngs {
    pub inner: Vec<BotRng>,
}

impl BotRngs {
    fn new() -> Self {
        Self { inner: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── BotStore ──────────────────────────────────────────────────────────────────

/// All live bots, ascending by id, plus their RNGs.
///
/// New ids come from a monotonically increasing counter, so pushing a new bot
/// keeps the order and iteration is always in ascending `BotId` order.
pub struct BotStore {
    bots:    Vec<Bot>,
    rngs:    BotRngs,
    next_id: u32,
    seed:    u64,
}

impl BotStore {
    /// An empty store whose bots draw from streams derived from `seed`.
    pub fn new(seed: u64) -> Self {
        Self { bots: Vec::new(), rngs: BotRngs::new(), next_id: 0, seed }
    }

    /// Add a bot and return its id.
    pub fn spawn(&mut self, pos: Point, heading: Heading, speed: f32, state: BotState) -> BotId {
        let id = BotId(self.next_id);
        self.next_id += 1;
        self.bots.push(Bot::new(id, pos, heading, speed, state));
        self.rngs.inner.push(BotRng::new(self.seed, id));
        id
    }

    /// Remove `id`, returning the bot if it was live.
    pub fn remove(&mut self, id: BotId) -> Option<Bot> {
        let i = self.position(id)?;
        self.rngs.inner.remove(i);
        Some(self.bots.remove(i))
    }

    #[inline]
    fn position(&self, id: BotId) -> Option<usize> {
        self.bots.binary_search_by_key(&id, |b| b.id).ok()
    }

    // ── Access ────────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.bots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bots.is_empty()
    }

    /// The id the next spawned bot will get.
    pub fn next_id(&self) -> BotId {
        BotId(self.next_id)
    }

    pub fn get(&self, id: BotId) -> Option<&Bot> {
        self.position(id).map(|i| &self.bots[i])
    }

    pub fn get_mut(&mut self, id: BotId) -> Option<&mut Bot> {
        self.position(id).map(move |i| &mut self.bots[i])
    }

    /// All bots in ascending id order.
    pub fn bots(&self) -> &[Bot] {
        &self.bots
    }

    pub fn iter(&self) -> impl Iterator<Item = &Bot> + '_ {
        self.bots.iter()
    }

    /// Bots still driving (everything but parked).
    pub fn moving(&self) -> impl Iterator<Item = &Bot> + '_ {
        self.bots.iter().filter(|b| !b.is_parked())
    }

    pub fn count(&self, kind: StateKind) -> usize {
        self.bots.iter().filter(|b| b.state.kind() == kind).count()
    }

    /// Bots and RNGs as two index-aligned mutable slices.
    pub fn split_mut(&mut self) -> (&mut [Bot], &mut [BotRng]) {
        (&mut self.bots, &mut self.rngs.inner)
    }

    pub fn rngs(&self) -> &BotRngs {
        &self.rngs
    }

    /// One bot's RNG, for draws made outside the behavior phase.
    pub fn rng_mut(&mut self, id: BotId) -> Option<&mut BotRng> {
        self.position(id).map(move |i| &mut self.rngs.inner[i])
    }
}
