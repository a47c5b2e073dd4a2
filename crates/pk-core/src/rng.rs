//! Deterministic per-bot and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Each bot gets its own independent `SmallRng` seeded by:
//!
//!   seed = global_seed XOR (bot_id * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive bot IDs uniformly across the seed space.
//! Bot IDs are never reused, so a bot's random stream depends only on the
//! run seed and its own ID, not on how many other bots are alive.  Turning
//! choices therefore replay identically with or without the `parallel`
//! feature.
//!
//! Scheduler decisions (which space vacates next, entrance spawn offset) draw
//! from a single `SimRng` owned by the tick loop.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::BotId;

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── BotRng ────────────────────────────────────────────────────────────────────

/// Per-bot deterministic RNG.
///
/// Stored in a `Vec<BotRng>` parallel to the bot list so the behavior phase
/// can borrow a bot's RNG mutably while reading the shared context.
pub struct BotRng(SmallRng);

impl BotRng {
    /// Seed deterministically from the run's global seed and a bot ID.
    pub fn new(global_seed: u64, bot: BotId) -> Self {
        let seed = global_seed ^ (bot.0 as u64 + 1).wrapping_mul(MIXING_CONSTANT);
        BotRng(SmallRng::seed_from_u64(seed))
    }

    /// `true` with probability `p` (clamped to [0, 1]).
    #[inline]
    pub fn gen_bool(&mut self, p: f64) -> bool {
        self.0.gen_bool(p.clamp(0.0, 1.0))
    }

    /// Choose an element with probability proportional to its weight.
    ///
    /// Returns `None` if the slice is empty or every weight is zero.
    pub fn choose_weighted<'a, T>(&mut self, items: &'a [(T, u32)]) -> Option<&'a T> {
        let total: u32 = items.iter().map(|(_, w)| *w).sum();
        if total == 0 {
            return None;
        }
        let mut roll = self.0.gen_range(0..total);
        for (item, w) in items {
            if roll < *w {
                return Some(item);
            }
            roll -= *w;
        }
        None
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for scheduler decisions.
///
/// Used only from the sequential part of the tick loop.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    /// Uniform `f32` in `[0, 1)`.
    #[inline]
    pub fn unit(&mut self) -> f32 {
        self.0.r#gen::<f32>()
    }

    #[inline]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.0)
    }
}
