//! Bot intents and step failures.

use pk_core::SpaceId;

/// A change to shared state that a bot asks for during its update.
///
/// Intents are produced by [`BehaviorModel`][crate::BehaviorModel] callbacks
/// and applied by the simulation loop after every bot has been updated, in
/// ascending bot id order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    /// Reserve the space as this bot's target.  The first bot to ask wins;
    /// a bot whose claim is refused goes back to searching.
    Claim(SpaceId),

    /// Give up the reservation on the space.
    Release(SpaceId),

    /// The bot has pulled into the space: mark it occupied.
    Park(SpaceId),

    /// The bot has left through the entrance: remove it.
    Depart,
}

/// Why a step was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Block {
    /// The candidate position is off the drivable surface or outside the lot.
    OffRoad,

    /// The car body would overlap something.
    Collision {
        space:   bool,
        wall:    bool,
        vehicle: bool,
    },
}

impl Block {
    /// `true` if a parking-space footprint was part of the collision.
    pub fn hit_space(self) -> bool {
        matches!(self, Block::Collision { space: true, .. })
    }
}
