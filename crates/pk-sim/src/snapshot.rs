//! Read-only view of the lot for renderers and debug overlays.

use pk_agent::{BotState, BotStore, StateKind};
use pk_core::{BotId, Heading, Point, Rect, SpaceId, SpaceSide, Tick};
use pk_lot::{Occupant, ParkingLot, PlayerCar};

/// One bot as a renderer sees it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BotView {
    pub id:      BotId,
    pub pos:     Point,
    pub heading: Heading,
    pub state:   StateKind,
    /// Target of a parking bot, or the space a parked bot holds.
    pub target:  Option<SpaceId>,
}

/// One parking space as a renderer sees it.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpaceView {
    pub id:       SpaceId,
    pub rect:     Rect,
    pub row:      u32,
    pub col:      u32,
    pub side:     SpaceSide,
    pub occupant: Option<Occupant>,
    /// The bot heading for this space, if any.
    pub claimed_by: Option<BotId>,
}

impl SpaceView {
    pub fn occupied(&self) -> bool {
        self.occupant.is_some()
    }
}

/// Everything a renderer needs for one frame.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LotSnapshot {
    pub tick:        Tick,
    pub bots:        Vec<BotView>,
    pub spaces:      Vec<SpaceView>,
    pub free_spaces: usize,
    pub player:      Option<PlayerCar>,
}

impl LotSnapshot {
    pub fn capture(tick: Tick, bots: &BotStore, lot: &ParkingLot, player: Option<PlayerCar>) -> Self {
        let bots = bots
            .iter()
            .map(|b| BotView {
                id:      b.id,
                pos:     b.pos,
                heading: b.heading,
                state:   b.state.kind(),
                target:  match b.state {
                    BotState::Parked { space } => Some(space),
                    _ => b.target(),
                },
            })
            .collect();
        let spaces = lot
            .spaces()
            .iter()
            .map(|s| SpaceView {
                id:         s.id,
                rect:       s.rect,
                row:        s.row,
                col:        s.col,
                side:       s.side,
                occupant:   lot.occupant(s.id),
                claimed_by: lot.claims().claimant(s.id),
            })
            .collect();
        Self { tick, bots, spaces, free_spaces: lot.free_count(), player }
    }
}
