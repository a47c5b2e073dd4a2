//! Parking space records.

use pk_core::{BotId, Heading, Point, Rect, SpaceId, SpaceSide};

/// One parking space.  Immutable after the lot is built; occupancy lives in
/// [`ParkingLot`](crate::ParkingLot).
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ParkingSpace {
    pub id: SpaceId,
    pub rect: Rect,
    /// Cluster row and column.
    pub row: u32,
    pub col: u32,
    pub side: SpaceSide,
    /// Horizontal road the space opens onto.
    pub road: u32,
}

impl ParkingSpace {
    #[inline]
    pub fn center(&self) -> Point {
        self.rect.center()
    }

    /// Heading of a car parked here.
    #[inline]
    pub fn parked_heading(&self) -> Heading {
        self.side.parked_heading()
    }
}

/// Who holds an occupied space.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Occupant {
    /// A car that was parked before the run started.
    Static,
    Bot(BotId),
    Player,
}
