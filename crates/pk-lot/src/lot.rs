//! The space table with occupancy and claims.

use log::debug;

use pk_core::{BotId, Heading, LotLayout, Point, SpaceId};
use pk_spatial::horizontal_road_at;

use crate::{ClaimIndex, LotError, LotResult, Occupant, ParkingSpace};

/// Every parking space of the lot, who is in it, and who is headed for it.
///
/// Spaces are numbered cluster by cluster (row-major), and inside a cluster
/// line by line, left to right.
pub struct ParkingLot {
    spaces:   Vec<ParkingSpace>,
    occupant: Vec<Option<Occupant>>,
    claims:   ClaimIndex,
}

impl ParkingLot {
    /// All spaces of `layout`, empty.
    pub fn new(layout: &LotLayout) -> Self {
        let mut spaces = Vec::with_capacity(layout.space_count());
        for row in 0..layout.parking_rows() {
            for col in 0..layout.parking_cols() {
                for i in 0..layout.spaces_per_col {
                    let side = layout.space_side(i);
                    for j in 0..layout.spaces_per_row {
                        spaces.push(ParkingSpace {
                            id: SpaceId(spaces.len() as u32),
                            rect: layout.space_rect(row, col, i, j),
                            row,
                            col,
                            side,
                            road: layout.adjacent_road(row, side),
                        });
                    }
                }
            }
        }
        let occupant = vec![None; spaces.len()];
        Self { spaces, occupant, claims: ClaimIndex::new() }
    }

    /// All spaces of `layout`, each holding a pre-parked car.
    pub fn full(layout: &LotLayout) -> Self {
        let mut lot = Self::new(layout);
        lot.occupant.fill(Some(Occupant::Static));
        lot
    }

    // ── Spaces ────────────────────────────────────────────────────────────

    pub fn len(&self) -> usize {
        self.spaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spaces.is_empty()
    }

    pub fn spaces(&self) -> &[ParkingSpace] {
        &self.spaces
    }

    pub fn space(&self, id: SpaceId) -> LotResult<&ParkingSpace> {
        self.spaces.get(id.index()).ok_or(LotError::SpaceNotFound(id))
    }

    // ── Occupancy ─────────────────────────────────────────────────────────

    /// Occupancy flag.  Unknown ids read as occupied so nobody drives there.
    #[inline]
    pub fn is_occupied(&self, id: SpaceId) -> bool {
        self.occupant.get(id.index()).is_none_or(|o| o.is_some())
    }

    #[inline]
    pub fn occupant(&self, id: SpaceId) -> Option<Occupant> {
        self.occupant.get(id.index()).copied().flatten()
    }

    /// Mark `id` as taken by `who`.
    pub fn occupy(&mut self, id: SpaceId, who: Occupant) -> LotResult<()> {
        let slot = self.occupant.get_mut(id.index()).ok_or(LotError::SpaceNotFound(id))?;
        if let Some(by) = *slot {
            return Err(LotError::AlreadyOccupied { space: id, by });
        }
        *slot = Some(who);
        debug!("space {id} occupied by {who:?}");
        Ok(())
    }

    /// Free `id`, returning whoever was in it.
    pub fn vacate(&mut self, id: SpaceId) -> LotResult<Occupant> {
        let slot = self.occupant.get_mut(id.index()).ok_or(LotError::SpaceNotFound(id))?;
        let who = slot.take().ok_or(LotError::AlreadyFree(id))?;
        debug!("space {id} vacated by {who:?}");
        Ok(who)
    }

    pub fn free_count(&self) -> usize {
        self.occupant.iter().filter(|o| o.is_none()).count()
    }

    pub fn free_spaces(&self) -> impl Iterator<Item = &ParkingSpace> + '_ {
        self.spaces.iter().filter(|s| self.occupant[s.id.index()].is_none())
    }

    /// Spaces whose car may be sent away: pre-parked cars and parked bots,
    /// never the player.
    pub fn vacatable(&self) -> Vec<SpaceId> {
        self.spaces
            .iter()
            .filter(|s| matches!(self.occupant[s.id.index()], Some(Occupant::Static | Occupant::Bot(_))))
            .map(|s| s.id)
            .collect()
    }

    /// Free and not claimed by any bot.
    pub fn is_available(&self, id: SpaceId) -> bool {
        !self.is_occupied(id) && !self.claims.is_claimed(id)
    }

    // ── Claims ────────────────────────────────────────────────────────────

    pub fn claims(&self) -> &ClaimIndex {
        &self.claims
    }

    /// Give `bot` the exclusive right to drive to `id`.
    pub fn claim(&mut self, id: SpaceId, bot: BotId) -> LotResult<()> {
        self.space(id)?;
        self.claims.claim(id, bot)
    }

    pub fn release_claim(&mut self, id: SpaceId, bot: BotId) -> bool {
        self.claims.release(id, bot)
    }

    pub fn release_bot(&mut self, bot: BotId) -> Option<SpaceId> {
        self.claims.release_bot(bot)
    }

    // ── Arrival ───────────────────────────────────────────────────────────

    /// `true` if a car at `pos` facing `heading` is lined up to pull into
    /// space `id`: it is on the horizontal road the space opens onto and its
    /// body overlaps the space along x.
    pub fn can_pull_in(&self, layout: &LotLayout, id: SpaceId, pos: Point, heading: Heading) -> bool {
        let Ok(space) = self.space(id) else { return false };
        horizontal_road_at(layout, pos) == Some(space.road)
            && layout.car_box(pos, heading).overlaps_x(&space.rect)
    }
}
