//! Checks the player-car controller asks of the simulation.
//!
//! The player's input handling lives outside the workspace; it proposes a
//! pose and these functions say whether the lot allows it.

use pk_core::{Heading, LotLayout, Point, Rect, SpaceId};
use pk_lot::{ParkingLot, PlayerCar, SpaceExclusion, collides_with_space, collides_with_vehicles, collides_with_wall};
use pk_spatial::{horizontal_road_at, on_road, within_boundary};

/// `true` if the player's car may stand at `pos` facing `heading`.
///
/// Unlike bots the player collides with every other car: `bots` should yield
/// the footprints of all moving bots.  Spaces are never excluded, so the
/// player can only enter one through [`player_park_target`].
pub fn player_step_allowed<I>(layout: &LotLayout, lot: &ParkingLot, pos: Point, heading: Heading, bots: I) -> bool
where
    I: IntoIterator<Item = Rect>,
{
    if !(on_road(layout, pos) && within_boundary(layout, pos)) {
        return false;
    }
    let body = layout.car_box(pos, heading);
    !collides_with_space(lot, &body, SpaceExclusion::NONE)
        && !collides_with_wall(layout, pos, &body)
        && !collides_with_vehicles(&body, bots)
}

/// The first free space the player is lined up with, if any.
///
/// The player must be driving on a horizontal road; the space must open onto
/// that road and overlap the car along x.  Claims made by bots do not stop
/// the player.
pub fn player_park_target(layout: &LotLayout, lot: &ParkingLot, player: &PlayerCar) -> Option<SpaceId> {
    if player.parked || horizontal_road_at(layout, player.pos).is_none() {
        return None;
    }
    lot.free_spaces()
        .find(|s| lot.can_pull_in(layout, s.id, player.pos, player.heading))
        .map(|s| s.id)
}
