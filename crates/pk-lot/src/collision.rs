//! Axis-aligned overlap tests against static geometry and other vehicles.
//!
//! Every test takes the car's bounding box from `LotLayout::car_box`, so a
//! turning car is checked with its new orientation.

use pk_core::{LotLayout, Point, Rect, SpaceId};
use pk_spatial::at_intersection;

use crate::ParkingLot;

/// Spaces to leave out of [`collides_with_space`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SpaceExclusion {
    /// One specific space: a parking bot's target, or the space an exiting
    /// bot just left.
    pub space: Option<SpaceId>,
    /// Every space whose centre is closer than the radius to the point.
    pub near: Option<(Point, f32)>,
}

impl SpaceExclusion {
    pub const NONE: SpaceExclusion = SpaceExclusion { space: None, near: None };

    pub fn space(id: SpaceId) -> Self {
        Self { space: Some(id), near: None }
    }

    fn skips(&self, id: SpaceId, center: Point) -> bool {
        self.space == Some(id) || self.near.is_some_and(|(p, r)| r > 0.0 && center.distance(p) < r)
    }
}

/// `true` if `car` overlaps any space footprint not excluded.
pub fn collides_with_space(lot: &ParkingLot, car: &Rect, exclude: SpaceExclusion) -> bool {
    lot.spaces()
        .iter()
        .filter(|s| !exclude.skips(s.id, s.center()))
        .any(|s| car.overlaps(&s.rect))
}

/// The five wall segments: top, left, right, and the bottom wall either side
/// of the entrance gap.
///
/// The bottom wall sits half a car length below the lot bottom so cars on the
/// bottom road do not graze it.
pub fn walls(layout: &LotLayout) -> [Rect; 5] {
    let w = layout.canvas_width();
    let h = layout.canvas_height();
    let t = layout.wall_space;
    let bottom_y = layout.lot_bottom() + layout.car_length / 2.0;
    [
        Rect::new(0.0, 0.0, w, t),
        Rect::new(0.0, 0.0, t, h),
        Rect::new(w - t, 0.0, t, h),
        Rect::new(0.0, bottom_y, layout.entrance_left(), t),
        Rect::new(layout.entrance_right(), bottom_y, w - layout.entrance_right(), t),
    ]
}

/// `true` if `car` overlaps a wall.  Always `false` while `center` is inside
/// an intersection, so cars can turn there freely.
pub fn collides_with_wall(layout: &LotLayout, center: Point, car: &Rect) -> bool {
    if at_intersection(layout, center) {
        return false;
    }
    walls(layout).iter().any(|w| car.overlaps(w))
}

/// `true` if `car` overlaps any of `others`.
///
/// Callers decide who counts: bots pass only the player's footprint, the
/// player passes every moving bot.
pub fn collides_with_vehicles<I>(car: &Rect, others: I) -> bool
where
    I: IntoIterator<Item = Rect>,
{
    others.into_iter().any(|o| car.overlaps(&o))
}
