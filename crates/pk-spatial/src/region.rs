//! Where a point lies relative to the drivable surface.
//!
//! All tests are inclusive on road edges.  The apron is the strip between
//! the bottom road and the canvas edge inside the entrance gap; for lane
//! purposes it extends past the canvas so entering and leaving cars below the
//! lot still keep to their lane.

use pk_core::{LotLayout, Point};

/// Margin kept between a car centre and the side and top walls.
const BOUNDARY_MARGIN: f32 = 2.0;

/// Drivable-surface class of a point.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Surface {
    /// On horizontal road `i` (0 = top).  Takes precedence at crossings.
    HorizontalRoad(u32),
    /// On vertical road `j` (0 = left).
    VerticalRoad(u32),
    /// Below the bottom road, inside the entrance gap.
    Apron,
    Off,
}

/// Index of the horizontal road containing `p`, if any.
pub fn horizontal_road_at(layout: &LotLayout, p: Point) -> Option<u32> {
    if p.x < layout.wall_space || p.x > layout.canvas_width() - layout.wall_space {
        return None;
    }
    (0..layout.horizontal_roads).find(|&i| {
        let top = layout.horizontal_road_top(i);
        p.y >= top && p.y <= top + layout.road_width
    })
}

/// Index of the vertical road containing `p`, if any.
pub fn vertical_road_at(layout: &LotLayout, p: Point) -> Option<u32> {
    if p.y < layout.wall_space || p.y > layout.lot_bottom() {
        return None;
    }
    (0..layout.vertical_roads).find(|&j| {
        let left = layout.vertical_road_left(j);
        p.x >= left && p.x <= left + layout.road_width
    })
}

/// `true` if `p` is on the apron, between the lot bottom and the canvas edge.
pub fn in_apron(layout: &LotLayout, p: Point) -> bool {
    p.y >= layout.lot_bottom() && p.y <= layout.canvas_height() && layout.in_entrance_gap(p.x)
}

/// Surface class used for lane keeping.  Unlike [`on_road`], the apron here
/// has no lower bound.
pub fn classify(layout: &LotLayout, p: Point) -> Surface {
    if let Some(i) = horizontal_road_at(layout, p) {
        Surface::HorizontalRoad(i)
    } else if let Some(j) = vertical_road_at(layout, p) {
        Surface::VerticalRoad(j)
    } else if p.y >= layout.lot_bottom() && layout.in_entrance_gap(p.x) {
        Surface::Apron
    } else {
        Surface::Off
    }
}

/// `true` if `p` is on any road or on the apron.
pub fn on_road(layout: &LotLayout, p: Point) -> bool {
    horizontal_road_at(layout, p).is_some() || vertical_road_at(layout, p).is_some() || in_apron(layout, p)
}

/// `true` if `p` is inside the walled lot, or anywhere on the apron.
///
/// Below the lot bottom only the entrance gap is inside.
pub fn within_boundary(layout: &LotLayout, p: Point) -> bool {
    if p.y >= layout.lot_bottom() && p.y <= layout.canvas_height() {
        return layout.in_entrance_gap(p.x);
    }
    let min = layout.wall_space + BOUNDARY_MARGIN;
    let max_x = layout.canvas_width() - layout.wall_space - BOUNDARY_MARGIN;
    p.x >= min && p.x <= max_x && p.y >= min
}

/// `true` if `p` is within the intersection radius of any road crossing.
/// The entrance node is not a crossing.
pub fn at_intersection(layout: &LotLayout, p: Point) -> bool {
    let r = layout.intersection_radius();
    (0..layout.horizontal_roads).any(|i| {
        let y = layout.horizontal_road_center(i);
        (0..layout.vertical_roads)
            .any(|j| p.distance(Point::new(layout.vertical_road_center(j), y)) < r)
    })
}
