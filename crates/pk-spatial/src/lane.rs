//! Keep-right lane discipline.
//!
//! Every road carries two lanes, one per direction, centred `lane_offset`
//! either side of the road's centre line.  Driving on the right means:
//!
//! | Surface         | Heading | Lane coordinate        |
//! |-----------------|---------|------------------------|
//! | horizontal road | east    | `y = centre + offset`  |
//! | horizontal road | west    | `y = centre - offset`  |
//! | vertical road   | south   | `x = centre + offset`  |
//! | vertical road   | north   | `x = centre - offset`  |
//! | apron           | south   | `x = gate + offset`    |
//! | apron           | north   | `x = gate - offset`    |
//!
//! A heading across the road's axis keeps to the centre line.

use pk_core::{Heading, LotLayout, Point};

use crate::region::{Surface, at_intersection, classify};

/// Lane coordinate for a car at `pos` facing `heading`: a y value on a
/// horizontal road, an x value on a vertical road or the apron.
///
/// `None` off the drivable surface.
pub fn lane_offset(layout: &LotLayout, pos: Point, heading: Heading) -> Option<f32> {
    let off = layout.lane_offset();
    match classify(layout, pos) {
        Surface::HorizontalRoad(i) => {
            let c = layout.horizontal_road_center(i);
            Some(match heading {
                Heading::East => c + off,
                Heading::West => c - off,
                _ => c,
            })
        }
        Surface::VerticalRoad(j) => Some(along_vertical(layout.vertical_road_center(j), off, heading)),
        Surface::Apron => Some(along_vertical(layout.entrance_center_x(), off, heading)),
        Surface::Off => None,
    }
}

fn along_vertical(center: f32, off: f32, heading: Heading) -> f32 {
    match heading {
        Heading::South => center + off,
        Heading::North => center - off,
        _ => center,
    }
}

/// Move `pos` at most `step` toward its lane, along the axis across the road.
///
/// Inside an intersection, and off the drivable surface, `pos` is returned
/// unchanged so the car can finish its turn.
pub fn snap_to_lane(layout: &LotLayout, pos: Point, heading: Heading, step: f32) -> Point {
    if at_intersection(layout, pos) {
        return pos;
    }
    let Some(lane) = lane_offset(layout, pos, heading) else {
        return pos;
    };
    match classify(layout, pos) {
        Surface::HorizontalRoad(_) => Point::new(pos.x, approach(pos.y, lane, step)),
        _ => Point::new(approach(pos.x, lane, step), pos.y),
    }
}

#[inline]
fn approach(from: f32, to: f32, step: f32) -> f32 {
    if (to - from).abs() > step {
        from + step.copysign(to - from)
    } else {
        to
    }
}
