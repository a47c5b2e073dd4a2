//! The human-driven car, as the simulation sees it.
//!
//! Input handling and the player's own movement live outside this
//! workspace.  The controller writes the car's pose here each tick; the
//! simulation only reads it.

use pk_core::{Heading, LotLayout, Point, Rect};

#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlayerCar {
    pub pos: Point,
    pub heading: Heading,
    pub parked: bool,
}

impl PlayerCar {
    /// Starting pose: at the entrance, just inside the canvas, facing north.
    pub fn at_entrance(layout: &LotLayout) -> Self {
        Self {
            pos: Point::new(layout.canvas_width() / 2.0, layout.canvas_height() - 30.0),
            heading: Heading::North,
            parked: false,
        }
    }

    /// Bounding box for collision purposes.  A parked player is no obstacle.
    pub fn obstacle(&self, layout: &LotLayout) -> Option<Rect> {
        (!self.parked).then(|| layout.car_box(self.pos, self.heading))
    }
}
