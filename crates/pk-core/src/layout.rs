//! Static lot geometry.
//!
//! The lot is a grid of `horizontal_roads × vertical_roads` roads.  Between
//! every pair of adjacent roads sits a *cluster* of parking spaces,
//! `spaces_per_row` wide and `spaces_per_col` deep.  A wall band of
//! `wall_space` surrounds the grid on the top, left and right; below the
//! bottom road an apron of `entrance_apron_height` leads to the single
//! entrance gap in the bottom wall.
//!
//! ```text
//!   wall ─────────────────────────────────────────
//!        │ road │ cluster │ road │ cluster │ road │
//!        ├──────┼─────────┼──────┼─────────┼──────┤   ← road 0
//!        │      │ ▯▯▯▯    │      │ ▯▯▯▯    │      │
//!        │      │ ▯▯▯▯    │      │ ▯▯▯▯    │      │
//!        ├──────┼─────────┼──────┼─────────┼──────┤   ← road 1
//!        ...
//!        └──────────────┐ entrance ┌──────────────┘   ← lot_bottom
//! ```
//!
//! All coordinates grow right (x) and down (y).  Everything derived here is a
//! pure function of the fields, so a `LotLayout` can be shared freely.

use crate::{Heading, PkError, PkResult, Point, Rect};

/// Which face of its cluster a space opens onto.
///
/// Top-half spaces open onto the road above the cluster and a car parked in
/// them faces north; bottom-half spaces open onto the road below and face
/// south.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SpaceSide {
    Top,
    Bottom,
}

impl SpaceSide {
    /// Heading of a car parked in a space on this side.
    #[inline]
    pub fn parked_heading(self) -> Heading {
        match self {
            SpaceSide::Top => Heading::North,
            SpaceSide::Bottom => Heading::South,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SpaceSide::Top => "top",
            SpaceSide::Bottom => "bottom",
        }
    }
}

/// Geometric constants of the lot.  `Default` is the reference 3×3-road lot.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LotLayout {
    pub horizontal_roads: u32,
    pub vertical_roads: u32,
    pub road_width: f32,

    pub space_width: f32,
    pub space_height: f32,
    /// Gap between neighbouring spaces inside a cluster.
    pub spacing: f32,
    pub spaces_per_row: u32,
    pub spaces_per_col: u32,

    pub car_width: f32,
    pub car_length: f32,

    pub wall_space: f32,
    pub entrance_width: f32,
    pub entrance_apron_height: f32,
}

impl Default for LotLayout {
    fn default() -> Self {
        Self {
            horizontal_roads: 3,
            vertical_roads: 3,
            road_width: 80.0,
            space_width: 40.0,
            space_height: 60.0,
            spacing: 5.0,
            spaces_per_row: 4,
            spaces_per_col: 2,
            car_width: 30.0,
            car_length: 50.0,
            wall_space: 20.0,
            entrance_width: 100.0,
            entrance_apron_height: 60.0,
        }
    }
}

impl LotLayout {
    /// Check that the layout describes at least one cluster and that every
    /// size is positive.
    pub fn validate(&self) -> PkResult<()> {
        if self.horizontal_roads < 2 || self.vertical_roads < 2 {
            return Err(PkError::Config(format!(
                "need at least 2 roads in each direction, got {}x{}",
                self.horizontal_roads, self.vertical_roads
            )));
        }
        if self.spaces_per_row == 0 || self.spaces_per_col == 0 {
            return Err(PkError::Config("clusters must hold at least one space".into()));
        }
        let sizes = [
            ("road_width", self.road_width),
            ("space_width", self.space_width),
            ("space_height", self.space_height),
            ("car_width", self.car_width),
            ("car_length", self.car_length),
            ("entrance_width", self.entrance_width),
            ("entrance_apron_height", self.entrance_apron_height),
        ];
        for (name, v) in sizes {
            if !(v > 0.0) {
                return Err(PkError::Config(format!("{name} must be positive, got {v}")));
            }
        }
        if self.spacing < 0.0 || self.wall_space < 0.0 {
            return Err(PkError::Config("spacing and wall_space must not be negative".into()));
        }
        if self.entrance_width >= self.canvas_width() - 2.0 * self.wall_space {
            return Err(PkError::Config("entrance is wider than the lot".into()));
        }
        Ok(())
    }

    // ── Clusters and canvas ──────────────────────────────────────────────────

    pub fn parking_rows(&self) -> u32 {
        self.horizontal_roads - 1
    }

    pub fn parking_cols(&self) -> u32 {
        self.vertical_roads - 1
    }

    pub fn cluster_width(&self) -> f32 {
        self.spaces_per_row as f32 * (self.space_width + self.spacing) - self.spacing
    }

    pub fn cluster_height(&self) -> f32 {
        self.spaces_per_col as f32 * (self.space_height + self.spacing) - self.spacing
    }

    pub fn canvas_width(&self) -> f32 {
        2.0 * self.wall_space
            + self.vertical_roads as f32 * self.road_width
            + self.parking_cols() as f32 * self.cluster_width()
    }

    pub fn canvas_height(&self) -> f32 {
        self.lot_bottom() + self.entrance_apron_height
    }

    /// Lower edge of the bottom road; the apron starts here.
    pub fn lot_bottom(&self) -> f32 {
        self.wall_space
            + self.horizontal_roads as f32 * self.road_width
            + self.parking_rows() as f32 * self.cluster_height()
    }

    /// Total number of spaces in the lot.
    pub fn space_count(&self) -> usize {
        (self.parking_rows() * self.parking_cols() * self.spaces_per_row * self.spaces_per_col) as usize
    }

    // ── Roads ────────────────────────────────────────────────────────────────

    /// Upper edge of horizontal road `i` (0 = top).
    pub fn horizontal_road_top(&self, i: u32) -> f32 {
        self.wall_space + i as f32 * (self.road_width + self.cluster_height())
    }

    pub fn horizontal_road_center(&self, i: u32) -> f32 {
        self.horizontal_road_top(i) + self.road_width / 2.0
    }

    /// Left edge of vertical road `j` (0 = left).
    pub fn vertical_road_left(&self, j: u32) -> f32 {
        self.wall_space + j as f32 * (self.road_width + self.cluster_width())
    }

    pub fn vertical_road_center(&self, j: u32) -> f32 {
        self.vertical_road_left(j) + self.road_width / 2.0
    }

    /// Perpendicular distance of a lane centre from its road's centre line.
    pub fn lane_offset(&self) -> f32 {
        self.road_width / 4.0
    }

    /// A point closer than this to an intersection centre counts as inside
    /// the intersection.
    pub fn intersection_radius(&self) -> f32 {
        self.road_width / 2.0 + 10.0
    }

    // ── Entrance ─────────────────────────────────────────────────────────────

    pub fn entrance_left(&self) -> f32 {
        (self.canvas_width() - self.entrance_width) / 2.0
    }

    pub fn entrance_right(&self) -> f32 {
        self.entrance_left() + self.entrance_width
    }

    pub fn entrance_center_x(&self) -> f32 {
        self.entrance_left() + self.entrance_width / 2.0
    }

    /// `true` if `x` lies inside the entrance gap (edges inclusive).
    #[inline]
    pub fn in_entrance_gap(&self, x: f32) -> bool {
        x >= self.entrance_left() && x <= self.entrance_right()
    }

    /// Centre of the apron; the road graph's entrance node sits here.
    pub fn entrance_point(&self) -> Point {
        Point::new(self.entrance_center_x(), self.lot_bottom() + self.entrance_apron_height / 2.0)
    }

    // ── Spaces ───────────────────────────────────────────────────────────────

    /// Top-left corner of the cluster at (`row`, `col`).
    pub fn cluster_origin(&self, row: u32, col: u32) -> Point {
        Point::new(
            self.wall_space + self.road_width + col as f32 * (self.cluster_width() + self.road_width),
            self.wall_space + self.road_width + row as f32 * (self.cluster_height() + self.road_width),
        )
    }

    /// Footprint of space (`i` down, `j` across) of a cluster.
    pub fn space_rect(&self, row: u32, col: u32, i: u32, j: u32) -> Rect {
        let origin = self.cluster_origin(row, col);
        Rect::new(
            origin.x + j as f32 * (self.space_width + self.spacing),
            origin.y + i as f32 * (self.space_height + self.spacing),
            self.space_width,
            self.space_height,
        )
    }

    /// Side of the cluster a space in line `i` opens onto.
    pub fn space_side(&self, i: u32) -> SpaceSide {
        if (i as f32) < self.spaces_per_col as f32 / 2.0 { SpaceSide::Top } else { SpaceSide::Bottom }
    }

    /// Index of the horizontal road a space of cluster row `row` on `side`
    /// opens onto.
    pub fn adjacent_road(&self, row: u32, side: SpaceSide) -> u32 {
        match side {
            SpaceSide::Top => row,
            SpaceSide::Bottom => row + 1,
        }
    }

    /// Bounding box of a car centred at `center` facing `heading`.
    #[inline]
    pub fn car_box(&self, center: Point, heading: Heading) -> Rect {
        Rect::car(center, heading, self.car_width, self.car_length)
    }
}
