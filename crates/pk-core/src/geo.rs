//! Planar geometry for the lot: points, axis-aligned boxes and headings.
//!
//! Coordinates are screen-style pixels: `x` grows east, `y` grows **south**.
//! `f32` is plenty for a lot a few hundred pixels across.

use std::fmt;

/// A 2-D position in lot pixels.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Euclidean distance.
    #[inline]
    pub fn distance(self, other: Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// The point `dist` pixels away along `heading`.
    #[inline]
    pub fn step(self, heading: Heading, dist: f32) -> Point {
        let (dx, dy) = heading.unit();
        Point::new(self.x + dx * dist, self.y + dy * dist)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.1}, {:.1})", self.x, self.y)
    }
}

// ── Rect ──────────────────────────────────────────────────────────────────────

/// Axis-aligned box given by its top-left corner and size.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x:      f32,
    pub y:      f32,
    pub width:  f32,
    pub height: f32,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Footprint of a car centred on `center`.  The long side follows the
    /// heading: north/south cars are `width × length`, east/west cars are
    /// `length × width`.
    pub fn car(center: Point, heading: Heading, width: f32, length: f32) -> Self {
        let (w, h) = if heading.is_vertical() { (width, length) } else { (length, width) };
        Self::new(center.x - w / 2.0, center.y - h / 2.0, w, h)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Overlap test.  Touching edges count as overlapping.
    #[inline]
    pub fn overlaps(&self, other: &Rect) -> bool {
        !(self.right() < other.x
            || other.right() < self.x
            || self.bottom() < other.y
            || other.bottom() < self.y)
    }

    /// `true` if the x-ranges of the two boxes overlap (edges inclusive).
    #[inline]
    pub fn overlaps_x(&self, other: &Rect) -> bool {
        !(self.right() < other.x || self.x > other.right())
    }
}

// ── Heading ───────────────────────────────────────────────────────────────────

/// One of the four cardinal directions a vehicle can face.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heading {
    North,
    East,
    South,
    West,
}

impl Heading {
    pub const ALL: [Heading; 4] = [Heading::North, Heading::East, Heading::South, Heading::West];

    /// Unit displacement in screen coordinates (north is `-y`).
    #[inline]
    pub fn unit(self) -> (f32, f32) {
        match self {
            Heading::North => (0.0, -1.0),
            Heading::East  => (1.0, 0.0),
            Heading::South => (0.0, 1.0),
            Heading::West  => (-1.0, 0.0),
        }
    }

    #[inline]
    pub fn opposite(self) -> Heading {
        match self {
            Heading::North => Heading::South,
            Heading::East  => Heading::West,
            Heading::South => Heading::North,
            Heading::West  => Heading::East,
        }
    }

    #[inline]
    pub fn is_vertical(self) -> bool {
        matches!(self, Heading::North | Heading::South)
    }

    /// Dominant-axis heading from `from` toward `to`.  Ties go to the
    /// vertical axis.
    pub fn toward(from: Point, to: Point) -> Heading {
        let dx = to.x - from.x;
        let dy = to.y - from.y;
        if dx.abs() > dy.abs() {
            if dx > 0.0 { Heading::East } else { Heading::West }
        } else if dy > 0.0 {
            Heading::South
        } else {
            Heading::North
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Heading::North => "north",
            Heading::East  => "east",
            Heading::South => "south",
            Heading::West  => "west",
        }
    }
}

impl fmt::Display for Heading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
