//! A single autonomous car and its behavior state.
//!
//! # State machine
//!
//! ```text
//!            adopt nearest free space
//!  Searching ─────────────────────────▶ Parking ──── lined up, space free ───▶ Parked
//!      ▲                                   │
//!      └──────── target lost ──────────────┘
//!
//!  Exiting ─── below the canvas ───▶ (removed)
//! ```
//!
//! Each variant of [`BotState`] carries only the fields meaningful in that
//! state, so a parked bot has no route and a searching bot has no target.

use std::fmt;

use pk_core::{BotId, Heading, Point, SpaceId, Tick};

// ── RouteProgress ─────────────────────────────────────────────────────────────

/// A planned route as waypoint coordinates plus a cursor to the next one.
///
/// An empty route means planning ran and produced nothing (start and goal
/// are the same node, or no path exists); the bot then steers directly.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RouteProgress {
    waypoints: Vec<Point>,
    cursor:    usize,
}

impl RouteProgress {
    pub fn new(waypoints: Vec<Point>) -> Self {
        Self { waypoints, cursor: 0 }
    }

    /// `true` if planning produced no waypoints at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// `true` once every waypoint has been passed.
    #[inline]
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.waypoints.len()
    }

    /// The waypoint currently steered toward.
    #[inline]
    pub fn current(&self) -> Option<Point> {
        self.waypoints.get(self.cursor).copied()
    }

    /// Move the cursor past the current waypoint.
    #[inline]
    pub fn advance(&mut self) {
        if self.cursor < self.waypoints.len() {
            self.cursor += 1;
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn waypoints(&self) -> &[Point] {
        &self.waypoints
    }

    /// Waypoints not yet reached.
    pub fn remaining(&self) -> &[Point] {
        &self.waypoints[self.cursor.min(self.waypoints.len())..]
    }
}

// ── BotState ──────────────────────────────────────────────────────────────────

/// Behavior state of a bot.
///
/// `route` is `None` until the bot first plans toward its current goal.
/// Entering a new state always starts with `route: None`, so a new goal
/// always gets a fresh route.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BotState {
    /// No target; looking for the nearest free space.
    Searching,

    /// Driving to `target`.
    Parking {
        target: SpaceId,
        route:  Option<RouteProgress>,
    },

    /// Driving out through the entrance.
    Exiting {
        route:     Option<RouteProgress>,
        /// The space this bot pulled out of, if it came from one.
        just_left: Option<SpaceId>,
        /// When it pulled out (or entered the lot).
        left_at:   Tick,
    },

    /// Standing in `space`.  No longer moves.
    Parked { space: SpaceId },
}

impl BotState {
    /// A fresh parking state toward `target`.
    pub fn parking(target: SpaceId) -> Self {
        BotState::Parking { target, route: None }
    }

    /// A fresh exiting state.
    pub fn exiting(just_left: Option<SpaceId>, left_at: Tick) -> Self {
        BotState::Exiting { route: None, just_left, left_at }
    }

    pub fn kind(&self) -> StateKind {
        match self {
            BotState::Searching => StateKind::Searching,
            BotState::Parking { .. } => StateKind::Parking,
            BotState::Exiting { .. } => StateKind::Exiting,
            BotState::Parked { .. } => StateKind::Parked,
        }
    }

    /// The space this bot is headed for, if parking.
    #[inline]
    pub fn target(&self) -> Option<SpaceId> {
        match self {
            BotState::Parking { target, .. } => Some(*target),
            _ => None,
        }
    }

    /// The cached route of a parking or exiting bot.
    pub fn route(&self) -> Option<&RouteProgress> {
        match self {
            BotState::Parking { route, .. } | BotState::Exiting { route, .. } => route.as_ref(),
            _ => None,
        }
    }

    pub fn route_mut(&mut self) -> Option<&mut Option<RouteProgress>> {
        match self {
            BotState::Parking { route, .. } | BotState::Exiting { route, .. } => Some(route),
            _ => None,
        }
    }
}

/// Field-less mirror of [`BotState`] for counting, filtering and output.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum StateKind {
    Searching,
    Parking,
    Exiting,
    Parked,
}

impl StateKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StateKind::Searching => "searching",
            StateKind::Parking => "parking",
            StateKind::Exiting => "exiting",
            StateKind::Parked => "parked",
        }
    }
}

impl fmt::Display for StateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Bot ───────────────────────────────────────────────────────────────────────

/// One autonomous car.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Bot {
    pub id:      BotId,
    /// Centre of the car.
    pub pos:     Point,
    pub heading: Heading,
    /// Distance covered per tick.
    pub speed:   f32,
    pub state:   BotState,

    /// The last attempted step failed.
    pub was_blocked: bool,
    /// Consecutive ticks navigation was skipped because the bot was blocked.
    pub stuck_ticks: u32,
    /// When the heading was last changed by a turn decision (blocked
    /// avoidance or a random search turn).
    pub last_turn:   Option<Tick>,
}

impl Bot {
    pub fn new(id: BotId, pos: Point, heading: Heading, speed: f32, state: BotState) -> Self {
        Self {
            id,
            pos,
            heading,
            speed,
            state,
            was_blocked: false,
            stuck_ticks: 0,
            last_turn: None,
        }
    }

    #[inline]
    pub fn is_parked(&self) -> bool {
        matches!(self.state, BotState::Parked { .. })
    }

    #[inline]
    pub fn is_exiting(&self) -> bool {
        matches!(self.state, BotState::Exiting { .. })
    }

    #[inline]
    pub fn target(&self) -> Option<SpaceId> {
        self.state.target()
    }

    /// `true` if at least `cooldown` ticks have passed since the last turn
    /// decision.  A bot that never turned is always ready.
    pub fn turn_ready(&self, now: Tick, cooldown: u64) -> bool {
        self.last_turn.is_none_or(|t| now.since(t) > cooldown)
    }

    /// Record a turn decision at `now`.
    pub fn turn(&mut self, heading: Heading, now: Tick) {
        self.heading = heading;
        self.last_turn = Some(now);
    }
}
