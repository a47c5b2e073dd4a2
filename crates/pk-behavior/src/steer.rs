//! Steering building blocks: route planning and following, direct-steering
//! fallbacks, and alternate headings for blocked bots.

use log::debug;

use pk_agent::RouteProgress;
use pk_core::{BotRng, Heading, LotLayout, NodeId, Point};

use crate::SimContext;

// ── Routes ────────────────────────────────────────────────────────────────────

/// Plan from the node nearest `from` to `goal`.
///
/// Planning failures are not errors for a bot: an empty route makes it steer
/// directly toward its goal instead.
pub fn plan_route(ctx: &SimContext<'_>, from: Point, goal: Option<NodeId>) -> RouteProgress {
    let (Some(start), Some(goal)) = (ctx.network.nearest_node(from), goal) else {
        return RouteProgress::default();
    };
    match ctx.router.route(ctx.network, start, goal) {
        Ok(route) => RouteProgress::new(route.waypoints),
        Err(e) => {
            debug!("{e}; steering directly");
            RouteProgress::default()
        }
    }
}

/// `true` if the cached route should be (re)planned: never planned, or
/// planning came back empty last time.
#[inline]
pub fn needs_plan(route: &Option<RouteProgress>) -> bool {
    route.as_ref().is_none_or(RouteProgress::is_empty)
}

/// Outcome of [`follow`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Follow {
    /// Head for this waypoint.
    Toward(Point),
    /// The last waypoint was reached this tick.
    Arrived,
    /// No route, or it was finished earlier.
    NoRoute,
}

/// Advance past the current waypoint if `pos` is within `reach` of it, and
/// report what to steer toward.
pub fn follow(route: &mut Option<RouteProgress>, pos: Point, reach: f32) -> Follow {
    let Some(r) = route.as_mut().filter(|r| !r.is_finished()) else {
        return Follow::NoRoute;
    };
    if r.current().is_some_and(|wp| pos.distance(wp) < reach) {
        r.advance();
    }
    match r.current() {
        Some(wp) => Follow::Toward(wp),
        None => Follow::Arrived,
    }
}

// ── Direct steering ───────────────────────────────────────────────────────────

/// Heading toward the exit without a route: south to the bottom road, along
/// it to the entrance, then south again.
pub fn exit_fallback(layout: &LotLayout, pos: Point, tolerance: f32, reach: f32) -> Heading {
    let bottom_road = layout.horizontal_road_center(layout.horizontal_roads.saturating_sub(1));
    let gate = layout.entrance_center_x();
    if pos.y < bottom_road - tolerance {
        Heading::South
    } else if (pos.x - gate).abs() > reach {
        if pos.x < gate { Heading::East } else { Heading::West }
    } else {
        Heading::South
    }
}

/// East or west along the road toward `x`, if farther than `tolerance`.
pub fn align_along_road(pos: Point, x: f32, tolerance: f32) -> Option<Heading> {
    let dx = x - pos.x;
    (dx.abs() > tolerance).then_some(if dx > 0.0 { Heading::East } else { Heading::West })
}

// ── Turning ───────────────────────────────────────────────────────────────────

/// `true` if moving along `heading` from `from` gets closer to `to`.
#[inline]
pub fn reduces_distance(heading: Heading, from: Point, to: Point) -> bool {
    let (ux, uy) = heading.unit();
    (to.x - from.x) * ux + (to.y - from.y) * uy > 0.0
}

/// Random turn for a searching bot at a crossing: left or right, never
/// straight on or back.
pub fn search_turn(current: Heading, rng: &mut BotRng) -> Heading {
    let (a, b) = if current.is_vertical() {
        (Heading::East, Heading::West)
    } else {
        (Heading::North, Heading::South)
    };
    if rng.gen_bool(0.5) { a } else { b }
}

/// New heading for a bot whose step in `current` was refused.
///
/// The two side headings are always candidates; those that bring the bot
/// closer to `goal` weigh three times as much.  Turning back is only a
/// candidate when it is the sole heading that gets closer to the goal.
pub fn alternate_heading(current: Heading, pos: Point, goal: Option<Point>, rng: &mut BotRng) -> Heading {
    let back = current.opposite();
    let closer = |h: Heading| goal.is_some_and(|g| reduces_distance(h, pos, g));

    let mut options: Vec<(Heading, u32)> = Heading::ALL
        .into_iter()
        .filter(|&h| h != current && h != back)
        .map(|h| (h, if closer(h) { 3 } else { 1 }))
        .collect();
    if closer(back) && !options.iter().any(|&(h, _)| closer(h)) {
        options.push((back, 3));
    }
    rng.choose_weighted(&options).copied().unwrap_or(back)
}
