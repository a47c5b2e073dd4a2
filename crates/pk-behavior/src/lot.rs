//! `LotBehavior` — the bot state machine of the parking lot.
//!
//! | State       | Each tick                                                     |
//! |-------------|---------------------------------------------------------------|
//! | `Searching` | adopt the nearest free unclaimed space, or keep patrolling    |
//! | `Parking`   | give up a lost target, else follow the route to the space     |
//! | `Exiting`   | leave once below the canvas, else follow the route out        |
//! | `Parked`    | nothing                                                       |
//!
//! A bot blocked on its last step skips navigation, so the avoidance turn
//! from [`on_blocked`](BehaviorModel::on_blocked) gets a chance to work,
//! until it has been stuck for `stuck_ticks` ticks in a row.

use log::{debug, info, trace};

use pk_agent::{Bot, BotState, RouteProgress};
use pk_core::{BehaviorConfig, BotRng, Heading, Point, SimClock, SpaceId};
use pk_spatial::{at_intersection, horizontal_road_at};

use crate::steer::{
    Follow, align_along_road, alternate_heading, exit_fallback, follow, needs_plan, plan_route, search_turn,
};
use crate::{BehaviorError, BehaviorModel, BehaviorResult, Block, Intent, SimContext};

/// The lot's bot behavior.  Holds tunables only; all per-bot state lives in
/// the [`Bot`].
#[derive(Debug, Clone)]
pub struct LotBehavior {
    config:          BehaviorConfig,
    /// `blocked_cooldown_ms` in ticks.
    blocked_cooldown: u64,
    /// `search_turn_cooldown_ms` in ticks.
    search_cooldown:  u64,
}

impl LotBehavior {
    /// Validate `config` and convert its durations with `clock`.
    pub fn new(config: &BehaviorConfig, clock: &SimClock) -> BehaviorResult<Self> {
        let distances = [
            ("waypoint_reach", config.waypoint_reach),
            ("hold_heading_radius", config.hold_heading_radius),
            ("align_tolerance", config.align_tolerance),
        ];
        for (name, v) in distances {
            if !v.is_finite() || v < 0.0 {
                return Err(BehaviorError::Config(format!("{name} must be a non-negative number, got {v}")));
            }
        }
        if config.waypoint_reach == 0.0 {
            return Err(BehaviorError::Config("waypoint_reach must be positive".into()));
        }
        Ok(Self {
            config: config.clone(),
            blocked_cooldown: clock.ticks_for_ms(config.blocked_cooldown_ms),
            search_cooldown: clock.ticks_for_ms(config.search_turn_cooldown_ms),
        })
    }

    pub fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    /// Navigation gate: run it unless the last step was blocked, and even
    /// then once the bot has been stuck long enough.
    fn may_navigate(&self, bot: &mut Bot) -> bool {
        if !bot.was_blocked || bot.stuck_ticks > self.config.stuck_ticks {
            bot.stuck_ticks = 0;
            true
        } else {
            bot.stuck_ticks += 1;
            false
        }
    }

    // ── Searching ─────────────────────────────────────────────────────────

    fn search(&self, bot: &mut Bot, ctx: &SimContext<'_>, rng: &mut BotRng) -> Vec<Intent> {
        let nearest = ctx
            .lot
            .spaces()
            .iter()
            .filter(|s| ctx.lot.is_available(s.id))
            .min_by(|a, b| bot.pos.distance(a.center()).total_cmp(&bot.pos.distance(b.center())));

        if let Some(space) = nearest {
            let target = space.id;
            debug!("bot {} adopts {target}", bot.id);
            bot.state = BotState::parking(target);
            self.navigate_to_space(bot, target, ctx);
            return vec![Intent::Claim(target)];
        }

        // Lot is full: keep driving, and now and then turn at a crossing.
        if !bot.was_blocked
            && bot.turn_ready(ctx.tick, self.search_cooldown)
            && at_intersection(ctx.layout, bot.pos)
        {
            bot.turn(search_turn(bot.heading, rng), ctx.tick);
        }
        vec![]
    }

    // ── Parking ───────────────────────────────────────────────────────────

    /// The target is occupied and this bot will not get it: either it has
    /// no route toward it, or the space is not the one about to be vacated.
    fn target_lost(&self, bot: &Bot, target: SpaceId, ctx: &SimContext<'_>) -> bool {
        if !ctx.lot.is_occupied(target) {
            return false;
        }
        let no_route = bot.state.route().is_some_and(RouteProgress::is_empty);
        no_route || ctx.next_to_vacate != Some(target)
    }

    fn navigate_to_space(&self, bot: &mut Bot, target: SpaceId, ctx: &SimContext<'_>) {
        let Ok(space) = ctx.lot.space(target) else { return };
        let center = space.center();
        let pos = bot.pos;
        let BotState::Parking { route, .. } = &mut bot.state else { return };

        if needs_plan(route) {
            let goal = ctx.network.nearest_node_to_space(center, Some(space.road));
            *route = Some(plan_route(ctx, pos, goal));
        }
        match follow(route, pos, self.config.waypoint_reach) {
            Follow::Toward(wp) => bot.heading = Heading::toward(pos, wp),
            Follow::Arrived => {
                // On the road in front of the space: line up along it.
                if horizontal_road_at(ctx.layout, pos).is_some() {
                    if let Some(h) = align_along_road(pos, center.x, self.config.align_tolerance) {
                        bot.heading = h;
                    }
                }
            }
            Follow::NoRoute => bot.heading = Heading::toward(pos, center),
        }
    }

    // ── Exiting ───────────────────────────────────────────────────────────

    fn navigate_to_exit(&self, bot: &mut Bot, ctx: &SimContext<'_>) {
        let layout = ctx.layout;
        let pos = bot.pos;
        let BotState::Exiting { route, .. } = &mut bot.state else { return };

        if pos.y >= layout.lot_bottom() && layout.in_entrance_gap(pos.x) {
            *route = None;
            bot.heading = Heading::South;
            return;
        }
        if needs_plan(route) {
            *route = Some(plan_route(ctx, pos, ctx.network.entrance()));
        }
        bot.heading = match follow(route, pos, self.config.waypoint_reach) {
            Follow::Toward(wp) => Heading::toward(pos, wp),
            Follow::Arrived => Heading::South,
            Follow::NoRoute => exit_fallback(layout, pos, self.config.align_tolerance, self.config.waypoint_reach),
        };
    }

    /// What a blocked bot is trying to get closer to.
    fn goal(&self, bot: &Bot, ctx: &SimContext<'_>) -> Option<Point> {
        match bot.state {
            BotState::Parking { target, .. } => ctx.lot.space(target).ok().map(|s| s.center()),
            BotState::Exiting { .. } => Some(ctx.layout.entrance_point()),
            _ => None,
        }
    }
}

impl BehaviorModel for LotBehavior {
    fn steer(&self, bot: &mut Bot, ctx: &SimContext<'_>, rng: &mut BotRng) -> Vec<Intent> {
        match bot.state {
            BotState::Parked { .. } => vec![],
            BotState::Exiting { .. } => {
                if bot.pos.y > ctx.layout.canvas_height() {
                    info!("bot {} left the lot at {}", bot.id, ctx.tick);
                    return vec![Intent::Depart];
                }
                if self.may_navigate(bot) {
                    self.navigate_to_exit(bot, ctx);
                }
                vec![]
            }
            BotState::Searching => self.search(bot, ctx, rng),
            BotState::Parking { target, .. } => {
                if self.target_lost(bot, target, ctx) {
                    debug!("bot {} lost {target}, searching again", bot.id);
                    bot.state = BotState::Searching;
                    return vec![Intent::Release(target)];
                }
                if self.may_navigate(bot) {
                    self.navigate_to_space(bot, target, ctx);
                }
                vec![]
            }
        }
    }

    fn on_blocked(&self, bot: &mut Bot, block: Block, ctx: &SimContext<'_>, rng: &mut BotRng) {
        // Pressing against the target's neighbours: the arrival check needs
        // the heading kept.
        if block.hit_space() {
            let near_target = bot
                .target()
                .and_then(|t| ctx.lot.space(t).ok())
                .is_some_and(|s| bot.pos.distance(s.center()) < self.config.hold_heading_radius);
            if near_target {
                return;
            }
        }
        if !bot.turn_ready(ctx.tick, self.blocked_cooldown) {
            return;
        }
        let goal = self.goal(bot, ctx);
        let heading = alternate_heading(bot.heading, bot.pos, goal, rng);
        trace!("bot {} blocked ({block:?}) heading {}, turning {heading}", bot.id, bot.heading);
        bot.turn(heading, ctx.tick);
    }

    fn settle(&self, bot: &mut Bot, ctx: &SimContext<'_>) -> Vec<Intent> {
        let Some(target) = bot.target() else { return vec![] };
        if ctx.lot.is_occupied(target) || ctx.lot.claims().claimant(target) != Some(bot.id) {
            return vec![];
        }
        if !ctx.lot.can_pull_in(ctx.layout, target, bot.pos, bot.heading) {
            return vec![];
        }
        let Ok(space) = ctx.lot.space(target) else { return vec![] };
        bot.pos = space.center();
        bot.heading = space.parked_heading();
        bot.state = BotState::Parked { space: target };
        bot.was_blocked = false;
        info!("bot {} parked in {target} at {}", bot.id, ctx.tick);
        vec![Intent::Park(target)]
    }
}
