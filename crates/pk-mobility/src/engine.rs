//! The per-bot step: candidate position, validation, commit or block.

use log::trace;

use pk_agent::{Bot, BotState};
use pk_core::{BehaviorConfig, Heading, Point, SimClock};
use pk_lot::{SpaceExclusion, collides_with_space, collides_with_vehicles, collides_with_wall};
use pk_spatial::{on_road, snap_to_lane, within_boundary};

use pk_behavior::{Block, SimContext};

use crate::{MobilityError, MobilityResult};

/// Result of [`MobilityEngine::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// The bot moved.
    Moved,
    /// The step was refused; the bot stayed put.
    Blocked(Block),
    /// Parked bots do not move.
    Idle,
}

/// Moves bots and validates their steps against the lot geometry.
///
/// Holds only tunables; positions and blocked flags live on the [`Bot`].
#[derive(Debug, Clone)]
pub struct MobilityEngine {
    /// Largest lateral lane correction per step.
    snap_step:        f32,
    /// Inside this distance of a free target, approaching steps skip the
    /// space and wall tests.
    approach_radius:  f32,
    /// Spaces this close to a freshly exited bot are ignored ...
    exclusion_radius: f32,
    /// ... for this many ticks after it pulled out.
    exclusion_ticks:  u64,
}

impl MobilityEngine {
    pub fn new(config: &BehaviorConfig, clock: &SimClock) -> MobilityResult<Self> {
        let distances = [
            ("lane_snap_step", config.lane_snap_step),
            ("approach_radius", config.approach_radius),
            ("exit_exclusion_radius", config.exit_exclusion_radius),
        ];
        for (name, v) in distances {
            if !v.is_finite() || v < 0.0 {
                return Err(MobilityError::Config(format!("{name} must be a non-negative number, got {v}")));
            }
        }
        Ok(Self {
            snap_step: config.lane_snap_step,
            approach_radius: config.approach_radius,
            exclusion_radius: config.exit_exclusion_radius,
            exclusion_ticks: clock.ticks_for_ms(config.exit_exclusion_ms),
        })
    }

    /// Try to move `bot` one step along its heading.
    ///
    /// On success the position is committed, nudged toward the lane, and the
    /// blocked flag cleared.  On failure only the blocked flag changes.
    pub fn step(&self, bot: &mut Bot, ctx: &SimContext<'_>) -> StepOutcome {
        if bot.is_parked() {
            return StepOutcome::Idle;
        }
        let layout = ctx.layout;
        let pos = bot.pos;
        let candidate = pos.step(bot.heading, bot.speed);

        let in_gap = layout.in_entrance_gap(pos.x);
        let leaving = bot.heading == Heading::South
            && pos.y >= layout.lot_bottom()
            && in_gap
            && candidate.y > layout.canvas_height();
        let arriving = bot.heading == Heading::North && pos.y >= layout.canvas_height() && in_gap;
        if leaving || arriving {
            self.commit(bot, ctx, candidate);
            return StepOutcome::Moved;
        }

        if !(on_road(layout, candidate) && within_boundary(layout, candidate)) {
            trace!("bot {} off road at {candidate}", bot.id);
            bot.was_blocked = true;
            return StepOutcome::Blocked(Block::OffRoad);
        }

        let body = layout.car_box(candidate, bot.heading);
        let approaching = self.approaching_target(bot, ctx, candidate);
        let space = !approaching && collides_with_space(ctx.lot, &body, self.exclusion(bot, ctx));
        let wall = !approaching && collides_with_wall(layout, candidate, &body);
        let vehicle = collides_with_vehicles(&body, ctx.player.and_then(|p| p.obstacle(layout)));

        if space || wall || vehicle {
            bot.was_blocked = true;
            return StepOutcome::Blocked(Block::Collision { space, wall, vehicle });
        }
        self.commit(bot, ctx, candidate);
        StepOutcome::Moved
    }

    fn commit(&self, bot: &mut Bot, ctx: &SimContext<'_>, to: Point) {
        bot.pos = snap_to_lane(ctx.layout, to, bot.heading, self.snap_step);
        bot.was_blocked = false;
    }

    /// A parking bot near its free target may drive into it, or make any step
    /// that brings it closer.
    fn approaching_target(&self, bot: &Bot, ctx: &SimContext<'_>, candidate: Point) -> bool {
        let Some(target) = bot.target() else { return false };
        if ctx.lot.is_occupied(target) {
            return false;
        }
        let Ok(space) = ctx.lot.space(target) else { return false };
        let center = space.center();
        let now = bot.pos.distance(center);
        if now >= self.approach_radius {
            return false;
        }
        ctx.layout.car_box(candidate, bot.heading).overlaps(&space.rect) || candidate.distance(center) < now
    }

    /// Spaces the bot's body may overlap without counting as a collision.
    fn exclusion(&self, bot: &Bot, ctx: &SimContext<'_>) -> SpaceExclusion {
        match bot.state {
            BotState::Parking { target, .. } if !ctx.lot.is_occupied(target) => SpaceExclusion::space(target),
            BotState::Exiting { just_left: Some(space), left_at, .. } => SpaceExclusion {
                space: Some(space),
                near:  (ctx.tick.since(left_at) < self.exclusion_ticks).then_some((bot.pos, self.exclusion_radius)),
            },
            _ => SpaceExclusion::NONE,
        }
    }
}
