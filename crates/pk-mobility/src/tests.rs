//! Unit tests for pk-mobility.
//!
//! Geometry of the default layout used below: horizontal road 0 spans
//! y 20..100 (centre 60), space 0 is x 100..140 × y 100..160 and space 1
//! x 145..185 × y 100..160, the entrance gap is x 265..365 and the canvas is
//! 570 high.

use pk_agent::{Bot, BotState};
use pk_core::{BehaviorConfig, BotId, Heading, LotLayout, Point, SimClock, Tick};
use pk_lot::{ParkingLot, PlayerCar};
use pk_spatial::{AStarRouter, RoadNetwork, build_lot_network};

use pk_behavior::SimContext;

use crate::MobilityEngine;

// ── Helpers ───────────────────────────────────────────────────────────────────

struct World {
    layout:  LotLayout,
    network: RoadNetwork,
    lot:     ParkingLot,
    player:  Option<PlayerCar>,
}

impl World {
    fn empty() -> Self {
        let layout = LotLayout::default();
        let network = build_lot_network(&layout).unwrap();
        let lot = ParkingLot::new(&layout);
        Self { layout, network, lot, player: None }
    }

    fn ctx(&self, tick: u64) -> SimContext<'_> {
        let mut ctx = SimContext::new(Tick(tick), &self.layout, &self.network, &AStarRouter, &self.lot);
        ctx.player = self.player;
        ctx
    }
}

fn engine() -> MobilityEngine {
    MobilityEngine::new(&BehaviorConfig::default(), &SimClock::new(16)).unwrap()
}

fn bot(x: f32, y: f32, heading: Heading, state: BotState) -> Bot {
    Bot::new(BotId(0), Point::new(x, y), heading, 1.5, state)
}

// ── Plain steps ───────────────────────────────────────────────────────────────

#[cfg(test)]
mod stepping {
    use pk_agent::BotState;
    use pk_core::{BehaviorConfig, Heading, SimClock, SpaceId};
    use pk_lot::Occupant;

    use super::{World, bot, engine};
    use crate::{MobilityEngine, StepOutcome};

    #[test]
    fn straight_step_drifts_into_lane() {
        let w = World::empty();
        // Eastbound lane of the top road is y = 80.
        let mut b = bot(200.0, 70.0, Heading::East, BotState::Searching);
        assert_eq!(engine().step(&mut b, &w.ctx(1)), StepOutcome::Moved);
        assert!((b.pos.x - 201.5).abs() < 1e-4);
        assert!((b.pos.y - 70.5).abs() < 1e-4);
        assert!(!b.was_blocked);
    }

    #[test]
    fn parked_bot_is_idle() {
        let w = World::empty();
        let mut b = bot(120.0, 130.0, Heading::North, BotState::Parked { space: SpaceId(0) });
        assert_eq!(engine().step(&mut b, &w.ctx(1)), StepOutcome::Idle);
        assert_eq!(b.pos.x, 120.0);
        assert_eq!(b.pos.y, 130.0);
    }

    #[test]
    fn off_road_step_is_refused() {
        let w = World::empty();
        let mut b = bot(200.0, 90.0, Heading::South, BotState::Searching);
        b.speed = 20.0;
        let out = engine().step(&mut b, &w.ctx(1));
        assert_eq!(out, StepOutcome::Blocked(pk_behavior::Block::OffRoad));
        assert!(b.was_blocked);
        assert_eq!(b.pos.y, 90.0);
    }

    #[test]
    fn blocked_flag_clears_on_next_move() {
        let w = World::empty();
        let mut b = bot(200.0, 70.0, Heading::East, BotState::Searching);
        b.was_blocked = true;
        assert_eq!(engine().step(&mut b, &w.ctx(1)), StepOutcome::Moved);
        assert!(!b.was_blocked);
    }

    #[test]
    fn rejects_negative_tunables() {
        let cfg = BehaviorConfig { approach_radius: -1.0, ..BehaviorConfig::default() };
        assert!(MobilityEngine::new(&cfg, &SimClock::new(16)).is_err());
        let cfg = BehaviorConfig { lane_snap_step: f32::NAN, ..BehaviorConfig::default() };
        assert!(MobilityEngine::new(&cfg, &SimClock::new(16)).is_err());
    }

    #[test]
    fn occupied_target_gets_no_allowance() {
        let mut w = World::empty();
        w.lot.occupy(SpaceId(1), Occupant::Static).unwrap();
        let mut b = bot(150.0, 90.0, Heading::South, BotState::parking(SpaceId(1)));
        assert!(matches!(engine().step(&mut b, &w.ctx(1)), StepOutcome::Blocked(_)));
    }
}

// ── Collisions ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod collisions {
    use pk_agent::BotState;
    use pk_core::{Heading, Point, SpaceId, Tick};
    use pk_lot::PlayerCar;

    use pk_behavior::Block;

    use super::{World, bot, engine};
    use crate::StepOutcome;

    #[test]
    fn nose_into_spaces() {
        let w = World::empty();
        // Heading south at x = 150 the body covers spaces 0 and 1.
        let mut b = bot(150.0, 90.0, Heading::South, BotState::Searching);
        let out = engine().step(&mut b, &w.ctx(1));
        assert_eq!(out, StepOutcome::Blocked(Block::Collision { space: true, wall: false, vehicle: false }));
        assert!(b.was_blocked);
    }

    #[test]
    fn top_wall() {
        let w = World::empty();
        let mut b = bot(200.0, 40.0, Heading::North, BotState::Searching);
        let out = engine().step(&mut b, &w.ctx(1));
        assert_eq!(out, StepOutcome::Blocked(Block::Collision { space: false, wall: true, vehicle: false }));
    }

    #[test]
    fn walls_ignored_in_intersections() {
        let w = World::empty();
        // Top-left crossing is centred at (60, 60).
        let mut b = bot(60.0, 45.0, Heading::North, BotState::Searching);
        assert_eq!(engine().step(&mut b, &w.ctx(1)), StepOutcome::Moved);
    }

    #[test]
    fn player_blocks_bots() {
        let mut w = World::empty();
        w.player = Some(PlayerCar { pos: Point::new(230.0, 70.0), heading: Heading::East, parked: false });
        let mut b = bot(200.0, 70.0, Heading::East, BotState::Searching);
        let out = engine().step(&mut b, &w.ctx(1));
        assert_eq!(out, StepOutcome::Blocked(Block::Collision { space: false, wall: false, vehicle: true }));
    }

    #[test]
    fn parked_player_is_no_obstacle() {
        let mut w = World::empty();
        w.player = Some(PlayerCar { pos: Point::new(230.0, 70.0), heading: Heading::East, parked: true });
        let mut b = bot(200.0, 70.0, Heading::East, BotState::Searching);
        assert_eq!(engine().step(&mut b, &w.ctx(1)), StepOutcome::Moved);
    }

    #[test]
    fn approaching_a_free_target_skips_space_tests() {
        let w = World::empty();
        // Space 0 would block too, but the bot is within reach of space 1.
        let mut b = bot(150.0, 90.0, Heading::South, BotState::parking(SpaceId(1)));
        assert_eq!(engine().step(&mut b, &w.ctx(1)), StepOutcome::Moved);
        assert!(b.pos.y > 90.0);
    }

    #[test]
    fn fresh_exit_ignores_nearby_spaces() {
        let w = World::empty();
        let state = BotState::exiting(Some(SpaceId(1)), Tick(0));
        let mut b = bot(150.0, 90.0, Heading::South, state.clone());
        assert_eq!(engine().step(&mut b, &w.ctx(10)), StepOutcome::Moved);

        // 2 s at 16 ms per tick is 125 ticks; after that only the left
        // space itself stays excluded.
        let mut b = bot(150.0, 90.0, Heading::South, state);
        let out = engine().step(&mut b, &w.ctx(500));
        assert!(matches!(out, StepOutcome::Blocked(Block::Collision { space: true, .. })));
    }
}

// ── Entrance passage ──────────────────────────────────────────────────────────

#[cfg(test)]
mod entrance {
    use pk_agent::BotState;
    use pk_core::{Heading, Tick};

    use pk_behavior::Block;

    use super::{World, bot, engine};
    use crate::StepOutcome;

    #[test]
    fn leaving_below_the_canvas() {
        let w = World::empty();
        let mut b = bot(335.0, 569.5, Heading::South, BotState::exiting(None, Tick(0)));
        assert_eq!(engine().step(&mut b, &w.ctx(1)), StepOutcome::Moved);
        assert!(b.pos.y > w.layout.canvas_height());
    }

    #[test]
    fn arriving_from_below() {
        let w = World::empty();
        let mut b = bot(295.0, 590.0, Heading::North, BotState::Searching);
        assert_eq!(engine().step(&mut b, &w.ctx(1)), StepOutcome::Moved);
        assert!((b.pos.y - 588.5).abs() < 1e-4);
    }

    #[test]
    fn below_the_wall_outside_the_gap() {
        let w = World::empty();
        let mut b = bot(200.0, 590.0, Heading::North, BotState::Searching);
        assert_eq!(engine().step(&mut b, &w.ctx(1)), StepOutcome::Blocked(Block::OffRoad));
    }
}

// ── Player checks ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod player {
    use pk_core::{Heading, Point, SpaceId};
    use pk_lot::{Occupant, PlayerCar};

    use super::World;
    use crate::{player_park_target, player_step_allowed};

    #[test]
    fn step_checks_road_and_bots() {
        let w = World::empty();
        let pos = Point::new(200.0, 70.0);
        assert!(player_step_allowed(&w.layout, &w.lot, pos, Heading::East, []));

        let bot_box = w.layout.car_box(Point::new(220.0, 70.0), Heading::West);
        assert!(!player_step_allowed(&w.layout, &w.lot, pos, Heading::East, [bot_box]));

        assert!(!player_step_allowed(&w.layout, &w.lot, Point::new(200.0, 130.0), Heading::East, []));
    }

    #[test]
    fn park_target_is_first_free_lined_up_space() {
        let mut w = World::empty();
        // On the middle road below space 4; space 16 opens onto the same road.
        let mut car = PlayerCar { pos: Point::new(115.0, 260.0), heading: Heading::East, parked: false };
        assert_eq!(player_park_target(&w.layout, &w.lot, &car), Some(SpaceId(4)));

        w.lot.occupy(SpaceId(4), Occupant::Static).unwrap();
        assert_eq!(player_park_target(&w.layout, &w.lot, &car), Some(SpaceId(16)));

        car.parked = true;
        assert_eq!(player_park_target(&w.layout, &w.lot, &car), None);
    }

    #[test]
    fn no_target_off_horizontal_roads() {
        let w = World::empty();
        // On the left vertical road, between the top and middle roads.
        let car = PlayerCar { pos: Point::new(60.0, 160.0), heading: Heading::South, parked: false };
        assert_eq!(player_park_target(&w.layout, &w.lot, &car), None);
    }
}
