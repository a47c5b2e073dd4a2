//! Unit tests for pk-core primitives.

#[cfg(test)]
mod ids {
    use crate::{BotId, NodeId, SpaceId};

    #[test]
    fn index_roundtrip() {
        let id = BotId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(BotId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn ordering() {
        assert!(BotId(0) < BotId(1));
        assert!(SpaceId(100) > SpaceId(99));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(BotId::INVALID.0, u32::MAX);
        assert_eq!(NodeId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(SpaceId(7).to_string(), "S7");
        assert_eq!(format!("{} -> {}", BotId(3), NodeId(0)), "B3 -> N0");
    }
}

#[cfg(test)]
mod geo {
    use crate::{Heading, Point, Rect};

    #[test]
    fn distance_and_step() {
        let p = Point::new(0.0, 0.0);
        assert_eq!(p.distance(Point::new(3.0, 4.0)), 5.0);
        assert_eq!(p.step(Heading::North, 2.0), Point::new(0.0, -2.0));
        assert_eq!(p.step(Heading::East, 1.5), Point::new(1.5, 0.0));
    }

    #[test]
    fn car_box_swaps_with_heading() {
        let c = Point::new(100.0, 100.0);
        let v = Rect::car(c, Heading::South, 30.0, 50.0);
        assert_eq!((v.width, v.height), (30.0, 50.0));
        let h = Rect::car(c, Heading::West, 30.0, 50.0);
        assert_eq!((h.width, h.height), (50.0, 30.0));
        assert_eq!(h.center(), c);
    }

    #[test]
    fn touching_edges_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 10.0, 10.0);
        let c = Rect::new(10.5, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn x_overlap_ignores_y() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let far_below = Rect::new(5.0, 500.0, 10.0, 10.0);
        assert!(a.overlaps_x(&far_below));
        assert!(!a.overlaps(&far_below));
    }

    #[test]
    fn heading_toward_dominant_axis() {
        let o = Point::new(0.0, 0.0);
        assert_eq!(Heading::toward(o, Point::new(10.0, 3.0)), Heading::East);
        assert_eq!(Heading::toward(o, Point::new(-10.0, 3.0)), Heading::West);
        assert_eq!(Heading::toward(o, Point::new(1.0, -8.0)), Heading::North);
        // Tie goes vertical.
        assert_eq!(Heading::toward(o, Point::new(5.0, 5.0)), Heading::South);
    }

    #[test]
    fn opposites() {
        for h in Heading::ALL {
            assert_eq!(h.opposite().opposite(), h);
            assert_ne!(h.opposite(), h);
        }
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, SimConfig, Tick};

    #[test]
    fn tick_arithmetic() {
        let t = Tick(10);
        assert_eq!(t + 5, Tick(15));
        assert_eq!(Tick(15) - Tick(10), 5u64);
        assert_eq!(Tick(3).since(Tick(10)), 0);
    }

    #[test]
    fn clock_elapsed() {
        let mut clock = SimClock::new(16);
        assert_eq!(clock.elapsed_ms(), 0);
        clock.advance();
        clock.advance();
        assert_eq!(clock.elapsed_ms(), 32);
        assert_eq!(clock.current_tick, Tick(2));
    }

    #[test]
    fn ms_to_ticks_rounds_up() {
        let clock = SimClock::new(16);
        assert_eq!(clock.ticks_for_ms(0), 0);
        assert_eq!(clock.ticks_for_ms(16), 1);
        assert_eq!(clock.ticks_for_ms(17), 2);
        assert_eq!(clock.ticks_for_ms(300), 19);
        assert_eq!(clock.ticks_for_ms(5_000), 313);
    }

    #[test]
    fn config_validation() {
        assert!(SimConfig::default().validate().is_ok());
        let bad = SimConfig { tick_duration_ms: 0, ..SimConfig::default() };
        assert!(bad.validate().is_err());
        let bad = SimConfig { bot_speed: 0.0, ..SimConfig::default() };
        assert!(bad.validate().is_err());
        let bad = SimConfig { bot_speed: f32::NAN, ..SimConfig::default() };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn end_tick() {
        let cfg = SimConfig { total_ticks: 600, ..SimConfig::default() };
        assert_eq!(cfg.end_tick(), Tick(600));
        assert_eq!(cfg.make_clock().tick_duration_ms, 16);
    }
}

#[cfg(test)]
mod layout {
    use crate::{Heading, LotLayout, Point, SpaceSide};

    #[test]
    fn reference_dimensions() {
        let l = LotLayout::default();
        assert_eq!(l.cluster_width(), 175.0);
        assert_eq!(l.cluster_height(), 125.0);
        assert_eq!(l.canvas_width(), 630.0);
        assert_eq!(l.canvas_height(), 570.0);
        assert_eq!(l.lot_bottom(), 510.0);
        assert_eq!(l.space_count(), 32);
    }

    #[test]
    fn road_centres() {
        let l = LotLayout::default();
        assert_eq!(l.horizontal_road_center(0), 60.0);
        assert_eq!(l.horizontal_road_center(1), 265.0);
        assert_eq!(l.horizontal_road_center(2), 470.0);
        assert_eq!(l.vertical_road_center(0), 60.0);
        assert_eq!(l.vertical_road_center(1), 315.0);
        assert_eq!(l.vertical_road_center(2), 570.0);
    }

    #[test]
    fn entrance_lines_up_with_middle_road() {
        let l = LotLayout::default();
        assert_eq!(l.entrance_left(), 265.0);
        assert_eq!(l.entrance_center_x(), l.vertical_road_center(1));
        assert_eq!(l.entrance_point(), Point::new(315.0, 540.0));
        assert!(l.in_entrance_gap(265.0));
        assert!(!l.in_entrance_gap(366.0));
    }

    #[test]
    fn spaces_and_sides() {
        let l = LotLayout::default();
        let r = l.space_rect(0, 0, 0, 0);
        assert_eq!((r.x, r.y, r.width, r.height), (100.0, 100.0, 40.0, 60.0));
        let r = l.space_rect(1, 1, 1, 3);
        assert_eq!((r.x, r.y), (355.0 + 135.0, 305.0 + 65.0));
        assert_eq!(l.space_side(0), SpaceSide::Top);
        assert_eq!(l.space_side(1), SpaceSide::Bottom);
        assert_eq!(l.adjacent_road(0, SpaceSide::Bottom), 1);
        assert_eq!(l.adjacent_road(1, SpaceSide::Top), 1);
        assert_eq!(SpaceSide::Bottom.parked_heading(), Heading::South);
    }

    #[test]
    fn derived_radii() {
        let l = LotLayout::default();
        assert_eq!(l.lane_offset(), 20.0);
        assert_eq!(l.intersection_radius(), 50.0);
    }

    #[test]
    fn validation() {
        assert!(LotLayout::default().validate().is_ok());
        let one_road = LotLayout { horizontal_roads: 1, ..LotLayout::default() };
        assert!(one_road.validate().is_err());
        let no_road = LotLayout { road_width: 0.0, ..LotLayout::default() };
        assert!(no_road.validate().is_err());
        let wide_gate = LotLayout { entrance_width: 1_000.0, ..LotLayout::default() };
        assert!(wide_gate.validate().is_err());
    }
}

#[cfg(test)]
mod rng {
    use crate::{BotId, BotRng, SimRng};

    fn coin_flips(rng: &mut BotRng) -> Vec<bool> {
        (0..64).map(|_| rng.gen_bool(0.5)).collect()
    }

    #[test]
    fn bot_rng_is_deterministic() {
        let mut a = BotRng::new(7, BotId(3));
        let mut b = BotRng::new(7, BotId(3));
        assert_eq!(coin_flips(&mut a), coin_flips(&mut b));
    }

    #[test]
    fn different_bots_differ() {
        let mut a = BotRng::new(7, BotId(0));
        let mut b = BotRng::new(7, BotId(1));
        assert_ne!(coin_flips(&mut a), coin_flips(&mut b));
    }

    #[test]
    fn gen_bool_clamps_probability() {
        let mut rng = BotRng::new(5, BotId(2));
        for _ in 0..50 {
            assert!(rng.gen_bool(1.5));
            assert!(!rng.gen_bool(-0.5));
        }
    }

    #[test]
    fn weighted_choice_skips_zero_weights() {
        let mut rng = BotRng::new(1, BotId(0));
        let items = [("never", 0), ("always", 5)];
        for _ in 0..50 {
            assert_eq!(rng.choose_weighted(&items), Some(&"always"));
        }
        let empty: [(u8, u32); 0] = [];
        assert_eq!(rng.choose_weighted(&empty), None);
    }

    #[test]
    fn sim_rng_unit_range() {
        let mut rng = SimRng::new(99);
        for _ in 0..100 {
            let u = rng.unit();
            assert!((0.0..1.0).contains(&u));
        }
        assert_eq!(rng.choose::<u8>(&[]), None);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_config {
    use crate::{LotLayout, SimConfig};

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let cfg: SimConfig =
            serde_json::from_str(r#"{ "seed": 42, "scheduler": { "spawn_interval_ms": 2500 } }"#).unwrap();
        assert_eq!(cfg.seed, 42);
        assert_eq!(cfg.scheduler.spawn_interval_ms, 2500);
        assert_eq!(cfg.scheduler.first_spawn_ms, 4000);
        assert_eq!(cfg.tick_duration_ms, 16);
    }

    #[test]
    fn layout_roundtrips() {
        let layout = LotLayout { spaces_per_row: 6, ..LotLayout::default() };
        let json = serde_json::to_string(&layout).unwrap();
        let back: LotLayout = serde_json::from_str(&json).unwrap();
        assert_eq!(back, layout);
    }
}
