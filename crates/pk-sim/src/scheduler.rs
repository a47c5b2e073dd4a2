//! Vacancy scheduler and entrance spawner.
//!
//! # Timeline
//!
//! ```text
//! first_preselect_ms          pick the first space to vacate
//! first_spawn_ms    + k·Δs    incoming bot below the entrance, heading north
//! first_vacancy_ms  + k·Δv    free one space, spawn an exiting bot beside it,
//!                             pick the next space to vacate
//! ```
//!
//! The pre-selected space is handed to incoming bots as their target before
//! it is free, so a bot entering ahead of a vacancy already knows where to
//! go.  Claims keep the handout unique: a space that some bot already claimed
//! is never pre-selected, and an incoming bot only takes the pre-selected
//! space if nobody claimed it yet.
//!
//! All timing is held in ticks, converted once from the configured
//! milliseconds.

use log::{debug, info, warn};

use pk_agent::{BotState, BotStore};
use pk_core::{BotId, Heading, LotLayout, Point, SchedulerConfig, SimClock, SimRng, SpaceId, Tick};
use pk_lot::{Occupant, ParkingLot};
use pk_spatial::{on_road, within_boundary};

use crate::SimResult;

/// Offsets tried around a road centre point when it is not drivable.
const SPAWN_NUDGES: [(f32, f32); 9] = [
    (0.0, 0.0),
    (10.0, 0.0),
    (-10.0, 0.0),
    (0.0, 10.0),
    (0.0, -10.0),
    (20.0, 0.0),
    (-20.0, 0.0),
    (0.0, 20.0),
    (0.0, -20.0),
];

/// What the scheduler did this tick.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScheduleEvents {
    pub spawned: Vec<BotId>,
    pub vacated: Option<SpaceId>,
    /// A parked bot whose space was vacated and that was replaced by its
    /// exiting twin.
    pub removed: Option<BotId>,
}

/// Interval-driven vacancy and spawn bookkeeping.
#[derive(Debug, Clone)]
pub struct VacancyScheduler {
    preselect_at:      Tick,
    spawning:          bool,
    next_spawn:        Tick,
    spawn_interval:    u64,
    next_vacancy:      Tick,
    vacancy_interval:  u64,
    spawn_clearance:   f32,
    preselected:       bool,
    next_to_vacate:    Option<SpaceId>,
}

impl VacancyScheduler {
    pub fn new(config: &SchedulerConfig, clock: &SimClock) -> Self {
        Self {
            preselect_at:     Tick(clock.ticks_for_ms(config.first_preselect_ms)),
            spawning:         config.entrance_spawning,
            next_spawn:       Tick(clock.ticks_for_ms(config.first_spawn_ms)),
            spawn_interval:   clock.ticks_for_ms(config.spawn_interval_ms).max(1),
            next_vacancy:     Tick(clock.ticks_for_ms(config.first_vacancy_ms)),
            vacancy_interval: clock.ticks_for_ms(config.vacancy_interval_ms).max(1),
            spawn_clearance:  config.spawn_clearance,
            preselected:      false,
            next_to_vacate:   None,
        }
    }

    /// The space that will be vacated next, once chosen.
    pub fn next_to_vacate(&self) -> Option<SpaceId> {
        self.next_to_vacate
    }

    pub fn next_vacancy_tick(&self) -> Tick {
        self.next_vacancy
    }

    pub fn next_spawn_tick(&self) -> Option<Tick> {
        self.spawning.then_some(self.next_spawn)
    }

    /// Run everything due at `now`: pre-selection, vacancy, entrance spawn.
    pub fn tick(
        &mut self,
        now:    Tick,
        layout: &LotLayout,
        lot:    &mut ParkingLot,
        bots:   &mut BotStore,
        rng:    &mut SimRng,
        speed:  f32,
    ) -> SimResult<ScheduleEvents> {
        let mut events = ScheduleEvents::default();

        if !self.preselected && now >= self.preselect_at {
            self.preselected = true;
            self.next_to_vacate = preselect(lot, rng);
            debug!("{now}: first space to vacate is {:?}", self.next_to_vacate);
        }

        if now >= self.next_vacancy {
            self.next_vacancy = now + self.vacancy_interval;
            self.vacate(now, layout, lot, bots, rng, speed, &mut events)?;
        }

        if self.spawning && now >= self.next_spawn {
            self.next_spawn = now + self.spawn_interval;
            if let Some(id) = self.spawn_at_entrance(now, layout, lot, bots, rng, speed)? {
                events.spawned.push(id);
            }
        }
        Ok(events)
    }

    // ── Vacancy ───────────────────────────────────────────────────────────

    #[allow(clippy::too_many_arguments)]
    fn vacate(
        &mut self,
        now:    Tick,
        layout: &LotLayout,
        lot:    &mut ParkingLot,
        bots:   &mut BotStore,
        rng:    &mut SimRng,
        speed:  f32,
        events: &mut ScheduleEvents,
    ) -> SimResult<()> {
        let candidates = lot.vacatable();
        let chosen = match self.next_to_vacate {
            Some(s) if candidates.contains(&s) => Some(s),
            _ => rng.choose(&candidates).copied(),
        };
        let Some(space) = chosen else {
            debug!("{now}: nothing to vacate");
            return Ok(());
        };

        let center = lot.space(space)?.center();
        let Some((pos, heading)) = exit_spawn_pose(layout, center) else {
            warn!("{now}: {space} stays occupied, no road to pull out onto");
            return Ok(());
        };

        match lot.vacate(space)? {
            Occupant::Bot(id) => {
                bots.remove(id);
                lot.release_bot(id);
                events.removed = Some(id);
            }
            Occupant::Static | Occupant::Player => {}
        }
        events.vacated = Some(space);

        let id = bots.spawn(pos, heading, speed, BotState::exiting(Some(space), now));
        info!("{now}: {space} vacated, bot {id} pulls out at {pos} heading {heading}");
        events.spawned.push(id);

        self.next_to_vacate = preselect(lot, rng);
        debug!("{now}: next space to vacate is {:?}", self.next_to_vacate);
        Ok(())
    }

    // ── Entrance spawn ────────────────────────────────────────────────────

    fn spawn_at_entrance(
        &self,
        now:    Tick,
        layout: &LotLayout,
        lot:    &mut ParkingLot,
        bots:   &mut BotStore,
        rng:    &mut SimRng,
        speed:  f32,
    ) -> SimResult<Option<BotId>> {
        let pos = entrance_spawn_point(layout, rng);
        if bots.iter().any(|b| b.pos.distance(pos) < self.spawn_clearance) {
            debug!("{now}: entrance spawn at {pos} skipped, too close to another bot");
            return Ok(None);
        }

        let target = self.next_to_vacate.filter(|&s| !lot.claims().is_claimed(s));
        let state = match target {
            Some(space) => {
                lot.claim(space, bots.next_id())?;
                BotState::parking(space)
            }
            None => BotState::Searching,
        };
        let id = bots.spawn(pos, Heading::North, speed, state);
        info!("{now}: bot {id} enters at {pos}, target {target:?}");
        Ok(Some(id))
    }
}

/// Random vacatable space that no bot has claimed.
fn preselect(lot: &ParkingLot, rng: &mut SimRng) -> Option<SpaceId> {
    let open: Vec<SpaceId> = lot
        .vacatable()
        .into_iter()
        .filter(|&s| !lot.claims().is_claimed(s))
        .collect();
    rng.choose(&open).copied()
}

/// Where a bot pulling out of the space centred on `center` appears.
///
/// The candidates are every horizontal road centre line at the space's x
/// (heading east) and every vertical one at its y (heading south); the
/// closest wins, earlier candidates on ties.  If that point is not drivable,
/// small offsets around it are tried, and failing those the bot starts on
/// the centre line itself.  `None` only for a layout without roads.
pub fn exit_spawn_pose(layout: &LotLayout, center: Point) -> Option<(Point, Heading)> {
    let horizontal = (0..layout.horizontal_roads)
        .map(|i| (Point::new(center.x, layout.horizontal_road_center(i)), Heading::East));
    let vertical = (0..layout.vertical_roads)
        .map(|j| (Point::new(layout.vertical_road_center(j), center.y), Heading::South));

    let mut best: Option<(Point, Heading)> = None;
    for (p, h) in horizontal.chain(vertical) {
        if best.is_none_or(|(b, _)| center.distance(p) < center.distance(b)) {
            best = Some((p, h));
        }
    }
    let (base, heading) = best?;
    let pos = SPAWN_NUDGES
        .iter()
        .map(|&(dx, dy)| Point::new(base.x + dx, base.y + dy))
        .find(|&p| on_road(layout, p) && within_boundary(layout, p))
        .unwrap_or(base);
    Some((pos, heading))
}

/// A point just below the canvas, inside the entrance, jittered sideways.
pub fn entrance_spawn_point(layout: &LotLayout, rng: &mut SimRng) -> Point {
    let spread = (layout.entrance_width - 20.0).max(0.0);
    Point::new(
        layout.entrance_center_x() + (rng.unit() - 0.5) * spread,
        layout.canvas_height() + 20.0,
    )
}
