//! The `Sim` struct and its tick loop.

use log::{debug, warn};

use pk_agent::{Bot, BotState, BotStore, StateKind};
use pk_behavior::{BehaviorModel, Intent, SimContext};
use pk_core::{BotId, BotRng, Heading, LotLayout, Point, SimClock, SimConfig, SimRng, SpaceId, Tick};
use pk_lot::{Occupant, ParkingLot, PlayerCar};
use pk_mobility::{MobilityEngine, StepOutcome, player_park_target, player_step_allowed};
use pk_spatial::{RoadNetwork, Router};

use crate::{LotSnapshot, SimObserver, SimResult, TickSummary, VacancyScheduler};

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<B, R>` owns all lot state and drives the four-phase tick loop:
///
/// 1. **Scheduler**: pre-select, vacate (spawning an exiting bot) and spawn
///    incoming bots at the entrance.
/// 2. **Behavior phase** (optionally parallel with the `parallel` feature):
///    per bot, [`BehaviorModel::steer`], the [`MobilityEngine`] step with
///    [`BehaviorModel::on_blocked`] on failure, then
///    [`BehaviorModel::settle`].  Only the bot and its RNG are written.
/// 3. **Apply phase** (sequential, ascending `BotId`): claims, releases,
///    parking and departures.
/// 4. **Observer**: tick summary, periodic snapshot.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<B: BehaviorModel, R: Router> {
    pub config: SimConfig,

    /// Simulation clock; tracks the current tick.
    pub clock: SimClock,

    pub layout: LotLayout,

    /// Road graph bots plan their routes on.
    pub network: RoadNetwork,

    pub router: R,

    /// Spaces, occupancy and claims.
    pub lot: ParkingLot,

    /// Live bots with their split-out RNGs.
    pub bots: BotStore,

    /// RNG for scheduler decisions.
    pub rng: SimRng,

    pub scheduler: VacancyScheduler,

    pub behavior: B,

    pub mobility: MobilityEngine,

    /// The human-driven car, written by its external controller.
    pub player: Option<PlayerCar>,
}

impl<B: BehaviorModel, R: Router> Sim<B, R> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run the simulation from the current tick to `config.end_tick()`.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        while self.clock.current_tick < self.config.end_tick() {
            self.step_observed(observer)?;
        }
        observer.on_sim_end(self.clock.current_tick);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores `end_tick`).
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            self.step_observed(observer)?;
        }
        Ok(())
    }

    /// Number of unoccupied spaces.
    pub fn free_spaces(&self) -> usize {
        self.lot.free_count()
    }

    /// Read-only view of bots, spaces and the player for a renderer.
    pub fn snapshot(&self) -> LotSnapshot {
        LotSnapshot::capture(self.clock.current_tick, &self.bots, &self.lot, self.player)
    }

    /// Replace the player's pose.  `None` takes the player out of the lot.
    pub fn set_player(&mut self, player: Option<PlayerCar>) {
        self.player = player;
    }

    /// `true` if the player may move to `pos` facing `heading`: on the road,
    /// inside the lot, clear of walls, spaces and every moving bot.
    pub fn player_step_allowed(&self, pos: Point, heading: Heading) -> bool {
        let bots = self.bots.moving().map(|b| self.layout.car_box(b.pos, b.heading));
        player_step_allowed(&self.layout, &self.lot, pos, heading, bots)
    }

    /// Park the player in the free space it is lined up with, if any.
    ///
    /// The space is marked occupied by the player and the car is snapped into
    /// it.  A bot that was heading for the space gives it up on its next
    /// update.
    pub fn park_player(&mut self) -> SimResult<Option<SpaceId>> {
        let Some(mut player) = self.player else { return Ok(None) };
        let Some(space) = player_park_target(&self.layout, &self.lot, &player) else {
            return Ok(None);
        };
        self.lot.occupy(space, Occupant::Player)?;
        let s = self.lot.space(space)?;
        player.pos = s.center();
        player.heading = s.parked_heading();
        player.parked = true;
        self.player = Some(player);
        debug!("{}: player parked in {space}", self.clock.current_tick);
        Ok(Some(space))
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn step_observed<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        let now = self.clock.current_tick;
        observer.on_tick_start(now);
        let summary = self.process_tick(now)?;
        observer.on_tick_end(&summary);
        if self.config.output_interval_ticks > 0 && now.0 % self.config.output_interval_ticks == 0 {
            observer.on_snapshot(now, &self.bots, &self.lot);
        }
        self.clock.advance();
        Ok(())
    }

    fn process_tick(&mut self, now: Tick) -> SimResult<TickSummary> {
        // ── Phase 1: scheduler ────────────────────────────────────────────
        let events = self.scheduler.tick(
            now,
            &self.layout,
            &mut self.lot,
            &mut self.bots,
            &mut self.rng,
            self.config.bot_speed,
        )?;

        // ── Phase 2: behavior (produce) ───────────────────────────────────
        let intents = self.behavior_phase(now);

        // ── Phase 3: apply (consume) ──────────────────────────────────────
        //
        // Results come back in ascending BotId order, so the first bot to
        // claim a space wins even when phase 2 ran in parallel.
        let mut summary = TickSummary {
            tick: now,
            elapsed_ms: self.clock.ms_at(now),
            spawned: events.spawned.len(),
            vacated: usize::from(events.vacated.is_some()),
            ..TickSummary::default()
        };
        for (bot, bot_intents) in intents {
            self.apply_intents(bot, bot_intents, now, &mut summary);
        }

        summary.parked_bots = self.bots.count(StateKind::Parked);
        summary.active_bots = self.bots.len() - summary.parked_bots;
        summary.free_spaces = self.lot.free_count();
        Ok(summary)
    }

    /// Update every bot against a shared read-only context.
    ///
    /// With the `parallel` Cargo feature the bots are processed on Rayon's
    /// thread pool; each task touches only its own bot and RNG.
    fn behavior_phase(&mut self, now: Tick) -> Vec<(BotId, Vec<Intent>)> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let behavior = &self.behavior;
        let mobility = &self.mobility;
        let mut ctx = SimContext::new(now, &self.layout, &self.network, &self.router, &self.lot);
        ctx.player = self.player;
        ctx.next_to_vacate = self.scheduler.next_to_vacate();
        let (bots, rngs) = self.bots.split_mut();

        #[cfg(not(feature = "parallel"))]
        {
            bots.iter_mut()
                .zip(rngs.iter_mut())
                .map(|(bot, rng)| (bot.id, update_bot(behavior, mobility, bot, &ctx, rng)))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            bots.par_iter_mut()
                .zip(rngs.par_iter_mut())
                .map(|(bot, rng)| (bot.id, update_bot(behavior, mobility, bot, &ctx, rng)))
                .collect()
        }
    }

    /// Apply one bot's intents during the sequential write phase.
    fn apply_intents(&mut self, id: BotId, intents: Vec<Intent>, now: Tick, summary: &mut TickSummary) {
        for intent in intents {
            match intent {
                // ── Claim: first come, first served ───────────────────────
                Intent::Claim(space) => {
                    if let Err(e) = self.lot.claim(space, id) {
                        debug!("{now}: bot {id} lost the race for {space}: {e}");
                        if let Some(bot) = self.bots.get_mut(id) {
                            if bot.target() == Some(space) {
                                bot.state = BotState::Searching;
                            }
                        }
                    }
                }

                Intent::Release(space) => {
                    self.lot.release_claim(space, id);
                }

                // ── Park: occupy and drop the claim ───────────────────────
                Intent::Park(space) => match self.lot.occupy(space, Occupant::Bot(id)) {
                    Ok(()) => {
                        self.lot.release_claim(space, id);
                        summary.parked += 1;
                    }
                    Err(e) => {
                        // Only the claimant parks and claims are unique, so
                        // this means the lot was changed behind the loop.
                        warn!("{now}: bot {id} could not park: {e}");
                        self.lot.release_claim(space, id);
                        if let Some(bot) = self.bots.get_mut(id) {
                            bot.state = BotState::Searching;
                        }
                    }
                },

                // ── Depart: drop the bot and anything it held ─────────────
                Intent::Depart => {
                    self.lot.release_bot(id);
                    if self.bots.remove(id).is_some() {
                        summary.departed += 1;
                    }
                }
            }
        }
    }
}

/// One bot's share of the behavior phase.
fn update_bot<B: BehaviorModel>(
    behavior: &B,
    mobility: &MobilityEngine,
    bot:      &mut Bot,
    ctx:      &SimContext<'_>,
    rng:      &mut BotRng,
) -> Vec<Intent> {
    let mut intents = behavior.steer(bot, ctx, rng);
    if intents.contains(&Intent::Depart) {
        return intents;
    }
    if let StepOutcome::Blocked(block) = mobility.step(bot, ctx) {
        behavior.on_blocked(bot, block, ctx, rng);
    }
    intents.extend(behavior.settle(bot, ctx));
    intents
}

/// `true` if no two bots target the same free space.
///
/// Holds after every apply phase; exposed for tests and debug assertions in
/// embedding applications.
pub fn targets_unique(bots: &BotStore, lot: &ParkingLot) -> bool {
    let mut seen: Vec<SpaceId> = bots
        .iter()
        .filter_map(Bot::target)
        .filter(|&s| !lot.is_occupied(s))
        .collect();
    let n = seen.len();
    seen.sort_unstable();
    seen.dedup();
    seen.len() == n
}
