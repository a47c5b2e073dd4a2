//! Fluent builder for constructing a [`Sim`].

use log::debug;

use pk_agent::{BotState, BotStore};
use pk_behavior::BehaviorModel;
use pk_core::{Heading, LotLayout, Point, SimConfig, SimRng};
use pk_lot::{Occupant, ParkingLot, PlayerCar};
use pk_mobility::MobilityEngine;
use pk_spatial::{Router, build_lot_network};

use crate::{Sim, SimError, SimResult, VacancyScheduler};

/// Fluent builder for [`Sim<B, R>`].
///
/// # Required inputs
///
/// - [`SimConfig`]: ticks, seed, speed, scheduler and behavior tunables
/// - `B: BehaviorModel`: usually `pk_behavior::LotBehavior`
/// - `R: Router`: usually [`pk_spatial::AStarRouter`]
///
/// # Optional inputs (have defaults)
///
/// | Method          | Default                                      |
/// |-----------------|----------------------------------------------|
/// | `.layout(l)`    | `LotLayout::default()`                       |
/// | `.lot(l)`       | every space holding a pre-parked car         |
/// | `.bot(..)`      | no bots                                      |
/// | `.player(p)`    | no player car                                |
///
/// # Example
///
/// ```rust,ignore
/// let behavior = LotBehavior::new(&config.behavior, &config.make_clock())?;
/// let mut sim = SimBuilder::new(config, behavior, AStarRouter).build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<B: BehaviorModel, R: Router> {
    config:   SimConfig,
    layout:   LotLayout,
    lot:      Option<ParkingLot>,
    bots:     Vec<(Point, Heading, BotState)>,
    player:   Option<PlayerCar>,
    behavior: B,
    router:   R,
}

impl<B: BehaviorModel, R: Router> SimBuilder<B, R> {
    pub fn new(config: SimConfig, behavior: B, router: R) -> Self {
        Self {
            config,
            layout: LotLayout::default(),
            lot: None,
            bots: Vec::new(),
            player: None,
            behavior,
            router,
        }
    }

    pub fn layout(mut self, layout: LotLayout) -> Self {
        self.layout = layout;
        self
    }

    /// Start from this lot instead of a full one.  It must have been built
    /// from the same layout.
    pub fn lot(mut self, lot: ParkingLot) -> Self {
        self.lot = Some(lot);
        self
    }

    /// Add a bot present at tick 0.
    ///
    /// A `Parked` bot occupies its space and a `Parking` bot claims its
    /// target, as if it had got there during the run.
    pub fn bot(mut self, pos: Point, heading: Heading, state: BotState) -> Self {
        self.bots.push((pos, heading, state));
        self
    }

    pub fn player(mut self, player: PlayerCar) -> Self {
        self.player = Some(player);
        self
    }

    /// Validate inputs, build the road network and return a ready-to-run
    /// [`Sim`].
    pub fn build(self) -> SimResult<Sim<B, R>> {
        self.config.validate()?;
        self.layout.validate()?;
        let clock = self.config.make_clock();

        let mut lot = match self.lot {
            Some(lot) => {
                if lot.len() != self.layout.space_count() {
                    return Err(SimError::SpaceCountMismatch {
                        expected: self.layout.space_count(),
                        got:      lot.len(),
                    });
                }
                lot
            }
            None => ParkingLot::full(&self.layout),
        };

        // ── Initial bots ──────────────────────────────────────────────────
        let mut bots = BotStore::new(self.config.seed);
        for (pos, heading, state) in self.bots {
            let id = bots.next_id();
            match state {
                BotState::Parked { space } => lot.occupy(space, Occupant::Bot(id))?,
                BotState::Parking { target, .. } => lot.claim(target, id)?,
                _ => {}
            }
            bots.spawn(pos, heading, self.config.bot_speed, state);
        }

        if let Some(p) = self.player {
            if p.parked {
                return Err(SimError::Config("the player must start unparked".into()));
            }
        }

        let network = build_lot_network(&self.layout)?;
        let mobility = MobilityEngine::new(&self.config.behavior, &clock)?;
        let scheduler = VacancyScheduler::new(&self.config.scheduler, &clock);

        #[cfg(feature = "parallel")]
        if let Some(n) = self.config.num_threads {
            // The global pool can only be set up once per process.
            if let Err(e) = rayon::ThreadPoolBuilder::new().num_threads(n).build_global() {
                debug!("keeping existing thread pool: {e}");
            }
        }

        debug!(
            "built lot: {} spaces ({} free), {} bots, network of {} nodes",
            lot.len(),
            lot.free_count(),
            bots.len(),
            network.node_count()
        );

        let rng = SimRng::new(self.config.seed);

        Ok(Sim {
            clock,
            config: self.config,
            layout: self.layout,
            network,
            router: self.router,
            lot,
            bots,
            rng,
            scheduler,
            behavior: self.behavior,
            mobility,
            player: self.player,
        })
    }
}
