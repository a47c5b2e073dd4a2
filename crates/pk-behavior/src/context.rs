//! Read-only simulation state passed to every behavior callback.

use pk_core::{LotLayout, SpaceId, Tick};
use pk_lot::{ParkingLot, PlayerCar};
use pk_spatial::{RoadNetwork, Router};

/// A read-only snapshot of the simulation state passed to every
/// [`BehaviorModel`][crate::BehaviorModel] callback.
///
/// Built once per tick by pk-sim after the scheduler phase and shared
/// immutably by all bot updates.  Other bots are absent since bots
/// do not collide with each other.
///
/// # Lifetimes
///
/// All borrows live for the duration of one tick's behavior phase.  pk-sim
/// never mutates these structures while a `SimContext` is live.
pub struct SimContext<'a> {
    /// Current simulation tick.
    pub tick: Tick,

    pub layout: &'a LotLayout,

    /// Road graph, for route planning.
    pub network: &'a RoadNetwork,

    pub router: &'a dyn Router,

    /// Spaces, occupancy and claims.
    pub lot: &'a ParkingLot,

    /// The human-driven car, if one is in the lot.
    pub player: Option<PlayerCar>,

    /// The space the scheduler will vacate next.  A bot may keep driving to
    /// this space while it is still occupied.
    pub next_to_vacate: Option<SpaceId>,
}

impl<'a> SimContext<'a> {
    /// Context with no player and nothing scheduled to vacate.
    pub fn new(
        tick:    Tick,
        layout:  &'a LotLayout,
        network: &'a RoadNetwork,
        router:  &'a dyn Router,
        lot:     &'a ParkingLot,
    ) -> Self {
        Self { tick, layout, network, router, lot, player: None, next_to_vacate: None }
    }
}
