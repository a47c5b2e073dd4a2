use thiserror::Error;

use pk_behavior::BehaviorError;
use pk_core::PkError;
use pk_lot::LotError;
use pk_mobility::MobilityError;
use pk_spatial::SpatialError;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("lot has {got} spaces but the layout describes {expected}")]
    SpaceCountMismatch {
        expected: usize,
        got:      usize,
    },

    #[error(transparent)]
    Core(#[from] PkError),

    #[error("road network: {0}")]
    Spatial(#[from] SpatialError),

    #[error("lot state: {0}")]
    Lot(#[from] LotError),

    #[error(transparent)]
    Behavior(#[from] BehaviorError),

    #[error(transparent)]
    Mobility(#[from] MobilityError),
}

pub type SimResult<T> = Result<T, SimError>;
