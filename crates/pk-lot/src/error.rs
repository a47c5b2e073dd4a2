//! Lot error type.

use thiserror::Error;

use pk_core::{BotId, SpaceId};

use crate::Occupant;

/// Rejected occupancy or claim transitions.
///
/// The tick loop only issues valid transitions; these guard the public API.
#[derive(Debug, Error, PartialEq)]
pub enum LotError {
    #[error("parking space {0} not found")]
    SpaceNotFound(SpaceId),

    #[error("parking space {space} is already occupied by {by:?}")]
    AlreadyOccupied { space: SpaceId, by: Occupant },

    #[error("parking space {0} is already free")]
    AlreadyFree(SpaceId),

    #[error("parking space {space} is already claimed by {by}")]
    AlreadyClaimed { space: SpaceId, by: BotId },
}

pub type LotResult<T> = Result<T, LotError>;
