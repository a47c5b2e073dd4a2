//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `PkError` as one variant
//! via `#[from]` where a core failure can surface through them.

use thiserror::Error;

use crate::{BotId, NodeId, SpaceId};

/// The top-level error type for `pk-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum PkError {
    #[error("bot {0} not found")]
    BotNotFound(BotId),

    #[error("node {0} not found")]
    NodeNotFound(NodeId),

    #[error("parking space {0} not found")]
    SpaceNotFound(SpaceId),

    #[error("configuration error: {0}")]
    Config(String),
}

/// Shorthand result type for all `pk-*` crates.
pub type PkResult<T> = Result<T, PkError>;
