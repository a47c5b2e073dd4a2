//! Spatial-subsystem error type.

use thiserror::Error;

use pk_core::{NodeId, PkError};

/// Errors produced by `pk-spatial`.
///
/// `NoRoute` is recoverable: callers fall back to steering straight at the
/// goal.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error(transparent)]
    Layout(#[from] PkError),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
