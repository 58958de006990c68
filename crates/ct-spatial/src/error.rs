//! Spatial-subsystem error type.

use thiserror::Error;

use ct_core::NodeId;

/// Errors produced by `ct-spatial`.
///
/// `NoRoute` is an expected outcome for disconnected nodes, not a fault;
/// callers are expected to match on it separately from the other variants.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("road network has no nodes")]
    GraphEmpty,

    #[error("nearest-node resolution failed: {0}")]
    Resolution(String),

    #[error("node {0} not found in network")]
    InvalidNode(NodeId),

    #[error("no route from {from} to {to}")]
    NoRoute { from: NodeId, to: NodeId },

    #[cfg(feature = "csv")]
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[cfg(feature = "csv")]
    #[error("network parse error: {0}")]
    Parse(String),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
