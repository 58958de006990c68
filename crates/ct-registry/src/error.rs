use thiserror::Error;

use ct_spatial::SpatialError;

/// Errors produced by `ct-registry`.
///
/// Spatial failures (`GraphEmpty`, `Resolution`, `InvalidNode`, `NoRoute`)
/// are passed through unchanged so callers can still tell them apart.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("camera name is empty")]
    EmptyName,

    #[error("a camera named {0:?} is already registered")]
    DuplicateName(String),

    #[error("no camera named {0:?}")]
    UnknownCamera(String),

    #[error("start and end camera are both {0:?}")]
    SameEndpoints(String),

    #[error(transparent)]
    Spatial(#[from] SpatialError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("camera file error: {0}")]
    Json(#[from] serde_json::Error),
}

impl RegistryError {
    /// `true` for the expected "cameras are in disconnected parts of the
    /// network" outcome.
    pub fn is_no_route(&self) -> bool {
        matches!(self, RegistryError::Spatial(SpatialError::NoRoute { .. }))
    }
}

pub type RegistryResult<T> = Result<T, RegistryError>;
