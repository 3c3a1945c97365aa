//! Domain error model.
//!
//! An entity id that does not resolve is not an error: services return
//! `Ok(None)` for it. Everything here is either a caller mistake or an
//! infrastructure fault.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

#[derive(Debug, Error)]
pub enum DomainError {
    /// Input rejected before any store round trip
    #[error("validation failed: {0}")]
    Validation(String),

    /// A named before/after neighbor is not a sibling of the item being moved
    #[error("neighbor {id} is not a sibling of the item being moved")]
    NeighborNotFound { id: i64 },

    /// The store did not hand back the row it was asked to insert
    #[error("creation failed: {0}")]
    CreationFailure(String),

    /// Any fault reported by the storage layer
    #[error("storage failure: {0:#}")]
    Storage(#[from] anyhow::Error),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Short machine-readable code, used in API error bodies
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_FAILURE",
            Self::NeighborNotFound { .. } => "NEIGHBOR_NOT_FOUND",
            Self::CreationFailure(_) => "CREATION_FAILURE",
            Self::Storage(_) => "STORAGE_FAILURE",
        }
    }
}
