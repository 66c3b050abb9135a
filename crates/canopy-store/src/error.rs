//! Store error types for canopy-store.

use thiserror::Error;

use canopy_confidence::AggregateError;
use canopy_core::dates::DateError;
use canopy_core::enums::NodeKind;
use canopy_core::errors::CoreError;

/// Errors from store mutations, trail persistence, and replay.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A date range was rejected. The tree is unchanged.
    #[error(transparent)]
    Date(#[from] DateError),

    #[error("Node not found: {id}")]
    NotFound { id: String },

    #[error("{id} is a {actual}, expected {expected}")]
    WrongKind {
        id: String,
        expected: NodeKind,
        actual: NodeKind,
    },

    /// The parent/child kind pairing is not allowed.
    #[error("{child} cannot be placed under {parent}")]
    InvalidParent { child: NodeKind, parent: String },

    /// The mutation would make a node its own ancestor.
    #[error("moving {id} under {target} would create a cycle")]
    Cycle { id: String, target: String },

    #[error("Duplicate node id: {id}")]
    DuplicateId { id: String },

    /// Input that is well-formed but not acceptable (e.g. todo done > total).
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error(transparent)]
    Aggregate(#[from] AggregateError),

    /// Trail file I/O or parse failure.
    #[error("Trail error: {0}")]
    Trail(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl StoreError {
    /// Whether this error means the tree itself is malformed, as opposed to a
    /// rejected edit the caller can correct.
    #[must_use]
    pub const fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::Cycle { .. } | Self::DuplicateId { .. } | Self::InvalidParent { .. } | Self::Aggregate(_)
        )
    }

    pub(crate) fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound { id: id.into() }
    }
}
