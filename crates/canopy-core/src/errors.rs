//! Cross-cutting error types for Canopy.
//!
//! Errors that can originate from any crate live here. Domain-specific errors
//! (`DateError`, `AggregateError`, `StoreError`) are defined next to the code
//! that raises them and converge into `anyhow` at the CLI.

use thiserror::Error;

/// Errors that can be raised by any Canopy crate.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Entity lookup returned no result.
    #[error("Entity not found: {entity_type} {id}")]
    NotFound { entity_type: String, id: String },

    /// Data failed validation (format, constraints).
    #[error("Validation error: {0}")]
    Validation(String),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
