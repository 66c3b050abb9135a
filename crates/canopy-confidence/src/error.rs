//! Aggregation error types.

use thiserror::Error;

/// Structural problems found while walking a forest.
///
/// Both variants mean the tree is not a strict tree. A recompute that hits one
/// is aborted; partial results are never returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregateError {
    /// The same test ID was reached through more than one path.
    #[error("Test {id} is reachable through more than one path")]
    DuplicateTest { id: String },

    /// The same container key was scored twice.
    #[error("Node {key} appears more than once in the forest")]
    DuplicateNode { key: String },
}
