use clap::Subcommand;

use super::{NodeCreateArgs, NodeUpdateArgs};

/// Outcome commands.
#[derive(Clone, Debug, Subcommand)]
pub enum OutcomeCommands {
    /// Create an outcome.
    Create(NodeCreateArgs),
    /// Get an outcome by ID.
    Get { id: String },
    /// List outcomes.
    List,
    /// Update an outcome.
    Update(NodeUpdateArgs),
    /// Delete an outcome and everything under it.
    Delete { id: String },
}
