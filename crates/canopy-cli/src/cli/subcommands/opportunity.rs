use clap::Subcommand;

use super::{NodeCreateArgs, NodeUpdateArgs};

/// Opportunity commands.
#[derive(Clone, Debug, Subcommand)]
pub enum OpportunityCommands {
    /// Create an opportunity under an outcome or opportunity.
    Create {
        #[arg(long)]
        parent: String,
        #[command(flatten)]
        node: NodeCreateArgs,
    },
    /// Get an opportunity by ID.
    Get { id: String },
    /// List opportunities, optionally only the children of one parent.
    List {
        #[arg(long)]
        parent: Option<String>,
    },
    /// Update an opportunity.
    Update(NodeUpdateArgs),
    /// Delete an opportunity and everything under it.
    Delete { id: String },
    /// Move an opportunity under a new parent.
    Move {
        id: String,
        #[arg(long)]
        to: String,
    },
}
