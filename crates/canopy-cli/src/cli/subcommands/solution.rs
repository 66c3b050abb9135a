use clap::Subcommand;

use super::{NodeCreateArgs, NodeUpdateArgs};

/// Solution commands.
#[derive(Clone, Debug, Subcommand)]
pub enum SolutionCommands {
    /// Create a solution under an opportunity or solution.
    Create {
        #[arg(long)]
        parent: String,
        #[command(flatten)]
        node: NodeCreateArgs,
    },
    /// Get a solution by ID.
    Get { id: String },
    /// List solutions, optionally only the children of one parent.
    List {
        #[arg(long)]
        parent: Option<String>,
    },
    /// Update a solution.
    Update(NodeUpdateArgs),
    /// Delete a solution and everything under it.
    Delete { id: String },
    /// Move a solution under a new parent.
    Move {
        id: String,
        #[arg(long)]
        to: String,
    },
}
