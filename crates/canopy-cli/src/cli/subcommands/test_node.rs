use clap::Subcommand;

use super::{NodeCreateArgs, NodeUpdateArgs};

/// Test commands.
#[derive(Clone, Debug, Subcommand)]
pub enum TestCommands {
    /// Create a test under a solution.
    Create {
        #[arg(long)]
        solution: String,
        #[command(flatten)]
        node: NodeCreateArgs,
    },
    /// Get a test by ID.
    Get { id: String },
    /// List tests, optionally only those of one solution.
    List {
        #[arg(long)]
        solution: Option<String>,
    },
    /// Update a test.
    Update {
        #[command(flatten)]
        node: NodeUpdateArgs,
        /// Free-form decision text.
        #[arg(long)]
        decision: Option<String>,
        #[arg(long, conflicts_with = "decision")]
        clear_decision: bool,
    },
    /// Log a decision: pass, iterate, or kill.
    Decide { id: String, decision: String },
    /// Record todo progress.
    Todo {
        id: String,
        #[arg(long)]
        done: u32,
        #[arg(long)]
        total: u32,
    },
    /// Delete a test with its evidence and KPIs.
    Delete { id: String },
    /// Move a test to another solution.
    Move {
        id: String,
        #[arg(long)]
        to: String,
    },
}
