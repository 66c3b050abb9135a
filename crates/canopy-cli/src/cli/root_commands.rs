use clap::{Args, Subcommand};

use crate::cli::subcommands::{
    EvidenceCommands, KpiCommands, OpportunityCommands, OutcomeCommands, SolutionCommands,
    TestCommands,
};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Initialize canopy for a project.
    Init(InitArgs),
    /// Outcomes (tree roots).
    Outcome {
        #[command(subcommand)]
        action: OutcomeCommands,
    },
    /// Opportunities.
    Opportunity {
        #[command(subcommand)]
        action: OpportunityCommands,
    },
    /// Solutions.
    Solution {
        #[command(subcommand)]
        action: SolutionCommands,
    },
    /// Tests, decisions, and todo progress.
    Test {
        #[command(subcommand)]
        action: TestCommands,
    },
    /// Evidence attached to tests.
    Evidence {
        #[command(subcommand)]
        action: EvidenceCommands,
    },
    /// KPIs attached to tests.
    Kpi {
        #[command(subcommand)]
        action: KpiCommands,
    },
    /// Show the nested tree, or one subtree.
    Tree(TreeArgs),
    /// Compute confidence for every container node.
    Confidence(ConfidenceArgs),
    /// Rebuild the tree from JSONL trail files.
    Rebuild(RebuildArgs),
    /// Load a nested forest JSON file into an empty tree.
    Import(ImportArgs),
    /// Dump JSON schema for a registered type.
    Schema(SchemaArgs),
}

/// Arguments for `cnp init`.
#[derive(Clone, Debug, Args)]
pub struct InitArgs {
    /// Directory to initialize (defaults to the current directory).
    pub path: Option<String>,
    /// Overwrite an existing config file.
    #[arg(long)]
    pub force: bool,
}

/// Arguments for `cnp tree`.
#[derive(Clone, Debug, Args)]
pub struct TreeArgs {
    /// Root of the subtree to show.
    pub id: Option<String>,
}

/// Arguments for `cnp confidence`.
#[derive(Clone, Debug, Args)]
pub struct ConfidenceArgs {
    /// Only report this node.
    #[arg(long)]
    pub node: Option<String>,
    /// Score as of this RFC 3339 instant.
    #[arg(long)]
    pub now: Option<String>,
}

/// Arguments for `cnp rebuild`.
#[derive(Clone, Debug, Args)]
pub struct RebuildArgs {
    /// Reject create bodies that fail schema validation.
    #[arg(long)]
    pub strict: bool,
    /// Count trail files and operations without replaying.
    #[arg(long)]
    pub dry_run: bool,
}

/// Arguments for `cnp import`.
#[derive(Clone, Debug, Args)]
pub struct ImportArgs {
    /// Path to a JSON array of nested outcomes.
    pub file: String,
}

/// Arguments for `cnp schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// Schema name; lists every name when omitted.
    pub type_name: Option<String>,
}
