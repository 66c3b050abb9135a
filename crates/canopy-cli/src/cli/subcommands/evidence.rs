use clap::Subcommand;

/// Evidence commands.
#[derive(Clone, Debug, Subcommand)]
pub enum EvidenceCommands {
    /// Attach evidence to a test.
    Add {
        #[arg(long)]
        test: String,
        /// high, medium, or low
        #[arg(long)]
        quality: String,
        #[arg(long)]
        note: Option<String>,
    },
    /// List a test's evidence.
    List {
        #[arg(long)]
        test: String,
    },
    /// Update evidence.
    Update {
        id: String,
        #[arg(long)]
        quality: Option<String>,
        #[arg(long)]
        note: Option<String>,
        #[arg(long, conflicts_with = "note")]
        clear_note: bool,
    },
    /// Delete evidence.
    Delete { id: String },
}
