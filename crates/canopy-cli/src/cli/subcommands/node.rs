use clap::Args;

/// Fields shared by every titled node on create.
#[derive(Clone, Debug, Args)]
pub struct NodeCreateArgs {
    #[arg(long)]
    pub title: String,
    #[arg(long)]
    pub description: Option<String>,
    /// Start date (YYYY-MM-DD). Must be given together with --end.
    #[arg(long)]
    pub start: Option<String>,
    /// End date (YYYY-MM-DD). Must be given together with --start.
    #[arg(long)]
    pub end: Option<String>,
}

/// Fields shared by every titled node on update. Omitted flags are untouched.
#[derive(Clone, Debug, Args)]
pub struct NodeUpdateArgs {
    pub id: String,
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub description: Option<String>,
    #[arg(long, conflicts_with = "description")]
    pub clear_description: bool,
    #[arg(long)]
    pub start: Option<String>,
    #[arg(long)]
    pub end: Option<String>,
    /// Remove the node's date range.
    #[arg(long, conflicts_with_all = ["start", "end"])]
    pub clear_dates: bool,
}
