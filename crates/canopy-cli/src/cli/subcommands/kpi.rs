use clap::Subcommand;

/// KPI commands.
#[derive(Clone, Debug, Subcommand)]
pub enum KpiCommands {
    /// Attach a KPI to a test.
    Add {
        #[arg(long)]
        test: String,
        #[arg(long)]
        name: String,
        #[arg(long)]
        current: Option<f64>,
        #[arg(long)]
        target: Option<f64>,
        #[arg(long)]
        unit: Option<String>,
    },
    /// List a test's KPIs.
    List {
        #[arg(long)]
        test: String,
    },
    /// Update a KPI.
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        current: Option<f64>,
        #[arg(long)]
        target: Option<f64>,
        #[arg(long)]
        unit: Option<String>,
    },
    /// Delete a KPI.
    Delete { id: String },
}
