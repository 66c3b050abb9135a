use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub fn dispatch(command: Commands, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Outcome { action } => commands::outcome::handle(&action, ctx, flags),
        Commands::Opportunity { action } => commands::opportunity::handle(&action, ctx, flags),
        Commands::Solution { action } => commands::solution::handle(&action, ctx, flags),
        Commands::Test { action } => commands::test_node::handle(&action, ctx, flags),
        Commands::Evidence { action } => commands::evidence::handle(&action, ctx, flags),
        Commands::Kpi { action } => commands::kpi::handle(&action, ctx, flags),
        Commands::Tree(args) => commands::tree::handle(&args, ctx, flags),
        Commands::Confidence(args) => commands::confidence::handle(&args, ctx, flags),
        Commands::Rebuild(args) => commands::rebuild::handle(&args, ctx, flags),
        Commands::Import(args) => commands::import::handle(&args, ctx, flags),
        Commands::Init(_) | Commands::Schema(_) => {
            anyhow::bail!("init and schema run before a project context is opened")
        }
    }
}
