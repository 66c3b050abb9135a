use crate::cli::GlobalFlags;
use crate::cli::subcommands::OutcomeCommands;
use crate::commands::shared::dates::parse_date_range;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::node::node_update;
use crate::context::AppContext;
use crate::output::output;

/// Handle `cnp outcome`.
pub fn handle(action: &OutcomeCommands, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        OutcomeCommands::Create(node) => {
            let dates = parse_date_range(node.start.as_deref(), node.end.as_deref())?;
            let outcome =
                ctx.service
                    .create_outcome(&node.title, node.description.as_deref(), dates)?;
            output(&outcome, flags.format)
        }
        OutcomeCommands::Get { id } => output(&ctx.service.get_outcome(id)?, flags.format),
        OutcomeCommands::List => {
            let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
            let mut outcomes = ctx.service.list_outcomes();
            outcomes.truncate(limit);
            output(&outcomes, flags.format)
        }
        OutcomeCommands::Update(args) => {
            let update = node_update(args)?;
            output(&ctx.service.update_outcome(&args.id, &update)?, flags.format)
        }
        OutcomeCommands::Delete { id } => output(&ctx.service.delete_outcome(id)?, flags.format),
    }
}
