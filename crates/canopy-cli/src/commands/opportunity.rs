use canopy_core::entities::Opportunity;
use canopy_core::enums::NodeKind;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::OpportunityCommands;
use crate::commands::shared::dates::parse_date_range;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::node::node_update;
use crate::context::AppContext;
use crate::output::output;

/// Handle `cnp opportunity`.
pub fn handle(
    action: &OpportunityCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        OpportunityCommands::Create { parent, node } => {
            let dates = parse_date_range(node.start.as_deref(), node.end.as_deref())?;
            let opportunity = ctx.service.create_opportunity(
                parent,
                &node.title,
                node.description.as_deref(),
                dates,
            )?;
            output(&opportunity, flags.format)
        }
        OpportunityCommands::Get { id } => output(&ctx.service.get_opportunity(id)?, flags.format),
        OpportunityCommands::List { parent } => {
            let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
            let mut opportunities: Vec<Opportunity> = match parent {
                Some(parent) => ctx.service.list_opportunities(parent)?,
                None => ctx
                    .service
                    .list_nodes(NodeKind::Opportunity, limit)?
                    .into_iter()
                    .map(canopy_store::NodeData::into_opportunity)
                    .collect::<Result<_, _>>()?,
            };
            opportunities.truncate(limit);
            output(&opportunities, flags.format)
        }
        OpportunityCommands::Update(args) => {
            let update = node_update(args)?;
            output(&ctx.service.update_opportunity(&args.id, &update)?, flags.format)
        }
        OpportunityCommands::Delete { id } => {
            output(&ctx.service.delete_opportunity(id)?, flags.format)
        }
        OpportunityCommands::Move { id, to } => {
            output(&ctx.service.move_opportunity(id, to)?, flags.format)
        }
    }
}
