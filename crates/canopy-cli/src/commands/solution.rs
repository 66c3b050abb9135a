use canopy_core::entities::Solution;
use canopy_core::enums::NodeKind;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::SolutionCommands;
use crate::commands::shared::dates::parse_date_range;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::node::node_update;
use crate::context::AppContext;
use crate::output::output;

/// Handle `cnp solution`.
pub fn handle(
    action: &SolutionCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        SolutionCommands::Create { parent, node } => {
            let dates = parse_date_range(node.start.as_deref(), node.end.as_deref())?;
            let solution = ctx.service.create_solution(
                parent,
                &node.title,
                node.description.as_deref(),
                dates,
            )?;
            output(&solution, flags.format)
        }
        SolutionCommands::Get { id } => output(&ctx.service.get_solution(id)?, flags.format),
        SolutionCommands::List { parent } => {
            let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
            let mut solutions: Vec<Solution> = match parent {
                Some(parent) => ctx.service.list_solutions(parent)?,
                None => ctx
                    .service
                    .list_nodes(NodeKind::Solution, limit)?
                    .into_iter()
                    .map(canopy_store::NodeData::into_solution)
                    .collect::<Result<_, _>>()?,
            };
            solutions.truncate(limit);
            output(&solutions, flags.format)
        }
        SolutionCommands::Update(args) => {
            let update = node_update(args)?;
            output(&ctx.service.update_solution(&args.id, &update)?, flags.format)
        }
        SolutionCommands::Delete { id } => {
            output(&ctx.service.delete_solution(id)?, flags.format)
        }
        SolutionCommands::Move { id, to } => {
            output(&ctx.service.move_solution(id, to)?, flags.format)
        }
    }
}
