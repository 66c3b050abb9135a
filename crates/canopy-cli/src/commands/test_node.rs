use canopy_core::entities::Test;
use canopy_core::enums::{Decision, NodeKind};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::TestCommands;
use crate::commands::shared::dates::parse_date_range;
use crate::commands::shared::limit::effective_limit;
use crate::commands::shared::node::test_update;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `cnp test`.
pub fn handle(action: &TestCommands, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        TestCommands::Create { solution, node } => {
            let dates = parse_date_range(node.start.as_deref(), node.end.as_deref())?;
            let test = ctx.service.create_test(
                solution,
                &node.title,
                node.description.as_deref(),
                dates,
            )?;
            output(&test, flags.format)
        }
        TestCommands::Get { id } => output(&ctx.service.get_test(id)?, flags.format),
        TestCommands::List { solution } => {
            let limit = effective_limit(flags.limit, ctx.config.general.default_limit);
            let mut tests: Vec<Test> = match solution {
                Some(solution) => ctx.service.list_tests(solution)?,
                None => ctx
                    .service
                    .list_nodes(NodeKind::Test, limit)?
                    .into_iter()
                    .map(canopy_store::NodeData::into_test)
                    .collect::<Result<_, _>>()?,
            };
            tests.truncate(limit);
            output(&tests, flags.format)
        }
        TestCommands::Update {
            node,
            decision,
            clear_decision,
        } => {
            let update = test_update(node, decision.as_deref(), *clear_decision)?;
            output(&ctx.service.update_test(&node.id, &update)?, flags.format)
        }
        TestCommands::Decide { id, decision } => {
            let decision = parse_enum::<Decision>(decision, "decision")?;
            output(&ctx.service.log_decision(id, decision)?, flags.format)
        }
        TestCommands::Todo { id, done, total } => {
            output(&ctx.service.set_todo_progress(id, *done, *total)?, flags.format)
        }
        TestCommands::Delete { id } => output(&ctx.service.delete_test(id)?, flags.format),
        TestCommands::Move { id, to } => output(&ctx.service.move_test(id, to)?, flags.format),
    }
}
