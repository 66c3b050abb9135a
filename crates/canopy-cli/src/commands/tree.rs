use serde::Serialize;

use canopy_store::NodeData;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::TreeArgs;
use crate::context::AppContext;
use crate::output::output_with_rows;

/// One line of the indented outline shown in table mode.
#[derive(Debug, Serialize)]
struct TreeRow {
    node: String,
    kind: String,
    id: String,
    start: Option<String>,
    end: Option<String>,
}

/// Handle `cnp tree`.
pub fn handle(args: &TreeArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match &args.id {
        Some(id) => {
            let subtree = ctx.service.subtree(id)?;
            output_with_rows(&subtree, || outline(vec![subtree.clone()]), flags.format)
        }
        None => {
            let forest = ctx.service.forest()?;
            output_with_rows(
                &forest,
                || outline(forest.iter().cloned().map(NodeData::Outcome).collect()),
                flags.format,
            )
        }
    }
}

fn outline(roots: Vec<NodeData>) -> Vec<TreeRow> {
    let mut rows = Vec::new();
    let mut stack: Vec<(NodeData, usize)> = roots.into_iter().rev().map(|node| (node, 0)).collect();

    while let Some((node, depth)) = stack.pop() {
        let (bare, children) = node.split();
        let dates = bare.dates();
        rows.push(TreeRow {
            node: format!("{}{}", "  ".repeat(depth), bare.label()),
            kind: bare.kind().to_string(),
            id: bare.id().to_string(),
            start: dates.start.map(|d| d.to_string()),
            end: dates.end.map(|d| d.to_string()),
        });
        stack.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
    }

    rows
}
