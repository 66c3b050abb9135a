use anyhow::Context;

use canopy_core::entities::Outcome;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ImportArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `cnp import`. Accepts the same shape `cnp tree` prints.
pub fn handle(args: &ImportArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.file)
        .with_context(|| format!("import: failed to read {}", args.file))?;
    let forest: Vec<Outcome> = serde_json::from_str(&raw)
        .with_context(|| format!("import: {} is not a JSON array of outcomes", args.file))?;

    let response = ctx.service.import_forest(forest)?;
    output(&response, flags.format)
}
