use canopy_store::updates::KpiUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::KpiCommands;
use crate::context::AppContext;
use crate::output::output;

/// Handle `cnp kpi`.
pub fn handle(action: &KpiCommands, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match action {
        KpiCommands::Add {
            test,
            name,
            current,
            target,
            unit,
        } => {
            let kpi = ctx
                .service
                .add_kpi(test, name, *current, *target, unit.as_deref())?;
            output(&kpi, flags.format)
        }
        KpiCommands::List { test } => output(&ctx.service.list_kpis(test)?, flags.format),
        KpiCommands::Update {
            id,
            name,
            current,
            target,
            unit,
        } => {
            if name.is_none() && current.is_none() && target.is_none() && unit.is_none() {
                anyhow::bail!(
                    "At least one of --name, --current, --target, or --unit must be provided"
                );
            }

            let mut builder = KpiUpdateBuilder::new();
            if let Some(name) = name {
                builder = builder.name(name);
            }
            if let Some(current) = current {
                builder = builder.current(Some(*current));
            }
            if let Some(target) = target {
                builder = builder.target(Some(*target));
            }
            if let Some(unit) = unit {
                builder = builder.unit(Some(unit.clone()));
            }

            output(&ctx.service.update_kpi(id, &builder.build())?, flags.format)
        }
        KpiCommands::Delete { id } => output(&ctx.service.delete_kpi(id)?, flags.format),
    }
}
