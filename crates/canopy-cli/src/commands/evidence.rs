use canopy_core::enums::EvidenceQuality;
use canopy_store::updates::EvidenceUpdateBuilder;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::EvidenceCommands;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `cnp evidence`.
pub fn handle(
    action: &EvidenceCommands,
    ctx: &mut AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        EvidenceCommands::Add {
            test,
            quality,
            note,
        } => {
            let quality = parse_enum::<EvidenceQuality>(quality, "quality")?;
            let evidence = ctx.service.add_evidence(test, quality, note.as_deref())?;
            output(&evidence, flags.format)
        }
        EvidenceCommands::List { test } => output(&ctx.service.list_evidence(test)?, flags.format),
        EvidenceCommands::Update {
            id,
            quality,
            note,
            clear_note,
        } => {
            if quality.is_none() && note.is_none() && !clear_note {
                anyhow::bail!("At least one of --quality, --note, or --clear-note must be provided");
            }

            let mut builder = EvidenceUpdateBuilder::new();
            if let Some(quality) = quality {
                builder = builder.quality(parse_enum::<EvidenceQuality>(quality, "quality")?);
            }
            if *clear_note {
                builder = builder.note(None);
            } else if let Some(note) = note {
                builder = builder.note(Some(note.clone()));
            }

            output(&ctx.service.update_evidence(id, &builder.build())?, flags.format)
        }
        EvidenceCommands::Delete { id } => output(&ctx.service.delete_evidence(id)?, flags.format),
    }
}
