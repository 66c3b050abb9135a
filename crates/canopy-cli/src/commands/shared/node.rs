use canopy_store::updates::{NodeUpdate, NodeUpdateBuilder, TestUpdate, TestUpdateBuilder};

use crate::cli::subcommands::NodeUpdateArgs;
use crate::commands::shared::dates::date_patch;

/// Translate update flags into a node patch. Fails if no flag was given.
pub fn node_update(args: &NodeUpdateArgs) -> anyhow::Result<NodeUpdate> {
    let mut builder = NodeUpdateBuilder::new();
    if let Some(title) = &args.title {
        builder = builder.title(title);
    }
    if let Some(description) = description_patch(args) {
        builder = builder.description(description);
    }
    if let Some(dates) = date_patch(args.start.as_deref(), args.end.as_deref(), args.clear_dates)? {
        builder = builder.dates(dates);
    }

    let update = builder.build();
    if update.is_empty() {
        anyhow::bail!(
            "At least one of --title, --description, --clear-description, --start, --end, or --clear-dates must be provided"
        );
    }
    Ok(update)
}

/// Same as [`node_update`] plus the test-only decision text.
pub fn test_update(
    args: &NodeUpdateArgs,
    decision: Option<&str>,
    clear_decision: bool,
) -> anyhow::Result<TestUpdate> {
    let mut builder = TestUpdateBuilder::new();
    if let Some(title) = &args.title {
        builder = builder.title(title);
    }
    if let Some(description) = description_patch(args) {
        builder = builder.description(description);
    }
    if let Some(dates) = date_patch(args.start.as_deref(), args.end.as_deref(), args.clear_dates)? {
        builder = builder.dates(dates);
    }
    if clear_decision {
        builder = builder.decision(None);
    } else if let Some(decision) = decision {
        builder = builder.decision(Some(decision.to_string()));
    }

    let update = builder.build();
    if update.is_empty() {
        anyhow::bail!("At least one update flag must be provided");
    }
    Ok(update)
}

fn description_patch(args: &NodeUpdateArgs) -> Option<Option<String>> {
    if args.clear_description {
        Some(None)
    } else {
        args.description.clone().map(Some)
    }
}
