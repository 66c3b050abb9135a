use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use canopy_config::PROJECT_DIR;

mod bootstrap;
mod cli;
mod commands;
mod context;
mod output;
mod ui;
mod write_lock;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        eprintln!("cnp error: {error:#}");
        std::process::exit(1);
    }
}

async fn run() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    init_tracing(cli.quiet, cli.verbose)?;

    let flags = cli.global_flags();
    ui::init(&flags);

    match &cli.command {
        cli::Commands::Init(args) => return commands::init::handle(args, &flags),
        cli::Commands::Schema(args) => return commands::schema::handle(args, &flags),
        _ => {}
    }

    let project_root = resolve_project_root(flags.project.as_deref())?;
    let config = bootstrap::load_config(&project_root)?;

    let command = cli.command;
    let write_lock = if command_requires_write_lock(&command) {
        Some(
            write_lock::TrailLock::for_project(&config.store, &project_root)
                .acquire()
                .await?,
        )
    } else {
        None
    };

    let mut ctx = context::AppContext::init(project_root, config)
        .context("failed to initialize canopy application context")?;

    let result = commands::dispatch::dispatch(command, &mut ctx, &flags);
    drop(write_lock);
    result
}

fn init_tracing(quiet: bool, verbose: bool) -> anyhow::Result<()> {
    let level = if quiet {
        "error"
    } else if verbose {
        "debug"
    } else {
        "warn"
    };

    let filter = tracing_subscriber::EnvFilter::try_from_env("CANOPY_LOG")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|error| anyhow::anyhow!("failed to initialize tracing subscriber: {error}"))?;

    Ok(())
}

fn resolve_project_root(project_override: Option<&str>) -> anyhow::Result<PathBuf> {
    if let Some(path) = project_override {
        let explicit = PathBuf::from(path);

        if explicit
            .file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| name == PROJECT_DIR)
        {
            return explicit
                .parent()
                .map(std::path::Path::to_path_buf)
                .context("invalid --project path: '.canopy' directory has no parent");
        }

        if explicit.is_dir() {
            return Ok(explicit);
        }

        anyhow::bail!(
            "invalid --project '{}': directory does not exist",
            explicit.display()
        );
    }

    let start = std::env::current_dir().context("failed to read current directory")?;
    context::find_project_root(&start)
        .context("not a canopy project (no .canopy directory found). Run 'cnp init' first.")
}

fn command_requires_write_lock(command: &cli::Commands) -> bool {
    use crate::cli::subcommands::{
        EvidenceCommands, KpiCommands, OpportunityCommands, OutcomeCommands, SolutionCommands,
        TestCommands,
    };

    match command {
        cli::Commands::Outcome { action } => !matches!(
            action,
            OutcomeCommands::Get { .. } | OutcomeCommands::List
        ),
        cli::Commands::Opportunity { action } => !matches!(
            action,
            OpportunityCommands::Get { .. } | OpportunityCommands::List { .. }
        ),
        cli::Commands::Solution { action } => !matches!(
            action,
            SolutionCommands::Get { .. } | SolutionCommands::List { .. }
        ),
        cli::Commands::Test { action } => {
            !matches!(action, TestCommands::Get { .. } | TestCommands::List { .. })
        }
        cli::Commands::Evidence { action } => !matches!(action, EvidenceCommands::List { .. }),
        cli::Commands::Kpi { action } => !matches!(action, KpiCommands::List { .. }),
        cli::Commands::Rebuild(args) => !args.dry_run,
        cli::Commands::Import(_) => true,
        cli::Commands::Tree(_)
        | cli::Commands::Confidence(_)
        | cli::Commands::Init(_)
        | cli::Commands::Schema(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{command_requires_write_lock, resolve_project_root};
    use crate::cli::Cli;

    fn needs_lock(args: &[&str]) -> bool {
        let cli = Cli::try_parse_from(args).expect("cli should parse");
        command_requires_write_lock(&cli.command)
    }

    #[test]
    fn reads_do_not_lock() {
        assert!(!needs_lock(&["cnp", "tree"]));
        assert!(!needs_lock(&["cnp", "confidence", "--node", "sol-00000001"]));
        assert!(!needs_lock(&["cnp", "outcome", "list"]));
        assert!(!needs_lock(&["cnp", "evidence", "list", "--test", "tst-00000001"]));
        assert!(!needs_lock(&["cnp", "rebuild", "--dry-run"]));
    }

    #[test]
    fn mutations_lock() {
        assert!(needs_lock(&["cnp", "outcome", "create", "--title", "Retention"]));
        assert!(needs_lock(&["cnp", "test", "decide", "tst-00000001", "kill"]));
        assert!(needs_lock(&["cnp", "solution", "move", "sol-1", "--to", "opp-2"]));
        assert!(needs_lock(&["cnp", "import", "forest.json"]));
        assert!(needs_lock(&["cnp", "rebuild"]));
    }

    #[test]
    fn project_override_accepts_canopy_dir() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let dot = temp.path().join(".canopy");
        std::fs::create_dir(&dot).unwrap();

        let root = resolve_project_root(dot.to_str()).unwrap();
        assert_eq!(root, temp.path());
        let root = resolve_project_root(temp.path().to_str()).unwrap();
        assert_eq!(root, temp.path());
    }

    #[test]
    fn project_override_must_exist() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let missing = temp.path().join("nope");
        let err = resolve_project_root(missing.to_str()).unwrap_err();
        assert!(err.to_string().contains("directory does not exist"));
    }
}
