use std::path::Path;

use anyhow::Context;
use serde::Serialize;

use canopy_store::TrailReplayer;
use canopy_store::trail::writer::trail_files;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::RebuildArgs;
use crate::context::AppContext;
use crate::output::output;

#[derive(Debug, Serialize)]
struct RebuildDryRunResponse {
    dry_run: bool,
    strict: bool,
    trail_dir: String,
    trail_files: usize,
    operations_detected: usize,
}

/// Handle `cnp rebuild`.
pub fn handle(args: &RebuildArgs, ctx: &mut AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let strict = args.strict || ctx.config.store.strict_replay;
    let trail_dir = ctx.trail_dir();

    if args.dry_run {
        let (trail_files, operations_detected) = count_trail_files_and_ops(&trail_dir)?;
        return output(
            &RebuildDryRunResponse {
                dry_run: true,
                strict,
                trail_dir: trail_dir.to_string_lossy().to_string(),
                trail_files,
                operations_detected,
            },
            flags.format,
        );
    }

    let response = TrailReplayer::rebuild(&mut ctx.service, strict)
        .context("rebuild: failed to replay trail files")?;
    output(&response, flags.format)
}

fn count_trail_files_and_ops(trail_dir: &Path) -> anyhow::Result<(usize, usize)> {
    let files = trail_files(trail_dir)?;
    let mut ops = 0usize;
    for path in &files {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("rebuild: failed to read {}", path.display()))?;
        ops += content.lines().filter(|line| !line.trim().is_empty()).count();
    }
    Ok((files.len(), ops))
}

#[cfg(test)]
mod tests {
    use super::count_trail_files_and_ops;

    #[test]
    fn counts_only_jsonl_lines() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        std::fs::write(temp.path().join("2026-03-01.jsonl"), "{}\n{}\n\n").unwrap();
        std::fs::write(temp.path().join("2026-03-02.jsonl"), "{}\n").unwrap();
        std::fs::write(temp.path().join("notes.txt"), "{}\n{}\n").unwrap();

        let (files, ops) = count_trail_files_and_ops(temp.path()).unwrap();
        assert_eq!(files, 2);
        assert_eq!(ops, 3);
    }

    #[test]
    fn missing_dir_counts_zero() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let (files, ops) = count_trail_files_and_ops(&temp.path().join("absent")).unwrap();
        assert_eq!((files, ops), (0, 0));
    }
}
