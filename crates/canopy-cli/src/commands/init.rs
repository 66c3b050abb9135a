use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Serialize;

use canopy_config::{CanopyConfig, PROJECT_DIR};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::InitArgs;
use crate::output::output;

#[derive(Debug, Serialize)]
struct InitResponse {
    project_root: String,
    config_path: String,
    trail_dir: String,
    config_written: bool,
}

/// Handle `cnp init`.
pub fn handle(args: &InitArgs, flags: &GlobalFlags) -> anyhow::Result<()> {
    let root = match &args.path {
        Some(path) => PathBuf::from(path),
        None => std::env::current_dir().context("failed to read current directory")?,
    };
    let response = init_project(&root, args.force)?;
    output(&response, flags.format)
}

fn init_project(root: &Path, force: bool) -> anyhow::Result<InitResponse> {
    let project_dir = root.join(PROJECT_DIR);
    std::fs::create_dir_all(&project_dir)
        .with_context(|| format!("init: failed to create {}", project_dir.display()))?;

    let config = CanopyConfig::default();
    let trail_dir = config.store.trail_path(root);
    std::fs::create_dir_all(&trail_dir)
        .with_context(|| format!("init: failed to create {}", trail_dir.display()))?;

    let config_path = project_dir.join("config.toml");
    let config_written = force || !config_path.exists();
    if config_written {
        let body = toml::to_string_pretty(&config).context("init: failed to serialize config")?;
        std::fs::write(&config_path, body)
            .with_context(|| format!("init: failed to write {}", config_path.display()))?;
        tracing::info!(path = %config_path.display(), "wrote project config");
    }

    Ok(InitResponse {
        project_root: root.to_string_lossy().to_string(),
        config_path: config_path.to_string_lossy().to_string(),
        trail_dir: trail_dir.to_string_lossy().to_string(),
        config_written,
    })
}

#[cfg(test)]
mod tests {
    use canopy_config::CanopyConfig;

    use super::init_project;

    #[test]
    fn creates_layout_and_loadable_config() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        let response = init_project(temp.path(), false).unwrap();

        assert!(response.config_written);
        assert!(temp.path().join(".canopy/config.toml").is_file());
        assert!(std::path::Path::new(&response.trail_dir).is_dir());

        let body = std::fs::read_to_string(temp.path().join(".canopy/config.toml")).unwrap();
        let parsed: CanopyConfig = toml::from_str(&body).unwrap();
        assert_eq!(parsed.general.default_limit, CanopyConfig::default().general.default_limit);
    }

    #[test]
    fn existing_config_is_kept_unless_forced() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        init_project(temp.path(), false).unwrap();
        let config_path = temp.path().join(".canopy/config.toml");
        std::fs::write(&config_path, "[general]\ndefault_limit = 7\n").unwrap();

        let again = init_project(temp.path(), false).unwrap();
        assert!(!again.config_written);
        assert!(std::fs::read_to_string(&config_path).unwrap().contains("default_limit = 7"));

        let forced = init_project(temp.path(), true).unwrap();
        assert!(forced.config_written);
        assert!(!std::fs::read_to_string(&config_path).unwrap().contains("default_limit = 7"));
    }
}
