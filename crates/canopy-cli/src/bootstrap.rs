use std::path::Path;

use anyhow::Context;

use canopy_config::CanopyConfig;

/// Load the project's `.env` (falling back to the working directory's), then
/// the layered config for `project_root`.
pub fn load_config(project_root: &Path) -> anyhow::Result<CanopyConfig> {
    load_project_dotenv(project_root)?;
    CanopyConfig::load_for(project_root).context("failed to load canopy config")
}

fn load_project_dotenv(project_root: &Path) -> anyhow::Result<()> {
    let env_path = project_root.join(".env");
    if env_path.exists() {
        dotenvy::from_path(&env_path)
            .with_context(|| format!("failed to load dotenv file at {}", env_path.display()))?;
        return Ok(());
    }

    dotenvy::dotenv().ok();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::load_config;

    #[test]
    fn project_config_file_is_honored() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        std::fs::create_dir(temp.path().join(".canopy")).unwrap();
        std::fs::write(
            temp.path().join(".canopy/config.toml"),
            "[store]\nstrict_replay = true\n",
        )
        .unwrap();

        let config = load_config(temp.path()).expect("config should load");
        assert!(config.store.strict_replay);
    }

    #[test]
    fn invalid_project_config_is_an_error() {
        let temp = tempfile::tempdir().expect("tempdir should create");
        std::fs::create_dir(temp.path().join(".canopy")).unwrap();
        std::fs::write(
            temp.path().join(".canopy/config.toml"),
            "[general]\ndefault_limit = 0\n",
        )
        .unwrap();

        let err = load_config(temp.path()).unwrap_err();
        assert!(format!("{err:#}").contains("general.default_limit"));
    }
}
