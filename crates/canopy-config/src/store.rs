//! Trail storage configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

fn default_trail_dir() -> String {
    ".canopy/trail".to_string()
}

const fn default_validate_trail() -> bool {
    true
}

const fn default_lock_timeout_secs() -> u64 {
    60
}

/// Writer lock file name inside the trail directory.
const LOCK_FILE: &str = "writer.lock";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StoreConfig {
    /// Directory holding the per-day `.jsonl` trail files. Relative paths
    /// resolve against the project root.
    #[serde(default = "default_trail_dir")]
    pub trail_dir: String,

    /// Schema-check create operations before they are appended (warn only).
    #[serde(default = "default_validate_trail")]
    pub validate_trail: bool,

    /// Reject trail lines that fail schema validation during rebuild.
    #[serde(default)]
    pub strict_replay: bool,

    /// How long a writer waits on a live lock holder before giving up.
    #[serde(default = "default_lock_timeout_secs")]
    pub lock_timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            trail_dir: default_trail_dir(),
            validate_trail: default_validate_trail(),
            strict_replay: false,
            lock_timeout_secs: default_lock_timeout_secs(),
        }
    }
}

impl StoreConfig {
    /// Absolute trail directory for a project rooted at `project_root`.
    #[must_use]
    pub fn trail_path(&self, project_root: &Path) -> PathBuf {
        let dir = Path::new(&self.trail_dir);
        if dir.is_absolute() {
            dir.to_path_buf()
        } else {
            project_root.join(dir)
        }
    }

    /// Writer lock file, kept beside the trail it guards.
    #[must_use]
    pub fn lock_path(&self, project_root: &Path) -> PathBuf {
        self.trail_path(project_root).join(LOCK_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = StoreConfig::default();
        assert_eq!(config.trail_dir, ".canopy/trail");
        assert!(config.validate_trail);
        assert!(!config.strict_replay);
        assert_eq!(config.lock_timeout_secs, 60);
    }

    #[test]
    fn relative_trail_dir_joins_project_root() {
        let config = StoreConfig::default();
        assert_eq!(
            config.trail_path(Path::new("/work/app")),
            PathBuf::from("/work/app/.canopy/trail")
        );
    }

    #[test]
    fn absolute_trail_dir_is_kept() {
        let config = StoreConfig {
            trail_dir: "/var/lib/canopy".into(),
            ..StoreConfig::default()
        };
        assert_eq!(
            config.trail_path(Path::new("/work/app")),
            PathBuf::from("/var/lib/canopy")
        );
    }

    #[test]
    fn lock_follows_trail_dir() {
        let config = StoreConfig {
            trail_dir: "/var/lib/canopy".into(),
            ..StoreConfig::default()
        };
        assert_eq!(
            config.lock_path(Path::new("/work/app")),
            PathBuf::from("/var/lib/canopy/writer.lock")
        );
    }
}
