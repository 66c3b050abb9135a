//! # canopy-config
//!
//! Layered configuration loading for Canopy using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`CANOPY_*` prefix, `__` as separator)
//! 2. Project-level `.canopy/config.toml`
//! 3. User-level `~/.config/canopy/config.toml`
//! 4. Built-in defaults
//!
//! `CANOPY_STORE__TRAIL_DIR` maps to `store.trail_dir`,
//! `CANOPY_SCORING__NOW` to `scoring.now`, and so on.

mod error;
mod general;
mod scoring;
mod store;

pub use error::ConfigError;
pub use general::GeneralConfig;
pub use scoring::ScoringConfig;
pub use store::StoreConfig;

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

/// Project directory name, relative to the project root.
pub const PROJECT_DIR: &str = ".canopy";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CanopyConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
}

impl CanopyConfig {
    /// Load configuration from TOML files and environment variables, with the
    /// project config looked up relative to the current directory.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        Self::extract(Self::figment())
    }

    /// Load configuration for a project rooted at `project_root`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is invalid.
    pub fn load_for(project_root: &Path) -> Result<Self, ConfigError> {
        Self::extract(Self::figment_for(Some(project_root)))
    }

    /// Provider chain rooted at the current directory.
    #[must_use]
    pub fn figment() -> Figment {
        Self::figment_for(None)
    }

    /// Provider chain with the project config taken from `project_root`.
    #[must_use]
    pub fn figment_for(project_root: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = project_root.map_or_else(
            || PathBuf::from(PROJECT_DIR).join("config.toml"),
            |root| root.join(PROJECT_DIR).join("config.toml"),
        );
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("CANOPY_").split("__"))
    }

    /// Extract and check a config from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if extraction fails or a value is invalid.
    pub fn extract(figment: Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that parse but cannot be used.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.general.default_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.default_limit".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.store.trail_dir.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "store.trail_dir".into(),
                reason: "must not be empty".into(),
            });
        }
        self.scoring.pinned_now()?;
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("canopy").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = CanopyConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.general.default_limit, 20);
        assert!(config.scoring.now.is_none());
    }

    #[test]
    fn zero_limit_is_invalid() {
        let mut config = CanopyConfig::default();
        config.general.default_limit = 0;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidValue { .. })
        ));
    }
}
