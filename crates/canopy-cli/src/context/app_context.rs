use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::{DateTime, Utc};

use canopy_config::CanopyConfig;
use canopy_core::clock::SystemClock;
use canopy_store::CanopyService;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub service: CanopyService,
    pub config: CanopyConfig,
    pub project_root: PathBuf,
}

impl AppContext {
    /// Open the project's trail and replay it into a live service.
    pub fn init(project_root: PathBuf, config: CanopyConfig) -> anyhow::Result<Self> {
        let trail_dir = config.store.trail_path(&project_root);
        let service = CanopyService::open_trail(
            trail_dir.clone(),
            config.store.validate_trail,
            Arc::new(SystemClock),
        )
        .with_context(|| format!("failed to load trail at {}", trail_dir.display()))?;

        Ok(Self {
            service,
            config,
            project_root,
        })
    }

    #[must_use]
    pub fn trail_dir(&self) -> PathBuf {
        self.config.store.trail_path(&self.project_root)
    }

    /// Instant used for recency: an explicit `--now`, else `scoring.now`,
    /// else the wall clock.
    pub fn scoring_now(&self, explicit: Option<&str>) -> anyhow::Result<DateTime<Utc>> {
        if let Some(raw) = explicit {
            return DateTime::parse_from_rfc3339(raw)
                .map(|ts| ts.with_timezone(&Utc))
                .with_context(|| format!("invalid --now '{raw}': expected RFC 3339"));
        }
        Ok(self
            .config
            .scoring
            .pinned_now()?
            .unwrap_or_else(|| self.service.now()))
    }
}
