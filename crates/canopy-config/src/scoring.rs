//! Confidence scoring configuration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScoringConfig {
    /// RFC 3339 instant used as "now" for recency. Unset means the wall clock.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub now: Option<String>,
}

impl ScoringConfig {
    /// The pinned scoring instant, if one is configured.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if `scoring.now` is not RFC 3339.
    pub fn pinned_now(&self) -> Result<Option<DateTime<Utc>>, ConfigError> {
        let Some(raw) = self.now.as_deref() else {
            return Ok(None);
        };
        DateTime::parse_from_rfc3339(raw)
            .map(|ts| Some(ts.with_timezone(&Utc)))
            .map_err(|e| ConfigError::InvalidValue {
                field: "scoring.now".into(),
                reason: format!("'{raw}' is not an RFC 3339 timestamp: {e}"),
            })
    }
}
