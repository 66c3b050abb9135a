use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::dates::DateRange;
use crate::entities::{Evidence, Kpi};

/// An experiment run against a solution.
///
/// `decision` is kept exactly as entered; normalization happens at scoring time.
/// Timestamps are optional because imported trees may not carry them.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Test {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub dates: DateRange,
    #[serde(default)]
    pub decision: Option<String>,
    #[serde(default)]
    pub todo: Option<TodoProgress>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub evidence: Vec<Evidence>,
    #[serde(default)]
    pub kpis: Vec<Kpi>,
}

/// Checklist progress attached to a test.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TodoProgress {
    pub done: u32,
    pub total: u32,
}

impl TodoProgress {
    /// Work is still open while fewer items are done than exist.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.total > 0 && self.done < self.total
    }
}
