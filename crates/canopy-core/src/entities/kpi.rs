use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A metric tracked by a test. Not an input to confidence scoring.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq)]
pub struct Kpi {
    pub id: String,
    pub test_id: String,
    pub name: String,
    #[serde(default)]
    pub current: Option<f64>,
    #[serde(default)]
    pub target: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
}
