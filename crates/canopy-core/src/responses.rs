//! Response types returned as JSON by `cnp` commands.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::NodeKind;

/// Response from `cnp rebuild`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct RebuildResponse {
    pub rebuilt: bool,
    pub trail_files: u32,
    pub operations_replayed: u32,
    pub nodes_created: u32,
    pub duration_ms: u64,
}

/// Response from `cnp import`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct ImportResponse {
    pub outcomes: u32,
    pub nodes: u32,
}

/// Response from any `delete` command: the node and everything removed with it.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct DeleteResponse {
    pub kind: NodeKind,
    pub id: String,
    pub removed: Vec<String>,
}
