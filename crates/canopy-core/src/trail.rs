//! JSONL trail operation envelope.
//!
//! Every mutation in Canopy is recorded as a `TrailOperation` in per-day
//! `.canopy/trail/{date}.jsonl` files. The node store is rebuildable from
//! these trail files.
//!
//! Old trail files without a `v` field deserialize with `v == 1` via
//! `#[serde(default)]`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::{NodeKind, TrailOp};

/// Current trail schema version.
pub const TRAIL_VERSION: u32 = 1;

const fn default_trail_version() -> u32 {
    TRAIL_VERSION
}

/// A single operation recorded in the JSONL trail.
///
/// The `data` field contains the node body (children stripped) for `Create`,
/// the changed fields for `Update`, and `null` for `Delete`. For `Create` and
/// `Move`, `parent` names the parent the node hangs under afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct TrailOperation {
    /// Schema version. Defaults to 1 for old trails without this field.
    #[serde(default = "default_trail_version")]
    pub v: u32,

    /// Position in the project's append order, starting at 1. Replay sorts
    /// on this rather than `ts`, so a wall clock stepping backwards cannot
    /// reorder operations. Lines without it read as 0 and keep file order.
    #[serde(default)]
    pub seq: u64,

    /// RFC 3339 timestamp (microsecond precision, UTC) of the operation.
    pub ts: String,

    /// What kind of mutation this represents.
    pub op: TrailOp,

    /// Kind of the affected node.
    pub entity: NodeKind,

    /// ID of the affected node.
    pub id: String,

    /// Parent ID for `Create` and `Move`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,

    /// Operation payload. Shape depends on `op` and `entity`.
    pub data: serde_json::Value,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trail_op_roundtrip() {
        let op = TrailOperation {
            v: 1,
            seq: 7,
            ts: "2026-02-08T12:00:00.000000Z".to_string(),
            op: TrailOp::Create,
            entity: NodeKind::Solution,
            id: "sol-deadbeef".to_string(),
            parent: Some("opp-00c0ffee".to_string()),
            data: serde_json::json!({"title": "Onboarding checklist"}),
        };

        let json = serde_json::to_string(&op).unwrap();
        let recovered: TrailOperation = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered, op);
    }

    #[test]
    fn trail_op_default_version() {
        let json = r#"{"ts":"2026-01-01T00:00:00Z","op":"delete","entity":"test","id":"tst-11111111","data":null}"#;
        let op: TrailOperation = serde_json::from_str(json).unwrap();
        assert_eq!(op.v, 1);
        assert_eq!(op.seq, 0);
        assert!(op.parent.is_none());
    }

    #[test]
    fn parent_omitted_when_absent() {
        let op = TrailOperation {
            v: 1,
            seq: 1,
            ts: String::new(),
            op: TrailOp::Update,
            entity: NodeKind::Outcome,
            id: "out-00000001".into(),
            parent: None,
            data: serde_json::json!({"title": "x"}),
        };
        let json = serde_json::to_string(&op).unwrap();
        assert!(!json.contains("parent"));
    }
}
