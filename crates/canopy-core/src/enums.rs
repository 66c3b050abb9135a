//! Node kinds, decisions, evidence quality, confidence levels, and trail ops.
//!
//! All enums use `snake_case` serialization via `#[serde(rename_all = "snake_case")]`.
//! `NodeKind` provides `allowed_children()` so the store can enforce the tree
//! shape at the application layer.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// NodeKind
// ---------------------------------------------------------------------------

/// Kind of node in the discovery tree.
///
/// ```text
/// outcome → opportunity → opportunity …
///                       → solution → solution …
///                                  → test → evidence
///                                         → kpi
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Outcome,
    Opportunity,
    Solution,
    Test,
    Evidence,
    Kpi,
}

impl NodeKind {
    /// Kinds that may be added directly beneath this kind.
    #[must_use]
    pub const fn allowed_children(self) -> &'static [Self] {
        match self {
            Self::Outcome => &[Self::Opportunity],
            Self::Opportunity => &[Self::Opportunity, Self::Solution],
            Self::Solution => &[Self::Solution, Self::Test],
            Self::Test => &[Self::Evidence, Self::Kpi],
            Self::Evidence | Self::Kpi => &[],
        }
    }

    /// Check whether a node of kind `child` may live under this kind.
    #[must_use]
    pub fn can_contain(self, child: Self) -> bool {
        self.allowed_children().contains(&child)
    }

    /// Whether nodes of this kind carry an optional date range.
    #[must_use]
    pub const fn is_dated(self) -> bool {
        matches!(
            self,
            Self::Outcome | Self::Opportunity | Self::Solution | Self::Test
        )
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Outcome => "outcome",
            Self::Opportunity => "opportunity",
            Self::Solution => "solution",
            Self::Test => "test",
            Self::Evidence => "evidence",
            Self::Kpi => "kpi",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

/// Normalized outcome of a test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    Pass,
    Iterate,
    Kill,
}

impl Decision {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Iterate => "iterate",
            Self::Kill => "kill",
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// EvidenceQuality
// ---------------------------------------------------------------------------

/// Quality tag attached to a piece of evidence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum EvidenceQuality {
    High,
    Medium,
    Low,
}

impl EvidenceQuality {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

impl fmt::Display for EvidenceQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ConfidenceLevel
// ---------------------------------------------------------------------------

/// Coarse confidence bucket derived from a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ConfidenceLevel {
    Low,
    Medium,
    High,
}

impl ConfidenceLevel {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// TrailOp
// ---------------------------------------------------------------------------

/// Kind of mutation recorded in the JSONL trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TrailOp {
    Create,
    Update,
    Delete,
    Move,
}

impl TrailOp {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::Move => "move",
        }
    }
}

impl fmt::Display for TrailOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected:literal) => {
            #[test]
            fn $name() {
                let json = serde_json::to_string(&$variant).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected));
                let recovered: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(recovered, $variant);
            }
        };
    }

    serde_roundtrip!(node_kind_opportunity, NodeKind, NodeKind::Opportunity, "opportunity");
    serde_roundtrip!(node_kind_kpi, NodeKind, NodeKind::Kpi, "kpi");
    serde_roundtrip!(decision_iterate, Decision, Decision::Iterate, "iterate");
    serde_roundtrip!(quality_medium, EvidenceQuality, EvidenceQuality::Medium, "medium");
    serde_roundtrip!(level_high, ConfidenceLevel, ConfidenceLevel::High, "high");
    serde_roundtrip!(trail_op_move, TrailOp, TrailOp::Move, "move");

    #[test]
    fn self_nesting_allowed_for_opportunity_and_solution() {
        assert!(NodeKind::Opportunity.can_contain(NodeKind::Opportunity));
        assert!(NodeKind::Solution.can_contain(NodeKind::Solution));
    }

    #[test]
    fn cross_level_children_rejected() {
        assert!(!NodeKind::Outcome.can_contain(NodeKind::Solution));
        assert!(!NodeKind::Opportunity.can_contain(NodeKind::Test));
        assert!(!NodeKind::Solution.can_contain(NodeKind::Opportunity));
        assert!(!NodeKind::Test.can_contain(NodeKind::Test));
        assert!(!NodeKind::Outcome.can_contain(NodeKind::Outcome));
    }

    #[test]
    fn leaves_have_no_children() {
        assert!(NodeKind::Evidence.allowed_children().is_empty());
        assert!(NodeKind::Kpi.allowed_children().is_empty());
    }

    #[test]
    fn only_tree_levels_are_dated() {
        assert!(NodeKind::Outcome.is_dated());
        assert!(NodeKind::Test.is_dated());
        assert!(!NodeKind::Evidence.is_dated());
        assert!(!NodeKind::Kpi.is_dated());
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", NodeKind::Solution), "solution");
        assert_eq!(format!("{}", Decision::Kill), "kill");
        assert_eq!(format!("{}", EvidenceQuality::Low), "low");
        assert_eq!(format!("{}", ConfidenceLevel::Medium), "medium");
        assert_eq!(format!("{}", TrailOp::Delete), "delete");
    }
}
