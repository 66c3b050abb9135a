//! Whole-forest confidence aggregation.
//!
//! One depth-first walk per recompute, driven by an explicit stack so depth is
//! bounded by memory rather than the call stack. Decided tests are appended to
//! a single buffer as they are reached; because the walk is depth-first, every
//! container's transitive tests occupy one contiguous slice of that buffer,
//! which is scored when the container's close frame is popped.
//!
//! - `solution:<id>` scores the solution's own tests only.
//! - `opportunity:<id>` scores every test beneath it, through nested
//!   opportunities and nested solutions.
//! - `outcome:<id>` scores every test beneath its opportunities.

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize, Serializer};

use canopy_core::entities::{Opportunity, Outcome, Solution};
use canopy_core::enums::NodeKind;

use crate::decision::{DecidedTest, decided};
use crate::error::AggregateError;
use crate::rollup::{RollupScore, combine_child_scores};
use crate::scorer::{ScoreResult, score};

/// Key of a scored node, rendered as `kind:id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeKey {
    pub kind: NodeKind,
    pub id: String,
}

impl NodeKey {
    #[must_use]
    pub fn new(kind: NodeKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}

impl fmt::Display for NodeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

impl Serialize for NodeKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl FromStr for NodeKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s
            .split_once(':')
            .ok_or_else(|| format!("expected kind:id, got '{s}'"))?;
        let kind: NodeKind = serde_json::from_value(serde_json::Value::String(kind.to_string()))
            .map_err(|e| format!("unknown node kind '{kind}': {e}"))?;
        if id.is_empty() {
            return Err(format!("missing id in '{s}'"));
        }
        Ok(Self::new(kind, id))
    }
}

/// Flat map from node key to its confidence.
pub type ConfidenceMap = BTreeMap<NodeKey, ScoreResult>;

/// Everything a caller needs to display confidence for a forest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ConfidenceReport {
    pub computed_at: DateTime<Utc>,
    pub results: BTreeMap<String, ScoreResult>,
    /// Average of the outcome scores.
    pub overall: RollupScore,
}

enum Frame<'a> {
    Opportunity(&'a Opportunity),
    Solution(&'a Solution),
    Close {
        kind: NodeKind,
        id: &'a str,
        start: usize,
    },
}

/// Score every solution, opportunity, and outcome in `forest`.
///
/// # Errors
///
/// Returns `AggregateError` if a test is reachable twice or a container key
/// repeats. No partial map is returned.
pub fn compute_all(
    forest: &[Outcome],
    now: DateTime<Utc>,
) -> Result<ConfidenceMap, AggregateError> {
    let mut results = ConfidenceMap::new();
    let mut seen_tests: HashSet<&str> = HashSet::new();
    let mut collected: Vec<DecidedTest<'_>> = Vec::new();
    let mut stack: Vec<Frame<'_>> = Vec::new();

    for outcome in forest {
        collected.clear();
        stack.extend(outcome.opportunities.iter().rev().map(Frame::Opportunity));

        while let Some(frame) = stack.pop() {
            match frame {
                Frame::Opportunity(opp) => {
                    stack.push(Frame::Close {
                        kind: NodeKind::Opportunity,
                        id: &opp.id,
                        start: collected.len(),
                    });
                    stack.extend(opp.solutions.iter().rev().map(Frame::Solution));
                    stack.extend(opp.opportunities.iter().rev().map(Frame::Opportunity));
                }
                Frame::Solution(sol) => {
                    let start = collected.len();
                    for test in &sol.tests {
                        if !seen_tests.insert(test.id.as_str()) {
                            tracing::error!(test = %test.id, "test reachable through more than one path");
                            return Err(AggregateError::DuplicateTest {
                                id: test.id.clone(),
                            });
                        }
                        if let Some(d) = decided(test) {
                            collected.push(d);
                        }
                    }
                    record(
                        &mut results,
                        NodeKey::new(NodeKind::Solution, &sol.id),
                        score(&collected[start..], now),
                    )?;
                    stack.extend(sol.solutions.iter().rev().map(Frame::Solution));
                }
                Frame::Close { kind, id, start } => {
                    record(
                        &mut results,
                        NodeKey::new(kind, id),
                        score(&collected[start..], now),
                    )?;
                }
            }
        }

        record(
            &mut results,
            NodeKey::new(NodeKind::Outcome, &outcome.id),
            score(&collected, now),
        )?;
    }

    tracing::debug!(nodes = results.len(), tests = seen_tests.len(), "confidence recomputed");
    Ok(results)
}

fn record(
    results: &mut ConfidenceMap,
    key: NodeKey,
    result: ScoreResult,
) -> Result<(), AggregateError> {
    if results.contains_key(&key) {
        tracing::error!(%key, "node scored twice");
        return Err(AggregateError::DuplicateNode {
            key: key.to_string(),
        });
    }
    results.insert(key, result);
    Ok(())
}

/// Compute the full report: every node result plus the overall roll-up of
/// outcome scores.
///
/// # Errors
///
/// Propagates `AggregateError` from [`compute_all`].
pub fn report(forest: &[Outcome], now: DateTime<Utc>) -> Result<ConfidenceReport, AggregateError> {
    let map = compute_all(forest, now)?;
    let outcome_scores: Vec<f64> = forest
        .iter()
        .filter_map(|outcome| map.get(&NodeKey::new(NodeKind::Outcome, &outcome.id)))
        .map(|result| result.score)
        .collect();
    let overall = combine_child_scores(&outcome_scores);
    let results = map
        .into_iter()
        .map(|(key, result)| (key.to_string(), result))
        .collect();
    Ok(ConfidenceReport {
        computed_at: now,
        results,
        overall,
    })
}
