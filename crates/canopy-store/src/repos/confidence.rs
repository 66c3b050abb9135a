//! Confidence over the live tree.
//!
//! Scores are never stored; each call materializes the forest and runs one
//! aggregation pass.

use chrono::{DateTime, Utc};

use canopy_confidence::{ConfidenceMap, ConfidenceReport, NodeKey, ScoreResult, compute_all, report};
use canopy_core::enums::NodeKind;

use crate::error::StoreError;
use crate::service::CanopyService;

impl CanopyService {
    /// Score every solution, opportunity, and outcome.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Aggregate` if the tree is not a strict tree.
    pub fn recompute_confidence(&self, now: DateTime<Utc>) -> Result<ConfidenceMap, StoreError> {
        let forest = self.forest()?;
        compute_all(&forest, now).map_err(|e| {
            tracing::error!(error = %e, "confidence recompute aborted");
            StoreError::from(e)
        })
    }

    /// Every result plus the overall roll-up of outcome scores.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Aggregate` if the tree is not a strict tree.
    pub fn confidence_report(&self, now: DateTime<Utc>) -> Result<ConfidenceReport, StoreError> {
        let forest = self.forest()?;
        report(&forest, now).map_err(|e| {
            tracing::error!(error = %e, "confidence report aborted");
            StoreError::from(e)
        })
    }

    /// Confidence of a single container node.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for unknown ids and `StoreError::Validation`
    /// for kinds that are not scored (tests, evidence, KPIs).
    pub fn node_confidence(&self, id: &str, now: DateTime<Utc>) -> Result<ScoreResult, StoreError> {
        let kind = self.store().require(id)?.kind();
        if !matches!(kind, NodeKind::Outcome | NodeKind::Opportunity | NodeKind::Solution) {
            return Err(StoreError::Validation(format!("{kind} nodes are not scored")));
        }
        let key = NodeKey::new(kind, id);
        self.recompute_confidence(now)?
            .remove(&key)
            .ok_or_else(|| StoreError::InvalidState(format!("{key} missing from recompute")))
    }
}
