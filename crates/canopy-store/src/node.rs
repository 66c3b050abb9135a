//! Node payloads as held in the arena.
//!
//! Inside the store a node's child collections are always empty; structure
//! lives in the arena's child-id lists. Children are attached back only when a
//! subtree is materialized.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use canopy_core::dates::DateRange;
use canopy_core::entities::{Evidence, Kpi, Opportunity, Outcome, Solution, Test};
use canopy_core::enums::NodeKind;

use crate::error::StoreError;
use crate::updates::{EvidenceUpdate, KpiUpdate, NodeUpdate, TestUpdate};

/// Any node of the discovery tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeData {
    Outcome(Outcome),
    Opportunity(Opportunity),
    Solution(Solution),
    Test(Test),
    Evidence(Evidence),
    Kpi(Kpi),
}

macro_rules! into_kind {
    ($fn:ident, $variant:ident, $ty:ty) => {
        /// Unwrap into the concrete type.
        ///
        /// # Errors
        ///
        /// Returns `StoreError::WrongKind` for any other variant.
        pub fn $fn(self) -> Result<$ty, StoreError> {
            match self {
                Self::$variant(node) => Ok(node),
                other => Err(StoreError::WrongKind {
                    id: other.id().to_string(),
                    expected: NodeKind::$variant,
                    actual: other.kind(),
                }),
            }
        }
    };
}

impl NodeData {
    #[must_use]
    pub const fn kind(&self) -> NodeKind {
        match self {
            Self::Outcome(_) => NodeKind::Outcome,
            Self::Opportunity(_) => NodeKind::Opportunity,
            Self::Solution(_) => NodeKind::Solution,
            Self::Test(_) => NodeKind::Test,
            Self::Evidence(_) => NodeKind::Evidence,
            Self::Kpi(_) => NodeKind::Kpi,
        }
    }

    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Outcome(n) => &n.id,
            Self::Opportunity(n) => &n.id,
            Self::Solution(n) => &n.id,
            Self::Test(n) => &n.id,
            Self::Evidence(n) => &n.id,
            Self::Kpi(n) => &n.id,
        }
    }

    /// Short human label: the title, or the closest thing a leaf has to one.
    #[must_use]
    pub fn label(&self) -> String {
        match self {
            Self::Outcome(n) => n.title.clone(),
            Self::Opportunity(n) => n.title.clone(),
            Self::Solution(n) => n.title.clone(),
            Self::Test(n) => n.title.clone(),
            Self::Evidence(n) => n
                .note
                .clone()
                .unwrap_or_else(|| format!("{} evidence", n.quality)),
            Self::Kpi(n) => n.name.clone(),
        }
    }

    /// The node's own date range. Evidence and KPIs never carry one.
    #[must_use]
    pub const fn dates(&self) -> DateRange {
        match self {
            Self::Outcome(n) => n.dates,
            Self::Opportunity(n) => n.dates,
            Self::Solution(n) => n.dates,
            Self::Test(n) => n.dates,
            Self::Evidence(_) | Self::Kpi(_) => DateRange::none(),
        }
    }

    /// Parse a trail `Create` body for a node of `kind`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Serialization` if the body does not match the kind.
    pub fn from_body(kind: NodeKind, body: serde_json::Value) -> Result<Self, StoreError> {
        let node = match kind {
            NodeKind::Outcome => Self::Outcome(serde_json::from_value(body)?),
            NodeKind::Opportunity => Self::Opportunity(serde_json::from_value(body)?),
            NodeKind::Solution => Self::Solution(serde_json::from_value(body)?),
            NodeKind::Test => Self::Test(serde_json::from_value(body)?),
            NodeKind::Evidence => Self::Evidence(serde_json::from_value(body)?),
            NodeKind::Kpi => Self::Kpi(serde_json::from_value(body)?),
        };
        Ok(node)
    }

    /// Serialize the bare entity (no `kind` tag) as a trail `Create` body.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Serialization` if serialization fails.
    pub fn body(&self) -> Result<serde_json::Value, StoreError> {
        let value = match self {
            Self::Outcome(n) => serde_json::to_value(n)?,
            Self::Opportunity(n) => serde_json::to_value(n)?,
            Self::Solution(n) => serde_json::to_value(n)?,
            Self::Test(n) => serde_json::to_value(n)?,
            Self::Evidence(n) => serde_json::to_value(n)?,
            Self::Kpi(n) => serde_json::to_value(n)?,
        };
        Ok(value)
    }

    /// Detach the child collections, returning the bare node and its children
    /// in tree order.
    #[must_use]
    pub fn split(self) -> (Self, Vec<Self>) {
        match self {
            Self::Outcome(mut n) => {
                let children = std::mem::take(&mut n.opportunities)
                    .into_iter()
                    .map(Self::Opportunity)
                    .collect();
                (Self::Outcome(n), children)
            }
            Self::Opportunity(mut n) => {
                let mut children: Vec<Self> = std::mem::take(&mut n.opportunities)
                    .into_iter()
                    .map(Self::Opportunity)
                    .collect();
                children.extend(std::mem::take(&mut n.solutions).into_iter().map(Self::Solution));
                (Self::Opportunity(n), children)
            }
            Self::Solution(mut n) => {
                let mut children: Vec<Self> = std::mem::take(&mut n.solutions)
                    .into_iter()
                    .map(Self::Solution)
                    .collect();
                children.extend(std::mem::take(&mut n.tests).into_iter().map(Self::Test));
                (Self::Solution(n), children)
            }
            Self::Test(mut n) => {
                let mut children: Vec<Self> = std::mem::take(&mut n.evidence)
                    .into_iter()
                    .map(Self::Evidence)
                    .collect();
                children.extend(std::mem::take(&mut n.kpis).into_iter().map(Self::Kpi));
                (Self::Test(n), children)
            }
            leaf @ (Self::Evidence(_) | Self::Kpi(_)) => (leaf, Vec::new()),
        }
    }

    /// Push a materialized child into the matching collection.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidParent` if this kind cannot hold the child.
    pub fn attach(&mut self, child: Self) -> Result<(), StoreError> {
        let parent_kind = self.kind();
        match (self, child) {
            (Self::Outcome(p), Self::Opportunity(c)) => p.opportunities.push(c),
            (Self::Opportunity(p), Self::Opportunity(c)) => p.opportunities.push(c),
            (Self::Opportunity(p), Self::Solution(c)) => p.solutions.push(c),
            (Self::Solution(p), Self::Solution(c)) => p.solutions.push(c),
            (Self::Solution(p), Self::Test(c)) => p.tests.push(c),
            (Self::Test(p), Self::Evidence(c)) => p.evidence.push(c),
            (Self::Test(p), Self::Kpi(c)) => p.kpis.push(c),
            (_, child) => {
                return Err(StoreError::InvalidParent {
                    child: child.kind(),
                    parent: parent_kind.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Apply a trail `Update` payload. `touched_at` becomes `updated_at` on
    /// kinds that track it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Serialization` if the payload is not a valid patch
    /// for this kind.
    pub fn apply_update(
        &mut self,
        patch: &serde_json::Value,
        touched_at: DateTime<Utc>,
    ) -> Result<(), StoreError> {
        match self {
            Self::Outcome(n) => {
                let update = NodeUpdate::deserialize(patch)?;
                update.apply(&mut n.title, &mut n.description, &mut n.dates);
                n.updated_at = touched_at;
            }
            Self::Opportunity(n) => {
                let update = NodeUpdate::deserialize(patch)?;
                update.apply(&mut n.title, &mut n.description, &mut n.dates);
                n.updated_at = touched_at;
            }
            Self::Solution(n) => {
                let update = NodeUpdate::deserialize(patch)?;
                update.apply(&mut n.title, &mut n.description, &mut n.dates);
                n.updated_at = touched_at;
            }
            Self::Test(n) => {
                TestUpdate::deserialize(patch)?.apply(n);
                n.updated_at = Some(touched_at);
            }
            Self::Evidence(n) => EvidenceUpdate::deserialize(patch)?.apply(n),
            Self::Kpi(n) => KpiUpdate::deserialize(patch)?.apply(n),
        }
        Ok(())
    }

    into_kind!(into_outcome, Outcome, Outcome);
    into_kind!(into_opportunity, Opportunity, Opportunity);
    into_kind!(into_solution, Solution, Solution);
    into_kind!(into_test, Test, Test);
    into_kind!(into_evidence, Evidence, Evidence);
    into_kind!(into_kpi, Kpi, Kpi);
}
