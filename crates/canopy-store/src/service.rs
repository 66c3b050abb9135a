//! Service layer orchestrating node mutations with the trail.
//!
//! `CanopyService` owns the arena (`NodeStore`), the persistence adapter
//! (`TreeRepository`), and the clock. Repo methods for each node kind are
//! implemented as `impl CanopyService` blocks under `repos/`.
//!
//! Every mutation follows the same protocol:
//! 1. Check structure and dates against the current store
//! 2. Record the trail operation through the repository
//! 3. Apply the same operation to the store
//!
//! A rejected check leaves both the trail and the tree unchanged.

use std::path::PathBuf;
use std::sync::Arc;

use chrono::{DateTime, SecondsFormat, Utc};

use canopy_core::clock::Clock;
use canopy_core::dates::{DateRange, validate_ancestor_shrink, validate_node_dates};
use canopy_core::enums::{NodeKind, TrailOp};
use canopy_core::ids::generate_id;
use canopy_core::entities::Outcome;
use canopy_core::responses::{DeleteResponse, ImportResponse};
use canopy_core::trail::{TRAIL_VERSION, TrailOperation};

use crate::error::StoreError;
use crate::node::NodeData;
use crate::repository::{MemoryRepository, TrailRepository, TreeRepository};
use crate::store::NodeStore;
use crate::trail::replayer::TrailReplayer;

const ID_ATTEMPTS: usize = 8;

pub struct CanopyService {
    store: NodeStore,
    repo: Box<dyn TreeRepository>,
    clock: Arc<dyn Clock>,
    next_seq: u64,
}

impl CanopyService {
    /// Open a service over `repo`, replaying everything it has recorded.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the recorded operations cannot be loaded or
    /// replayed.
    pub fn open(repo: Box<dyn TreeRepository>, clock: Arc<dyn Clock>) -> Result<Self, StoreError> {
        let snapshot = repo.load()?;
        let (store, stats) = TrailReplayer::replay(&snapshot.operations, None)?;
        tracing::debug!(
            operations = stats.operations_replayed,
            nodes = store.len(),
            "store loaded from trail"
        );
        let next_seq = snapshot.operations.iter().map(|op| op.seq).max().unwrap_or(0) + 1;
        Ok(Self {
            store,
            repo,
            clock,
            next_seq,
        })
    }

    /// Open a service over the JSONL trail at `trail_dir`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` if the trail cannot be opened or replayed.
    pub fn open_trail(
        trail_dir: PathBuf,
        validate: bool,
        clock: Arc<dyn Clock>,
    ) -> Result<Self, StoreError> {
        Self::open(Box::new(TrailRepository::open(trail_dir, validate)?), clock)
    }

    /// An empty service backed by an in-memory log.
    #[must_use]
    pub fn in_memory(clock: Arc<dyn Clock>) -> Self {
        Self {
            store: NodeStore::new(),
            repo: Box::new(MemoryRepository::new()),
            clock,
            next_seq: 1,
        }
    }

    #[must_use]
    pub const fn store(&self) -> &NodeStore {
        &self.store
    }

    #[must_use]
    pub fn repository(&self) -> &dyn TreeRepository {
        self.repo.as_ref()
    }

    pub(crate) fn replace_store(&mut self, store: NodeStore) {
        self.store = store;
    }

    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// A fresh id for `kind` that is not already in the store.
    pub(crate) fn new_id(&self, kind: NodeKind) -> Result<String, StoreError> {
        for _ in 0..ID_ATTEMPTS {
            let id = generate_id(kind)?;
            if !self.store.contains(&id) {
                return Ok(id);
            }
        }
        Err(StoreError::InvalidState(format!(
            "could not allocate a unique {kind} id"
        )))
    }

    pub(crate) fn trail_op(
        &mut self,
        at: DateTime<Utc>,
        op: TrailOp,
        entity: NodeKind,
        id: &str,
        parent: Option<&str>,
        data: serde_json::Value,
    ) -> TrailOperation {
        let seq = self.next_seq;
        self.next_seq += 1;
        TrailOperation {
            v: TRAIL_VERSION,
            seq,
            ts: at.to_rfc3339_opts(SecondsFormat::Micros, true),
            op,
            entity,
            id: id.to_string(),
            parent: parent.map(String::from),
            data,
        }
    }

    /// Record then apply. Checks must already have passed.
    pub(crate) fn commit(&mut self, op: &TrailOperation) -> Result<Vec<String>, StoreError> {
        self.repo.record(op)?;
        self.store.apply(op).inspect_err(|e| {
            tracing::error!(op = %op.op, entity = %op.entity, id = %op.id, error = %e, "recorded operation failed to apply");
        })
    }

    /// Add a bare node under `parent`.
    pub(crate) fn create_node(
        &mut self,
        parent: Option<&str>,
        node: NodeData,
        at: DateTime<Utc>,
    ) -> Result<NodeData, StoreError> {
        let kind = node.kind();
        self.store.check_placement(parent, kind)?;
        if self.store.contains(node.id()) {
            return Err(StoreError::DuplicateId {
                id: node.id().to_string(),
            });
        }
        let ancestor = self.store.resolve_ancestor_window(parent)?;
        validate_node_dates(kind, &node.dates(), ancestor.as_ref()).inspect_err(|e| {
            tracing::warn!(%kind, parent, reason = %e, "create rejected");
        })?;

        let op = self.trail_op(at, TrailOp::Create, kind, node.id(), parent, node.body()?);
        self.commit(&op)?;
        tracing::debug!(%kind, id = node.id(), parent, "node created");
        Ok(node)
    }

    /// Apply a serialized patch to `id`. `dates` is the patch's new range, if
    /// it touches dates; it is checked against the nearest dated ancestor and
    /// against the nearest dated descendants.
    pub(crate) fn update_node(
        &mut self,
        kind: NodeKind,
        id: &str,
        patch: serde_json::Value,
        dates: Option<&DateRange>,
    ) -> Result<NodeData, StoreError> {
        self.store.require_kind(id, kind)?;
        if patch.as_object().is_some_and(serde_json::Map::is_empty) {
            return Ok(self.store.require(id)?.clone());
        }

        if let Some(dates) = dates {
            let ancestor = self.store.resolve_ancestor_window(self.store.parent(id))?;
            let frontier = self.store.dated_frontier(id)?;
            validate_node_dates(kind, dates, ancestor.as_ref())
                .and_then(|window| validate_ancestor_shrink(window.as_ref(), &frontier))
                .inspect_err(|e| {
                    tracing::warn!(%kind, id, reason = %e, "date edit rejected");
                })?;
        }

        let at = self.now();
        let op = self.trail_op(at, TrailOp::Update, kind, id, None, patch);
        self.commit(&op)?;
        tracing::debug!(%kind, id, "node updated");
        Ok(self.store.require(id)?.clone())
    }

    /// Delete `id` and its subtree.
    pub(crate) fn delete_node(&mut self, kind: NodeKind, id: &str) -> Result<DeleteResponse, StoreError> {
        self.store.require_kind(id, kind)?;
        let at = self.now();
        let op = self.trail_op(
            at,
            TrailOp::Delete,
            kind,
            id,
            None,
            serde_json::Value::Null,
        );
        let removed = self.commit(&op)?;
        tracing::debug!(%kind, id, removed = removed.len(), "subtree deleted");
        Ok(DeleteResponse {
            kind,
            id: id.to_string(),
            removed,
        })
    }

    /// Move `id` (with its subtree) under `new_parent`.
    ///
    /// A dated node must fit the new ancestor window. An undated node passes
    /// the check down to its nearest dated descendants.
    pub(crate) fn move_node(
        &mut self,
        kind: NodeKind,
        id: &str,
        new_parent: &str,
    ) -> Result<NodeData, StoreError> {
        let dates = self.store.require_kind(id, kind)?.dates();
        self.store.check_placement(Some(new_parent), kind)?;
        if self.store.would_cycle(id, new_parent)? {
            tracing::error!(%kind, id, target = new_parent, "move would create a cycle");
            return Err(StoreError::Cycle {
                id: id.to_string(),
                target: new_parent.to_string(),
            });
        }

        let ancestor = self.store.resolve_ancestor_window(Some(new_parent))?;
        let checked = if dates.window().is_some() {
            validate_node_dates(kind, &dates, ancestor.as_ref()).map(|_| ())
        } else {
            validate_ancestor_shrink(ancestor.as_ref(), &self.store.dated_frontier(id)?)
        };
        checked.inspect_err(|e| {
            tracing::warn!(%kind, id, target = new_parent, reason = %e, "move rejected");
        })?;

        let at = self.now();
        let op = self.trail_op(
            at,
            TrailOp::Move,
            kind,
            id,
            Some(new_parent),
            serde_json::Value::Null,
        );
        self.commit(&op)?;
        tracing::debug!(%kind, id, parent = new_parent, "node moved");
        Ok(self.store.require(id)?.clone())
    }

    /// Load a nested forest into an empty tree.
    ///
    /// The forest is validated in full (ids, kind pairings, dates) before
    /// anything is recorded. Each node is then recorded as a create in
    /// pre-order, the same sequence replay uses to rebuild it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` if the tree is not empty, or the first
    /// structural or date violation in `forest`.
    pub fn import_forest(&mut self, forest: Vec<Outcome>) -> Result<ImportResponse, StoreError> {
        if !self.store.is_empty() {
            return Err(StoreError::Validation(format!(
                "import requires an empty tree ({} nodes present)",
                self.store.len()
            )));
        }
        let outcomes = u32::try_from(forest.len()).unwrap_or(u32::MAX);
        let (store, placed) = NodeStore::from_forest(forest).inspect_err(|e| {
            tracing::warn!(error = %e, "import rejected");
        })?;

        let at = self.now();
        for (parent, node) in &placed {
            let op = self.trail_op(at, TrailOp::Create, node.kind(), node.id(), parent.as_deref(), node.body()?);
            self.repo.record(&op).inspect_err(|e| {
                tracing::error!(id = node.id(), error = %e, "import stopped part way through recording");
            })?;
        }
        self.store = store;

        let nodes = u32::try_from(placed.len()).unwrap_or(u32::MAX);
        tracing::info!(outcomes, nodes, "forest imported");
        Ok(ImportResponse { outcomes, nodes })
    }

    /// Direct children of `parent` with kind `kind`, in order.
    pub(crate) fn child_nodes(&self, parent: &str, kind: NodeKind) -> Result<Vec<NodeData>, StoreError> {
        self.store.require(parent)?;
        Ok(self
            .store
            .children(parent)
            .iter()
            .filter_map(|child| self.store.get(child))
            .filter(|node| node.kind() == kind)
            .cloned()
            .collect())
    }
}
