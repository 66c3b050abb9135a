//! Arena node store.
//!
//! Nodes live in a flat map keyed by id. Each entry holds the node body, a
//! parent back-reference, and its ordered child ids, so parent lookup is a
//! single map hit and no walk needs the call stack. Every walk carries a
//! visited set and reports a loop as corruption instead of spinning.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};

use canopy_core::dates::{ChildWindow, Window, validate_node_dates};
use canopy_core::entities::Outcome;
use canopy_core::enums::{NodeKind, TrailOp};
use canopy_core::trail::{TRAIL_VERSION, TrailOperation};

use crate::error::StoreError;
use crate::node::NodeData;

#[derive(Debug, Clone)]
struct Entry {
    data: NodeData,
    parent: Option<String>,
    children: Vec<String>,
}

#[derive(Debug, Clone, Default)]
pub struct NodeStore {
    entries: HashMap<String, Entry>,
    roots: Vec<String>,
}

/// A node inserted by [`NodeStore::from_forest`], in insertion order.
pub type Placed = (Option<String>, NodeData);

impl NodeStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&NodeData> {
        self.entries.get(id).map(|entry| &entry.data)
    }

    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no node has this id.
    pub fn require(&self, id: &str) -> Result<&NodeData, StoreError> {
        self.get(id).ok_or_else(|| StoreError::not_found(id))
    }

    /// # Errors
    ///
    /// Returns `StoreError::NotFound` or `StoreError::WrongKind`.
    pub fn require_kind(&self, id: &str, kind: NodeKind) -> Result<&NodeData, StoreError> {
        let node = self.require(id)?;
        if node.kind() == kind {
            Ok(node)
        } else {
            Err(StoreError::WrongKind {
                id: id.to_string(),
                expected: kind,
                actual: node.kind(),
            })
        }
    }

    #[must_use]
    pub fn parent(&self, id: &str) -> Option<&str> {
        self.entries.get(id).and_then(|entry| entry.parent.as_deref())
    }

    /// Ordered child ids. Empty for leaves and unknown ids.
    #[must_use]
    pub fn children(&self, id: &str) -> &[String] {
        self.entries
            .get(id)
            .map_or(&[][..], |entry| entry.children.as_slice())
    }

    /// Outcome ids in creation order.
    #[must_use]
    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    /// Check that a node of kind `child` may hang under `parent`
    /// (`None` = top level, which only outcomes may occupy).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidParent` or `StoreError::NotFound`.
    pub fn check_placement(&self, parent: Option<&str>, child: NodeKind) -> Result<(), StoreError> {
        match parent {
            None if child == NodeKind::Outcome => Ok(()),
            None => Err(StoreError::InvalidParent {
                child,
                parent: "the top level".into(),
            }),
            Some(parent_id) => {
                let parent_kind = self.require(parent_id)?.kind();
                if parent_kind.can_contain(child) {
                    Ok(())
                } else {
                    Err(StoreError::InvalidParent {
                        child,
                        parent: format!("{parent_kind} {parent_id}"),
                    })
                }
            }
        }
    }

    /// Insert a bare node under `parent`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::DuplicateId`, `StoreError::InvalidParent`, or
    /// `StoreError::Validation` if the body still carries children or a leaf's
    /// `test_id` disagrees with its parent.
    pub fn insert(&mut self, parent: Option<&str>, data: NodeData) -> Result<(), StoreError> {
        let id = data.id().to_string();
        if self.entries.contains_key(&id) {
            return Err(StoreError::DuplicateId { id });
        }
        self.check_placement(parent, data.kind())?;

        let (data, nested) = data.split();
        if !nested.is_empty() {
            return Err(StoreError::Validation(format!(
                "{id} must be inserted without children"
            )));
        }
        let owner = match &data {
            NodeData::Evidence(e) => Some(e.test_id.as_str()),
            NodeData::Kpi(k) => Some(k.test_id.as_str()),
            _ => None,
        };
        if let Some(owner) = owner {
            if Some(owner) != parent {
                return Err(StoreError::Validation(format!(
                    "{id} belongs to test {owner}, not {}",
                    parent.unwrap_or("the top level")
                )));
            }
        }

        match parent {
            Some(parent_id) => {
                if let Some(entry) = self.entries.get_mut(parent_id) {
                    entry.children.push(id.clone());
                }
            }
            None => self.roots.push(id.clone()),
        }
        self.entries.insert(
            id,
            Entry {
                data,
                parent: parent.map(String::from),
                children: Vec::new(),
            },
        );
        Ok(())
    }

    /// Pre-order ids of the subtree rooted at `id`, including `id`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound`, or `StoreError::InvalidState` if a node
    /// is reached twice.
    pub fn subtree_ids(&self, id: &str) -> Result<Vec<String>, StoreError> {
        self.require(id)?;
        let mut seen = HashSet::new();
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                return Err(reached_twice(current));
            }
            order.push(current.to_string());
            stack.extend(self.children(current).iter().rev().map(String::as_str));
        }
        Ok(order)
    }

    /// Remove `id` and everything beneath it. Returns the removed ids in
    /// pre-order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` or a corruption error from the walk.
    pub fn remove_subtree(&mut self, id: &str) -> Result<Vec<String>, StoreError> {
        let removed = self.subtree_ids(id)?;
        self.detach(id);
        for removed_id in &removed {
            self.entries.remove(removed_id);
        }
        Ok(removed)
    }

    /// Move `id` to the end of `new_parent`'s children.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidParent` for a disallowed pairing and
    /// `StoreError::Cycle` if `new_parent` is `id` or one of its descendants.
    pub fn reparent(&mut self, id: &str, new_parent: &str) -> Result<(), StoreError> {
        let kind = self.require(id)?.kind();
        self.check_placement(Some(new_parent), kind)?;
        if self.would_cycle(id, new_parent)? {
            tracing::error!(node = id, target = new_parent, "rejected move that would create a cycle");
            return Err(StoreError::Cycle {
                id: id.to_string(),
                target: new_parent.to_string(),
            });
        }

        self.detach(id);
        if let Some(parent) = self.entries.get_mut(new_parent) {
            parent.children.push(id.to_string());
        }
        if let Some(entry) = self.entries.get_mut(id) {
            entry.parent = Some(new_parent.to_string());
        }
        Ok(())
    }

    fn detach(&mut self, id: &str) {
        let parent = self.entries.get(id).and_then(|entry| entry.parent.clone());
        match parent {
            Some(parent_id) => {
                if let Some(parent) = self.entries.get_mut(&parent_id) {
                    parent.children.retain(|child| child != id);
                }
            }
            None => self.roots.retain(|root| root != id),
        }
    }

    /// Whether hanging `node` under `start` would make it its own ancestor,
    /// i.e. `node` is `start` or one of `start`'s ancestors.
    pub(crate) fn would_cycle(&self, node: &str, start: &str) -> Result<bool, StoreError> {
        let mut seen = HashSet::new();
        let mut current = Some(start);
        while let Some(id) = current {
            if id == node {
                return Ok(true);
            }
            if !seen.insert(id) {
                return Err(reached_twice(id));
            }
            current = self.parent(id);
        }
        Ok(false)
    }

    /// The nearest complete window at or above `from`.
    ///
    /// Pass the *parent* of the node being validated. Partial and absent
    /// ranges are skipped.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown id, or
    /// `StoreError::InvalidState` if the parent chain loops.
    pub fn resolve_ancestor_window(&self, from: Option<&str>) -> Result<Option<Window>, StoreError> {
        let mut seen = HashSet::new();
        let mut current = from;
        while let Some(id) = current {
            if !seen.insert(id) {
                return Err(reached_twice(id));
            }
            let entry = self.entries.get(id).ok_or_else(|| StoreError::not_found(id))?;
            if let Some(window) = entry.data.dates().window() {
                return Ok(Some(window));
            }
            current = entry.parent.as_deref();
        }
        Ok(None)
    }

    /// The nearest dated descendants of `id`: the windows that would be
    /// constrained by whatever window sits above `id`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidState` if a node is reached twice.
    pub fn dated_frontier(&self, id: &str) -> Result<Vec<ChildWindow>, StoreError> {
        let mut seen = HashSet::new();
        let mut frontier = Vec::new();
        let mut stack: Vec<&str> = self.children(id).iter().rev().map(String::as_str).collect();
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                return Err(reached_twice(current));
            }
            let Some(node) = self.get(current) else {
                continue;
            };
            match child_window(node) {
                Some(window) => frontier.push(window),
                None => stack.extend(self.children(current).iter().rev().map(String::as_str)),
            }
        }
        Ok(frontier)
    }

    /// Rebuild the nested subtree rooted at `id`.
    ///
    /// Post-order over an explicit stack: each node is assembled after all of
    /// its children.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` or a corruption error.
    pub fn materialize(&self, id: &str) -> Result<NodeData, StoreError> {
        self.require(id)?;
        let mut built: HashMap<&str, NodeData> = HashMap::new();
        let mut seen = HashSet::new();
        let mut stack: Vec<(&str, bool)> = vec![(id, false)];

        while let Some((current, expanded)) = stack.pop() {
            let entry = self
                .entries
                .get(current)
                .ok_or_else(|| StoreError::not_found(current))?;
            if expanded {
                let mut node = entry.data.clone();
                for child in &entry.children {
                    let child_node = built.remove(child.as_str()).ok_or_else(|| {
                        StoreError::InvalidState(format!("child {child} of {current} was not built"))
                    })?;
                    node.attach(child_node)?;
                }
                built.insert(current, node);
            } else {
                if !seen.insert(current) {
                    return Err(reached_twice(current));
                }
                stack.push((current, true));
                stack.extend(entry.children.iter().rev().map(|child| (child.as_str(), false)));
            }
        }

        built
            .remove(id)
            .ok_or_else(|| StoreError::InvalidState(format!("{id} was not built")))
    }

    /// The whole tree as nested outcomes.
    ///
    /// # Errors
    ///
    /// Propagates corruption errors from [`Self::materialize`].
    pub fn forest(&self) -> Result<Vec<Outcome>, StoreError> {
        self.roots
            .iter()
            .map(|root| self.materialize(root)?.into_outcome())
            .collect()
    }

    /// Every node of `kind`, in tree pre-order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidState` if a node is reached twice.
    pub fn nodes_of_kind(&self, kind: NodeKind) -> Result<Vec<&NodeData>, StoreError> {
        let mut seen = HashSet::new();
        let mut found = Vec::new();
        let mut stack: Vec<&str> = self.roots.iter().rev().map(String::as_str).collect();
        while let Some(current) = stack.pop() {
            if !seen.insert(current) {
                return Err(reached_twice(current));
            }
            let Some(entry) = self.entries.get(current) else {
                continue;
            };
            if entry.data.kind() == kind {
                found.push(&entry.data);
            }
            stack.extend(entry.children.iter().rev().map(String::as_str));
        }
        Ok(found)
    }

    /// Apply one trail operation. Returns the ids it touched (for a delete,
    /// every removed id).
    ///
    /// Structural checks run here, so replay and live mutation reject the
    /// same things. Date coherence is checked by the service before an
    /// operation is recorded, not here.
    ///
    /// # Errors
    ///
    /// Returns `StoreError` for unsupported versions, malformed payloads, and
    /// any structural violation.
    pub fn apply(&mut self, op: &TrailOperation) -> Result<Vec<String>, StoreError> {
        if op.v != TRAIL_VERSION {
            return Err(StoreError::Trail(format!(
                "unsupported trail version {} for op {}",
                op.v, op.id
            )));
        }
        match op.op {
            TrailOp::Create => {
                let data = NodeData::from_body(op.entity, op.data.clone())?;
                if data.kind() != op.entity || data.id() != op.id {
                    return Err(StoreError::InvalidState(format!(
                        "create body {} does not match op {} {}",
                        data.id(),
                        op.entity,
                        op.id
                    )));
                }
                self.insert(op.parent.as_deref(), data)?;
                Ok(vec![op.id.clone()])
            }
            TrailOp::Update => {
                let touched_at = parse_ts(&op.ts)?;
                self.require_kind(&op.id, op.entity)?;
                let entry = self
                    .entries
                    .get_mut(&op.id)
                    .ok_or_else(|| StoreError::not_found(&op.id))?;
                entry.data.apply_update(&op.data, touched_at)?;
                Ok(vec![op.id.clone()])
            }
            TrailOp::Delete => {
                self.require_kind(&op.id, op.entity)?;
                self.remove_subtree(&op.id)
            }
            TrailOp::Move => {
                self.require_kind(&op.id, op.entity)?;
                let parent = op.parent.as_deref().ok_or_else(|| {
                    StoreError::InvalidState(format!("move of {} names no parent", op.id))
                })?;
                self.reparent(&op.id, parent)?;
                Ok(vec![op.id.clone()])
            }
        }
    }

    /// Build a store from a nested forest.
    ///
    /// Nodes are placed in pre-order, each checked for id uniqueness, kind
    /// pairing, and date containment against what is already placed. Returns
    /// the store and the `(parent, body)` list in insertion order, which is
    /// exactly the sequence of creates that reproduces it.
    ///
    /// # Errors
    ///
    /// Returns the first structural or date violation. Nothing is kept.
    pub fn from_forest(forest: Vec<Outcome>) -> Result<(Self, Vec<Placed>), StoreError> {
        let mut store = Self::new();
        let mut placed = Vec::new();
        let mut stack: Vec<Placed> = forest
            .into_iter()
            .rev()
            .map(|outcome| (None, NodeData::Outcome(outcome)))
            .collect();

        while let Some((parent, node)) = stack.pop() {
            let (body, children) = node.split();
            let id = body.id().to_string();
            let ancestor = store.resolve_ancestor_window(parent.as_deref())?;
            validate_node_dates(body.kind(), &body.dates(), ancestor.as_ref())?;
            store.insert(parent.as_deref(), body.clone())?;
            placed.push((parent, body));
            stack.extend(children.into_iter().rev().map(|child| (Some(id.clone()), child)));
        }

        Ok((store, placed))
    }
}

fn child_window(node: &NodeData) -> Option<ChildWindow> {
    node.dates().window().map(|window| ChildWindow {
        kind: node.kind(),
        id: node.id().to_string(),
        window,
    })
}

fn reached_twice(id: &str) -> StoreError {
    tracing::error!(node = id, "node reached twice while walking the tree");
    StoreError::InvalidState(format!("node {id} reached twice; the tree is corrupt"))
}

/// Parse a trail timestamp.
pub(crate) fn parse_ts(ts: &str) -> Result<DateTime<Utc>, StoreError> {
    DateTime::parse_from_rfc3339(ts)
        .map(|parsed| parsed.with_timezone(&Utc))
        .map_err(|e| StoreError::Trail(format!("bad timestamp '{ts}': {e}")))
}
