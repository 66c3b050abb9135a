//! Read-only views over the whole tree.

use canopy_core::entities::Outcome;
use canopy_core::enums::NodeKind;

use crate::error::StoreError;
use crate::node::NodeData;
use crate::service::CanopyService;

impl CanopyService {
    /// The full tree as nested outcomes.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidState` if the arena is corrupt.
    pub fn forest(&self) -> Result<Vec<Outcome>, StoreError> {
        self.store().forest()
    }

    /// The nested subtree rooted at `id`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown id.
    pub fn subtree(&self, id: &str) -> Result<NodeData, StoreError> {
        self.store().materialize(id)
    }

    /// Bare direct children of `id`, in order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown id.
    pub fn children_of(&self, id: &str) -> Result<Vec<NodeData>, StoreError> {
        self.store().require(id)?;
        Ok(self
            .store()
            .children(id)
            .iter()
            .filter_map(|child| self.store().get(child))
            .cloned()
            .collect())
    }

    /// Up to `limit` bare nodes of `kind`, in tree order.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidState` if the arena is corrupt.
    pub fn list_nodes(&self, kind: NodeKind, limit: usize) -> Result<Vec<NodeData>, StoreError> {
        Ok(self
            .store()
            .nodes_of_kind(kind)?
            .into_iter()
            .take(limit)
            .cloned()
            .collect())
    }

    /// Ids from the root down to `id`, inclusive.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown id.
    pub fn path_to(&self, id: &str) -> Result<Vec<String>, StoreError> {
        self.store().require(id)?;
        let mut path = vec![id.to_string()];
        let mut current = self.store().parent(id);
        while let Some(parent) = current {
            if path.iter().any(|seen| seen == parent) {
                return Err(StoreError::InvalidState(format!("parent chain of {id} loops")));
            }
            path.push(parent.to_string());
            current = self.store().parent(parent);
        }
        path.reverse();
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::helpers::{seeded_test, test_service};
    use canopy_core::enums::{EvidenceQuality, NodeKind};

    #[test]
    fn forest_nests_everything() {
        let mut svc = test_service();
        let test_id = seeded_test(&mut svc);
        svc.add_evidence(&test_id, EvidenceQuality::High, None).unwrap();

        let forest = svc.forest().unwrap();
        assert_eq!(forest.len(), 1);
        let test = &forest[0].opportunities[0].solutions[0].tests[0];
        assert_eq!(test.id, test_id);
        assert_eq!(test.evidence.len(), 1);
    }

    #[test]
    fn path_runs_root_first() {
        let mut svc = test_service();
        let test_id = seeded_test(&mut svc);
        let path = svc.path_to(&test_id).unwrap();
        assert_eq!(path.len(), 4);
        assert!(path[0].starts_with("out-"));
        assert_eq!(path[3], test_id);
    }

    #[test]
    fn list_nodes_respects_limit() {
        let mut svc = test_service();
        let test_id = seeded_test(&mut svc);
        let sol = svc.store().parent(&test_id).unwrap().to_string();
        for title in ["b", "c", "d"] {
            svc.create_test(&sol, title, None, canopy_core::dates::DateRange::none())
                .unwrap();
        }
        assert_eq!(svc.list_nodes(NodeKind::Test, 2).unwrap().len(), 2);
        assert_eq!(svc.list_nodes(NodeKind::Test, 20).unwrap().len(), 4);
        assert_eq!(svc.children_of(&sol).unwrap().len(), 4);
    }
}
