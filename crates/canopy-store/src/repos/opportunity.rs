//! Opportunity repository.
//!
//! Opportunities hang under an outcome or under another opportunity.

use canopy_core::dates::DateRange;
use canopy_core::entities::Opportunity;
use canopy_core::enums::NodeKind;
use canopy_core::responses::DeleteResponse;

use crate::error::StoreError;
use crate::node::NodeData;
use crate::service::CanopyService;
use crate::updates::NodeUpdate;

impl CanopyService {
    /// Create an opportunity under `parent_id` (an outcome or opportunity).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidParent` for any other parent kind and
    /// `StoreError::Date` if `dates` breaks containment.
    pub fn create_opportunity(
        &mut self,
        parent_id: &str,
        title: &str,
        description: Option<&str>,
        dates: DateRange,
    ) -> Result<Opportunity, StoreError> {
        let now = self.now();
        let opportunity = Opportunity {
            id: self.new_id(NodeKind::Opportunity)?,
            title: title.to_string(),
            description: description.map(String::from),
            dates,
            created_at: now,
            updated_at: now,
            opportunities: Vec::new(),
            solutions: Vec::new(),
        };
        self.create_node(Some(parent_id), NodeData::Opportunity(opportunity), now)?
            .into_opportunity()
    }

    /// # Errors
    ///
    /// Returns `StoreError::NotFound` or `StoreError::WrongKind`.
    pub fn get_opportunity(&self, id: &str) -> Result<Opportunity, StoreError> {
        self.store()
            .require_kind(id, NodeKind::Opportunity)?
            .clone()
            .into_opportunity()
    }

    /// Direct child opportunities of `parent_id`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown parent.
    pub fn list_opportunities(&self, parent_id: &str) -> Result<Vec<Opportunity>, StoreError> {
        self.child_nodes(parent_id, NodeKind::Opportunity)?
            .into_iter()
            .map(NodeData::into_opportunity)
            .collect()
    }

    /// # Errors
    ///
    /// Returns `StoreError::Date` if new dates break containment in either
    /// direction.
    pub fn update_opportunity(
        &mut self,
        id: &str,
        update: &NodeUpdate,
    ) -> Result<Opportunity, StoreError> {
        self.patch_dated(NodeKind::Opportunity, id, update)?
            .into_opportunity()
    }

    /// # Errors
    ///
    /// Returns `StoreError::NotFound` or `StoreError::WrongKind`.
    pub fn delete_opportunity(&mut self, id: &str) -> Result<DeleteResponse, StoreError> {
        self.delete_node(NodeKind::Opportunity, id)
    }

    /// Re-hang the opportunity (and its subtree) under `new_parent`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Cycle` if `new_parent` lies inside the subtree.
    pub fn move_opportunity(&mut self, id: &str, new_parent: &str) -> Result<Opportunity, StoreError> {
        self.move_node(NodeKind::Opportunity, id, new_parent)?
            .into_opportunity()
    }
}

#[cfg(test)]
mod tests {
    use crate::error::StoreError;
    use crate::test_support::helpers::{test_service, window};
    use crate::updates::NodeUpdateBuilder;
    use canopy_core::dates::DateRange;

    #[test]
    fn nests_under_outcome_and_opportunity() {
        let mut svc = test_service();
        let out = svc.create_outcome("Root", None, DateRange::none()).unwrap();
        let outer = svc
            .create_opportunity(&out.id, "Outer", None, DateRange::none())
            .unwrap();
        let inner = svc
            .create_opportunity(&outer.id, "Inner", None, DateRange::none())
            .unwrap();

        let listed = svc.list_opportunities(&outer.id).unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].id, inner.id);
        assert_eq!(svc.store().parent(&inner.id), Some(outer.id.as_str()));
    }

    #[test]
    fn child_window_must_fit_parent() {
        let mut svc = test_service();
        let out = svc
            .create_outcome("Root", None, window((2026, 1, 1), (2026, 6, 30)))
            .unwrap();
        let err = svc
            .create_opportunity(&out.id, "Late", None, window((2026, 2, 1), (2026, 7, 15)))
            .unwrap_err();
        assert_eq!(err.to_string(), "end must be within parent period");

        let err = svc
            .create_opportunity(&out.id, "Early", None, window((2025, 12, 1), (2026, 2, 1)))
            .unwrap_err();
        assert_eq!(err.to_string(), "start must be within parent period");
    }

    #[test]
    fn shrinking_parent_past_child_is_rejected() {
        let mut svc = test_service();
        let out = svc.create_outcome("Root", None, DateRange::none()).unwrap();
        let opp = svc
            .create_opportunity(&out.id, "Parent", None, window((2026, 1, 1), (2026, 12, 31)))
            .unwrap();
        let child = svc
            .create_opportunity(&opp.id, "Child", None, window((2026, 3, 1), (2026, 6, 1)))
            .unwrap();

        let update = NodeUpdateBuilder::new()
            .dates(window((2026, 4, 1), (2026, 12, 31)))
            .build();
        let err = svc.update_opportunity(&opp.id, &update).unwrap_err();
        match err {
            StoreError::Date(e) => assert!(e.is_shrink_conflict()),
            other => panic!("expected shrink conflict, got {other}"),
        }
        assert_eq!(svc.get_opportunity(&opp.id).unwrap().dates, opp.dates);
        assert_eq!(svc.get_opportunity(&child.id).unwrap().dates, child.dates);
    }

    #[test]
    fn move_into_own_subtree_is_a_cycle() {
        let mut svc = test_service();
        let out = svc.create_outcome("Root", None, DateRange::none()).unwrap();
        let outer = svc
            .create_opportunity(&out.id, "Outer", None, DateRange::none())
            .unwrap();
        let inner = svc
            .create_opportunity(&outer.id, "Inner", None, DateRange::none())
            .unwrap();

        let err = svc.move_opportunity(&outer.id, &inner.id).unwrap_err();
        assert!(matches!(err, StoreError::Cycle { .. }));
        assert_eq!(svc.store().parent(&inner.id), Some(outer.id.as_str()));
    }

    #[test]
    fn move_to_another_outcome() {
        let mut svc = test_service();
        let a = svc.create_outcome("A", None, DateRange::none()).unwrap();
        let b = svc.create_outcome("B", None, DateRange::none()).unwrap();
        let opp = svc
            .create_opportunity(&a.id, "Moving", None, DateRange::none())
            .unwrap();

        svc.move_opportunity(&opp.id, &b.id).unwrap();
        assert_eq!(svc.store().parent(&opp.id), Some(b.id.as_str()));
        assert!(svc.list_opportunities(&a.id).unwrap().is_empty());
    }
}
