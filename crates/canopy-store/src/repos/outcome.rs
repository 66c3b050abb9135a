//! Outcome repository: the roots of the discovery tree.

use canopy_core::dates::DateRange;
use canopy_core::entities::Outcome;
use canopy_core::enums::NodeKind;
use canopy_core::responses::DeleteResponse;

use crate::error::StoreError;
use crate::node::NodeData;
use crate::service::CanopyService;
use crate::updates::NodeUpdate;

impl CanopyService {
    /// # Errors
    ///
    /// Returns `StoreError::Date` if `dates` is malformed.
    pub fn create_outcome(
        &mut self,
        title: &str,
        description: Option<&str>,
        dates: DateRange,
    ) -> Result<Outcome, StoreError> {
        let now = self.now();
        let outcome = Outcome {
            id: self.new_id(NodeKind::Outcome)?,
            title: title.to_string(),
            description: description.map(String::from),
            dates,
            created_at: now,
            updated_at: now,
            opportunities: Vec::new(),
        };
        self.create_node(None, NodeData::Outcome(outcome), now)?
            .into_outcome()
    }

    /// The bare outcome, without its opportunities.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` or `StoreError::WrongKind`.
    pub fn get_outcome(&self, id: &str) -> Result<Outcome, StoreError> {
        self.store()
            .require_kind(id, NodeKind::Outcome)?
            .clone()
            .into_outcome()
    }

    /// Every outcome, bare, in creation order.
    #[must_use]
    pub fn list_outcomes(&self) -> Vec<Outcome> {
        self.store()
            .roots()
            .iter()
            .filter_map(|id| self.store().get(id))
            .filter_map(|node| node.clone().into_outcome().ok())
            .collect()
    }

    /// # Errors
    ///
    /// Returns `StoreError::Date` if new dates are malformed or would leave an
    /// opportunity outside the outcome's window.
    pub fn update_outcome(&mut self, id: &str, update: &NodeUpdate) -> Result<Outcome, StoreError> {
        self.patch_dated(NodeKind::Outcome, id, update)?.into_outcome()
    }

    /// Delete the outcome and everything beneath it.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` or `StoreError::WrongKind`.
    pub fn delete_outcome(&mut self, id: &str) -> Result<DeleteResponse, StoreError> {
        self.delete_node(NodeKind::Outcome, id)
    }
}

#[cfg(test)]
mod tests {
    use crate::test_support::helpers::{test_service, window};
    use crate::updates::NodeUpdateBuilder;
    use canopy_core::dates::DateRange;

    #[test]
    fn create_and_get() {
        let mut svc = test_service();
        let outcome = svc
            .create_outcome("Grow activation", Some("Q1 goal"), DateRange::none())
            .unwrap();
        assert!(outcome.id.starts_with("out-"));
        assert_eq!(outcome.created_at, svc.now());

        let fetched = svc.get_outcome(&outcome.id).unwrap();
        assert_eq!(fetched, outcome);
        assert_eq!(svc.list_outcomes().len(), 1);
    }

    #[test]
    fn get_rejects_other_kinds() {
        let mut svc = test_service();
        let outcome = svc.create_outcome("Root", None, DateRange::none()).unwrap();
        let opp = svc
            .create_opportunity(&outcome.id, "Users drop at signup", None, DateRange::none())
            .unwrap();
        assert!(svc.get_outcome(&opp.id).is_err());
    }

    #[test]
    fn update_title_keeps_dates() {
        let mut svc = test_service();
        let outcome = svc
            .create_outcome("Before", None, window((2026, 1, 1), (2026, 12, 31)))
            .unwrap();
        let updated = svc
            .update_outcome(&outcome.id, &NodeUpdateBuilder::new().title("After").build())
            .unwrap();
        assert_eq!(updated.title, "After");
        assert_eq!(updated.dates, outcome.dates);
    }

    #[test]
    fn one_sided_dates_rejected_on_create() {
        let mut svc = test_service();
        let mut dates = window((2026, 1, 1), (2026, 2, 1));
        dates.end = None;
        let err = svc.create_outcome("Half", None, dates).unwrap_err();
        assert_eq!(err.to_string(), "both dates required together");
        assert!(svc.store().is_empty());
    }
}
