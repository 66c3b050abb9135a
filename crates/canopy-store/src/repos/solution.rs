//! Solution repository.
//!
//! Solutions hang under an opportunity or under another solution.

use canopy_core::dates::DateRange;
use canopy_core::entities::Solution;
use canopy_core::enums::NodeKind;
use canopy_core::responses::DeleteResponse;

use crate::error::StoreError;
use crate::node::NodeData;
use crate::service::CanopyService;
use crate::updates::NodeUpdate;

impl CanopyService {
    /// Create a solution under `parent_id` (an opportunity or solution).
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidParent` for any other parent kind and
    /// `StoreError::Date` if `dates` breaks containment.
    pub fn create_solution(
        &mut self,
        parent_id: &str,
        title: &str,
        description: Option<&str>,
        dates: DateRange,
    ) -> Result<Solution, StoreError> {
        let now = self.now();
        let solution = Solution {
            id: self.new_id(NodeKind::Solution)?,
            title: title.to_string(),
            description: description.map(String::from),
            dates,
            created_at: now,
            updated_at: now,
            solutions: Vec::new(),
            tests: Vec::new(),
        };
        self.create_node(Some(parent_id), NodeData::Solution(solution), now)?
            .into_solution()
    }

    /// # Errors
    ///
    /// Returns `StoreError::NotFound` or `StoreError::WrongKind`.
    pub fn get_solution(&self, id: &str) -> Result<Solution, StoreError> {
        self.store()
            .require_kind(id, NodeKind::Solution)?
            .clone()
            .into_solution()
    }

    /// Direct child solutions of `parent_id`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown parent.
    pub fn list_solutions(&self, parent_id: &str) -> Result<Vec<Solution>, StoreError> {
        self.child_nodes(parent_id, NodeKind::Solution)?
            .into_iter()
            .map(NodeData::into_solution)
            .collect()
    }

    /// # Errors
    ///
    /// Returns `StoreError::Date` if new dates break containment in either
    /// direction.
    pub fn update_solution(&mut self, id: &str, update: &NodeUpdate) -> Result<Solution, StoreError> {
        self.patch_dated(NodeKind::Solution, id, update)?
            .into_solution()
    }

    /// # Errors
    ///
    /// Returns `StoreError::NotFound` or `StoreError::WrongKind`.
    pub fn delete_solution(&mut self, id: &str) -> Result<DeleteResponse, StoreError> {
        self.delete_node(NodeKind::Solution, id)
    }

    /// # Errors
    ///
    /// Returns `StoreError::Cycle`, `StoreError::InvalidParent`, or
    /// `StoreError::Date` if the solution does not fit under `new_parent`.
    pub fn move_solution(&mut self, id: &str, new_parent: &str) -> Result<Solution, StoreError> {
        self.move_node(NodeKind::Solution, id, new_parent)?
            .into_solution()
    }
}

#[cfg(test)]
mod tests {
    use crate::error::StoreError;
    use crate::test_support::helpers::{test_service, window};
    use canopy_core::dates::DateRange;

    #[test]
    fn solution_cannot_hang_under_outcome() {
        let mut svc = test_service();
        let out = svc.create_outcome("Root", None, DateRange::none()).unwrap();
        let err = svc
            .create_solution(&out.id, "Misplaced", None, DateRange::none())
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidParent { .. }));
    }

    #[test]
    fn window_checked_against_nearest_dated_ancestor() {
        let mut svc = test_service();
        let out = svc
            .create_outcome("Root", None, window((2026, 1, 1), (2026, 3, 31)))
            .unwrap();
        let opp = svc
            .create_opportunity(&out.id, "Undated", None, DateRange::none())
            .unwrap();
        let err = svc
            .create_solution(&opp.id, "Too late", None, window((2026, 3, 1), (2026, 4, 30)))
            .unwrap_err();
        assert_eq!(err.to_string(), "end must be within parent period");

        let ok = svc
            .create_solution(&opp.id, "Fits", None, window((2026, 2, 1), (2026, 3, 1)))
            .unwrap();
        assert_eq!(svc.list_solutions(&opp.id).unwrap()[0].id, ok.id);
    }

    #[test]
    fn dated_move_must_fit_new_window() {
        let mut svc = test_service();
        let out = svc.create_outcome("Root", None, DateRange::none()).unwrap();
        let wide = svc
            .create_opportunity(&out.id, "Wide", None, window((2026, 1, 1), (2026, 12, 31)))
            .unwrap();
        let narrow = svc
            .create_opportunity(&out.id, "Narrow", None, window((2026, 1, 1), (2026, 2, 28)))
            .unwrap();
        let sol = svc
            .create_solution(&wide.id, "Summer", None, window((2026, 6, 1), (2026, 8, 31)))
            .unwrap();

        let err = svc.move_solution(&sol.id, &narrow.id).unwrap_err();
        assert_eq!(err.to_string(), "end must be within parent period");
        assert_eq!(svc.store().parent(&sol.id), Some(wide.id.as_str()));
    }

    #[test]
    fn undated_move_checks_dated_descendants() {
        let mut svc = test_service();
        let out = svc.create_outcome("Root", None, DateRange::none()).unwrap();
        let open = svc
            .create_opportunity(&out.id, "Open", None, DateRange::none())
            .unwrap();
        let narrow = svc
            .create_opportunity(&out.id, "Narrow", None, window((2026, 1, 1), (2026, 2, 28)))
            .unwrap();
        let outer = svc
            .create_solution(&open.id, "Undated", None, DateRange::none())
            .unwrap();
        svc.create_solution(&outer.id, "Autumn", None, window((2026, 9, 1), (2026, 10, 31)))
            .unwrap();

        let err = svc.move_solution(&outer.id, &narrow.id).unwrap_err();
        match err {
            StoreError::Date(e) => assert!(e.is_shrink_conflict()),
            other => panic!("expected shrink conflict, got {other}"),
        }
    }

    #[test]
    fn delete_cascades_to_tests() {
        let mut svc = test_service();
        let out = svc.create_outcome("Root", None, DateRange::none()).unwrap();
        let opp = svc
            .create_opportunity(&out.id, "Opp", None, DateRange::none())
            .unwrap();
        let sol = svc
            .create_solution(&opp.id, "Sol", None, DateRange::none())
            .unwrap();
        let test = svc
            .create_test(&sol.id, "Smoke", None, DateRange::none())
            .unwrap();

        let resp = svc.delete_solution(&sol.id).unwrap();
        assert_eq!(resp.removed, vec![sol.id.clone(), test.id.clone()]);
        assert!(svc.get_test(&test.id).is_err());
    }
}
