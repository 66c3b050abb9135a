//! Test repository: experiments attached to solutions, plus decision and
//! todo bookkeeping.

use canopy_core::dates::DateRange;
use canopy_core::entities::{Test, TodoProgress};
use canopy_core::enums::{Decision, NodeKind};
use canopy_core::responses::DeleteResponse;

use crate::error::StoreError;
use crate::node::NodeData;
use crate::service::CanopyService;
use crate::updates::{TestUpdate, TestUpdateBuilder};

impl CanopyService {
    /// Create an undecided test under `solution_id`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidParent` unless the parent is a solution and
    /// `StoreError::Date` if `dates` breaks containment.
    pub fn create_test(
        &mut self,
        solution_id: &str,
        title: &str,
        description: Option<&str>,
        dates: DateRange,
    ) -> Result<Test, StoreError> {
        let now = self.now();
        let test = Test {
            id: self.new_id(NodeKind::Test)?,
            title: title.to_string(),
            description: description.map(String::from),
            dates,
            decision: None,
            todo: None,
            created_at: Some(now),
            updated_at: Some(now),
            evidence: Vec::new(),
            kpis: Vec::new(),
        };
        self.create_node(Some(solution_id), NodeData::Test(test), now)?
            .into_test()
    }

    /// The test without its evidence and KPIs.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` or `StoreError::WrongKind`.
    pub fn get_test(&self, id: &str) -> Result<Test, StoreError> {
        self.store()
            .require_kind(id, NodeKind::Test)?
            .clone()
            .into_test()
    }

    /// # Errors
    ///
    /// Returns `StoreError::NotFound` for an unknown solution.
    pub fn list_tests(&self, solution_id: &str) -> Result<Vec<Test>, StoreError> {
        self.child_nodes(solution_id, NodeKind::Test)?
            .into_iter()
            .map(NodeData::into_test)
            .collect()
    }

    /// # Errors
    ///
    /// Returns `StoreError::Date` if new dates break containment.
    pub fn update_test(&mut self, id: &str, update: &TestUpdate) -> Result<Test, StoreError> {
        self.patch_dated(NodeKind::Test, id, update)?.into_test()
    }

    /// Record the test's decision.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` or `StoreError::WrongKind`.
    pub fn log_decision(&mut self, id: &str, decision: Decision) -> Result<Test, StoreError> {
        let update = TestUpdateBuilder::new()
            .decision(Some(decision.as_str().to_string()))
            .build();
        let test = self.update_test(id, &update)?;
        tracing::info!(test = id, %decision, "decision logged");
        Ok(test)
    }

    /// Record todo progress. A test with open todo items is not scored.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Validation` if `done` exceeds `total`.
    pub fn set_todo_progress(&mut self, id: &str, done: u32, total: u32) -> Result<Test, StoreError> {
        if done > total {
            return Err(StoreError::Validation(format!(
                "todo done ({done}) cannot exceed total ({total})"
            )));
        }
        let update = TestUpdateBuilder::new()
            .todo(Some(TodoProgress { done, total }))
            .build();
        self.update_test(id, &update)
    }

    /// # Errors
    ///
    /// Returns `StoreError::NotFound` or `StoreError::WrongKind`.
    pub fn delete_test(&mut self, id: &str) -> Result<DeleteResponse, StoreError> {
        self.delete_node(NodeKind::Test, id)
    }

    /// # Errors
    ///
    /// Returns `StoreError::InvalidParent` unless `new_solution` is a solution.
    pub fn move_test(&mut self, id: &str, new_solution: &str) -> Result<Test, StoreError> {
        self.move_node(NodeKind::Test, id, new_solution)?.into_test()
    }
}
