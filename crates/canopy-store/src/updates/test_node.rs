//! Test update builder.

use serde::{Deserialize, Serialize};

use canopy_core::dates::DateRange;
use canopy_core::entities::{Test, TodoProgress};

use super::{DatedPatch, double_option};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dates: Option<DateRange>,
    /// Free-form decision text. Normalized only when scoring.
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub decision: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "double_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub todo: Option<Option<TodoProgress>>,
}

impl TestUpdate {
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.dates.is_none()
            && self.decision.is_none()
            && self.todo.is_none()
    }

    pub(crate) fn apply(&self, test: &mut Test) {
        if let Some(title) = &self.title {
            test.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            test.description.clone_from(description);
        }
        if let Some(dates) = self.dates {
            test.dates = dates;
        }
        if let Some(decision) = &self.decision {
            test.decision.clone_from(decision);
        }
        if let Some(todo) = self.todo {
            test.todo = todo;
        }
    }
}

impl DatedPatch for TestUpdate {
    fn dates(&self) -> Option<&DateRange> {
        self.dates.as_ref()
    }
}

pub struct TestUpdateBuilder(TestUpdate);

impl TestUpdateBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self(TestUpdate::default())
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.0.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: Option<String>) -> Self {
        self.0.description = Some(description);
        self
    }

    #[must_use]
    pub const fn dates(mut self, dates: DateRange) -> Self {
        self.0.dates = Some(dates);
        self
    }

    #[must_use]
    pub fn decision(mut self, decision: Option<String>) -> Self {
        self.0.decision = Some(decision);
        self
    }

    #[must_use]
    pub const fn todo(mut self, todo: Option<TodoProgress>) -> Self {
        self.0.todo = Some(todo);
        self
    }

    #[must_use]
    pub fn build(self) -> TestUpdate {
        self.0
    }
}

impl Default for TestUpdateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decision_and_todo_serialize() {
        let update = TestUpdateBuilder::new()
            .decision(Some("Kill".into()))
            .todo(Some(TodoProgress { done: 1, total: 4 }))
            .build();
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"decision": "Kill", "todo": {"done": 1, "total": 4}})
        );
    }

    #[test]
    fn clearing_decision_is_distinct_from_untouched() {
        let cleared: TestUpdate = serde_json::from_str(r#"{"decision": null}"#).unwrap();
        assert_eq!(cleared.decision, Some(None));

        let untouched: TestUpdate = serde_json::from_str("{}").unwrap();
        assert!(untouched.decision.is_none());
        assert!(untouched.is_empty());
    }
}
