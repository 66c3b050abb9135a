//! Decision normalization.
//!
//! A test's `decision` is whatever the user typed. Only the three literal
//! tokens count, compared case-insensitively.

use canopy_core::entities::Test;
use canopy_core::enums::Decision;

/// Map a raw decision value to a `Decision`, or `None` for undecided.
#[must_use]
pub fn normalize(raw: Option<&str>) -> Option<Decision> {
    let raw = raw?;
    if raw.eq_ignore_ascii_case("pass") {
        Some(Decision::Pass)
    } else if raw.eq_ignore_ascii_case("iterate") {
        Some(Decision::Iterate)
    } else if raw.eq_ignore_ascii_case("kill") {
        Some(Decision::Kill)
    } else {
        None
    }
}

/// A test paired with its normalized decision.
#[derive(Debug, Clone, Copy)]
pub struct DecidedTest<'a> {
    pub test: &'a Test,
    pub decision: Decision,
}

/// Classify a test for scoring.
///
/// Returns `None` when the decision does not normalize, or when the test still
/// has open todo work: an open checklist suppresses a decision already set.
#[must_use]
pub fn decided(test: &Test) -> Option<DecidedTest<'_>> {
    if test.todo.is_some_and(|todo| todo.is_open()) {
        return None;
    }
    normalize(test.decision.as_deref()).map(|decision| DecidedTest { test, decision })
}

#[must_use]
pub fn is_decided(test: &Test) -> bool {
    decided(test).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_core::dates::DateRange;
    use canopy_core::entities::TodoProgress;
    use rstest::rstest;

    fn test_with(decision: Option<&str>, todo: Option<TodoProgress>) -> Test {
        Test {
            id: "tst-00000001".into(),
            title: "t".into(),
            description: None,
            dates: DateRange::none(),
            decision: decision.map(String::from),
            todo,
            created_at: None,
            updated_at: None,
            evidence: vec![],
            kpis: vec![],
        }
    }

    #[rstest]
    #[case("pass", Some(Decision::Pass))]
    #[case("PASS", Some(Decision::Pass))]
    #[case("Iterate", Some(Decision::Iterate))]
    #[case("kIlL", Some(Decision::Kill))]
    #[case("", None)]
    #[case("passed", None)]
    #[case(" pass", None)]
    #[case("maybe", None)]
    fn normalizes_literal_tokens(#[case] raw: &str, #[case] expected: Option<Decision>) {
        assert_eq!(normalize(Some(raw)), expected);
    }

    #[test]
    fn missing_value_is_undecided() {
        assert_eq!(normalize(None), None);
    }

    #[test]
    fn open_todo_suppresses_decision() {
        let test = test_with(Some("pass"), Some(TodoProgress { done: 1, total: 2 }));
        assert!(!is_decided(&test));
    }

    #[test]
    fn finished_todo_keeps_decision() {
        let test = test_with(Some("kill"), Some(TodoProgress { done: 2, total: 2 }));
        let d = decided(&test).unwrap();
        assert_eq!(d.decision, Decision::Kill);
    }

    #[test]
    fn empty_todo_list_is_not_open() {
        let test = test_with(Some("iterate"), Some(TodoProgress { done: 0, total: 0 }));
        assert!(is_decided(&test));
    }

    #[test]
    fn undecided_without_value() {
        assert!(!is_decided(&test_with(None, None)));
    }
}
