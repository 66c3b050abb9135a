//! Serde roundtrip and JsonSchema validation tests for the node types.

use chrono::{NaiveDate, TimeZone, Utc};
use schemars::schema_for;
use canopy_core::dates::DateRange;
use canopy_core::entities::*;
use canopy_core::enums::*;
use canopy_core::responses::*;
use canopy_core::trail::TrailOperation;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn ts() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 9, 14, 30, 0).unwrap()
}

fn q1() -> DateRange {
    DateRange::new(
        NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
    )
}

fn sample_test() -> Test {
    Test {
        id: "tst-a3f8b2c1".into(),
        title: "Fake-door pricing page".into(),
        description: None,
        dates: DateRange::none(),
        decision: Some("Pass".into()),
        todo: Some(TodoProgress { done: 2, total: 2 }),
        created_at: Some(ts()),
        updated_at: None,
        evidence: vec![Evidence {
            id: "evd-00000001".into(),
            test_id: "tst-a3f8b2c1".into(),
            quality: EvidenceQuality::High,
            note: Some("12% click-through".into()),
            created_at: ts(),
        }],
        kpis: vec![Kpi {
            id: "kpi-00000001".into(),
            test_id: "tst-a3f8b2c1".into(),
            name: "click-through".into(),
            current: Some(12.0),
            target: Some(10.0),
            unit: Some("%".into()),
        }],
    }
}

roundtrip_and_validate!(test_roundtrip, Test, sample_test());

roundtrip_and_validate!(
    outcome_nested_roundtrip,
    Outcome,
    Outcome {
        id: "out-00000001".into(),
        title: "Grow activation".into(),
        description: Some("Raise week-one activation to 40%".into()),
        dates: q1(),
        created_at: ts(),
        updated_at: ts(),
        opportunities: vec![Opportunity {
            id: "opp-00000001".into(),
            title: "Setup feels long".into(),
            description: None,
            dates: DateRange::none(),
            created_at: ts(),
            updated_at: ts(),
            opportunities: vec![],
            solutions: vec![Solution {
                id: "sol-00000001".into(),
                title: "Guided setup".into(),
                description: None,
                dates: DateRange::none(),
                created_at: ts(),
                updated_at: ts(),
                solutions: vec![],
                tests: vec![sample_test()],
            }],
        }],
    }
);

roundtrip_and_validate!(
    trail_operation_roundtrip,
    TrailOperation,
    TrailOperation {
        v: 1,
        seq: 3,
        ts: "2026-02-09T14:30:00.000000Z".into(),
        op: TrailOp::Move,
        entity: NodeKind::Solution,
        id: "sol-00000001".into(),
        parent: Some("opp-00000002".into()),
        data: serde_json::Value::Null,
    }
);

roundtrip_and_validate!(
    rebuild_response_roundtrip,
    RebuildResponse,
    RebuildResponse {
        rebuilt: true,
        trail_files: 2,
        operations_replayed: 14,
        nodes_created: 9,
        duration_ms: 3,
    }
);

roundtrip_and_validate!(
    delete_response_roundtrip,
    DeleteResponse,
    DeleteResponse {
        kind: NodeKind::Opportunity,
        id: "opp-00000001".into(),
        removed: vec!["opp-00000001".into(), "sol-00000001".into()],
    }
);

#[test]
fn missing_collections_deserialize_as_empty() {
    let json = serde_json::json!({
        "id": "opp-00000009",
        "title": "Bare",
        "created_at": "2026-02-09T14:30:00Z",
        "updated_at": "2026-02-09T14:30:00Z"
    });
    let opp: Opportunity = serde_json::from_value(json).unwrap();
    assert!(opp.opportunities.is_empty());
    assert!(opp.solutions.is_empty());
    assert!(opp.dates.is_empty());
}

#[test]
fn test_without_timestamps_deserializes() {
    let json = serde_json::json!({ "id": "tst-00000009", "title": "Legacy" });
    let test: Test = serde_json::from_value(json).unwrap();
    assert!(test.created_at.is_none());
    assert!(test.updated_at.is_none());
    assert!(test.decision.is_none());
    assert!(test.evidence.is_empty());
}
