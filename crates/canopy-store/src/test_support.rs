//! Shared test utilities for canopy-store unit tests.

#[cfg(test)]
pub(crate) mod helpers {
    use std::path::PathBuf;
    use std::sync::Arc;

    use chrono::{DateTime, NaiveDate, TimeZone, Utc};

    use canopy_core::clock::FixedClock;
    use canopy_core::dates::{DateRange, Window};
    use canopy_core::entities::{Evidence, Opportunity, Outcome, Solution, Test};
    use canopy_core::enums::EvidenceQuality;

    use crate::node::NodeData;
    use crate::service::CanopyService;

    /// The instant every test service reports as "now".
    pub fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    /// In-memory service on a fixed clock.
    pub fn test_service() -> CanopyService {
        CanopyService::in_memory(Arc::new(FixedClock(fixed_now())))
    }

    /// Service writing a real JSONL trail to `trail_dir`.
    pub fn test_service_with_trail(trail_dir: PathBuf) -> CanopyService {
        CanopyService::open_trail(trail_dir, true, Arc::new(FixedClock(fixed_now()))).unwrap()
    }

    /// Outcome → opportunity → solution → test, all undated. Returns the test id.
    pub fn seeded_test(svc: &mut CanopyService) -> String {
        let out = svc.create_outcome("Outcome", None, DateRange::none()).unwrap();
        let opp = svc
            .create_opportunity(&out.id, "Opportunity", None, DateRange::none())
            .unwrap();
        let sol = svc
            .create_solution(&opp.id, "Solution", None, DateRange::none())
            .unwrap();
        svc.create_test(&sol.id, "Test", None, DateRange::none())
            .unwrap()
            .id
    }

    fn date((y, m, d): (i32, u32, u32)) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    pub fn window_of(start: (i32, u32, u32), end: (i32, u32, u32)) -> Option<Window> {
        Some(Window {
            start: date(start),
            end: date(end),
        })
    }

    pub fn window(start: (i32, u32, u32), end: (i32, u32, u32)) -> DateRange {
        DateRange::new(date(start), date(end))
    }

    fn range(window: Option<Window>) -> DateRange {
        window.map_or_else(DateRange::none, DateRange::from)
    }

    pub fn outcome(id: &str, window: Option<Window>) -> NodeData {
        NodeData::Outcome(Outcome {
            id: id.into(),
            title: id.into(),
            description: None,
            dates: range(window),
            created_at: fixed_now(),
            updated_at: fixed_now(),
            opportunities: Vec::new(),
        })
    }

    pub fn opportunity(id: &str, window: Option<Window>) -> NodeData {
        NodeData::Opportunity(Opportunity {
            id: id.into(),
            title: id.into(),
            description: None,
            dates: range(window),
            created_at: fixed_now(),
            updated_at: fixed_now(),
            opportunities: Vec::new(),
            solutions: Vec::new(),
        })
    }

    pub fn solution(id: &str, window: Option<Window>) -> NodeData {
        NodeData::Solution(Solution {
            id: id.into(),
            title: id.into(),
            description: None,
            dates: range(window),
            created_at: fixed_now(),
            updated_at: fixed_now(),
            solutions: Vec::new(),
            tests: Vec::new(),
        })
    }

    pub fn test_node(id: &str, window: Option<Window>) -> NodeData {
        NodeData::Test(Test {
            id: id.into(),
            title: id.into(),
            description: None,
            dates: range(window),
            decision: None,
            todo: None,
            created_at: Some(fixed_now()),
            updated_at: Some(fixed_now()),
            evidence: Vec::new(),
            kpis: Vec::new(),
        })
    }

    pub fn evidence(id: &str, test_id: &str) -> NodeData {
        NodeData::Evidence(Evidence {
            id: id.into(),
            test_id: test_id.into(),
            quality: EvidenceQuality::Medium,
            note: None,
            created_at: fixed_now(),
        })
    }
}
