use chrono::{DateTime, Utc};
use serde::Serialize;

use canopy_confidence::{ConfidenceReport, ScoreResult};

use crate::cli::GlobalFlags;
use crate::cli::root_commands::ConfidenceArgs;
use crate::context::AppContext;
use crate::output::output_with_rows;

#[derive(Debug, Serialize)]
struct NodeConfidence {
    id: String,
    computed_at: DateTime<Utc>,
    #[serde(flatten)]
    result: ScoreResult,
}

#[derive(Debug, Serialize)]
struct ConfidenceRow {
    node: String,
    score: String,
    level: String,
    decided: u32,
    explanation: String,
}

/// Handle `cnp confidence`.
pub fn handle(args: &ConfidenceArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let now = ctx.scoring_now(args.now.as_deref())?;

    if let Some(id) = &args.node {
        let response = NodeConfidence {
            id: id.clone(),
            computed_at: now,
            result: ctx.service.node_confidence(id, now)?,
        };
        let rows = || vec![row(id.clone(), &response.result)];
        return output_with_rows(&response, rows, flags.format);
    }

    let report = ctx.service.confidence_report(now)?;
    output_with_rows(&report, || report_rows(&report), flags.format)
}

fn row(node: String, result: &ScoreResult) -> ConfidenceRow {
    ConfidenceRow {
        node,
        score: format!("{:.1}", result.score),
        level: result.level.to_string(),
        decided: result.decided,
        explanation: result.explanation.clone(),
    }
}

fn report_rows(report: &ConfidenceReport) -> Vec<ConfidenceRow> {
    let mut rows: Vec<ConfidenceRow> = report
        .results
        .iter()
        .map(|(key, result)| row(key.clone(), result))
        .collect();
    rows.push(ConfidenceRow {
        node: String::from("overall"),
        score: format!("{:.1}", report.overall.score),
        level: report.overall.level.to_string(),
        decided: 0,
        explanation: format!("average of {} outcome(s)", report.overall.children),
    });
    rows
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use canopy_core::clock::SystemClock;
    use canopy_core::dates::DateRange;
    use canopy_store::CanopyService;

    use super::*;

    #[test]
    fn rows_end_with_overall() {
        let mut svc = CanopyService::in_memory(Arc::new(SystemClock));
        let out = svc.create_outcome("Retention", None, DateRange::none()).unwrap();
        svc.create_opportunity(&out.id, "Onboarding", None, DateRange::none())
            .unwrap();

        let report = svc.confidence_report(svc.now()).unwrap();
        let rows = report_rows(&report);

        assert_eq!(rows.len(), 3);
        assert!(rows[0].node.starts_with("opportunity:"));
        assert!(rows[1].node.starts_with("outcome:"));
        assert_eq!(rows[2].node, "overall");
        assert_eq!(rows[2].score, "50.0");
        assert_eq!(rows[2].level, "medium");
    }
}
