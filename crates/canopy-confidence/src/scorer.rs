//! Per-node confidence scoring.
//!
//! Each decided test contributes `weight × evidence × recency`. The mean
//! contribution maps onto 0–100 around a neutral 50, a small bonus rewards
//! larger samples, and a level is read off the result with a kill override.
//!
//! The constants below are the scoring law; changing any of them changes every
//! stored score's meaning.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use canopy_core::entities::Evidence;
use canopy_core::enums::{ConfidenceLevel, Decision, EvidenceQuality};

use crate::decision::DecidedTest;

const NEUTRAL_SCORE: f64 = 50.0;
const SCORE_SPAN: f64 = 50.0;
const SAMPLE_BONUS_PER_TEST: f64 = 3.0;
const SAMPLE_BONUS_CAP: f64 = 12.0;
const NO_EVIDENCE_MULTIPLIER: f64 = 0.6;
const FRESH_DAYS: f64 = 14.0;
const RECENT_DAYS: f64 = 45.0;
const HIGH_THRESHOLD: f64 = 70.0;
const MEDIUM_THRESHOLD: f64 = 40.0;
const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Raw decision tallies, kept for explainability.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct DecisionCounts {
    pub pass: u32,
    pub iterate: u32,
    pub kill: u32,
}

impl DecisionCounts {
    fn record(&mut self, decision: Decision) {
        match decision {
            Decision::Pass => self.pass += 1,
            Decision::Iterate => self.iterate += 1,
            Decision::Kill => self.kill += 1,
        }
    }
}

/// Confidence for one node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScoreResult {
    pub score: f64,
    pub level: ConfidenceLevel,
    pub counts: DecisionCounts,
    pub decided: u32,
    pub explanation: String,
}

/// Which step of the level ladder decided the level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelRule {
    KillWithoutPass,
    RepeatedKills,
    Band,
}

#[must_use]
pub const fn decision_weight(decision: Decision) -> f64 {
    match decision {
        Decision::Pass => 1.0,
        Decision::Iterate => 0.3,
        Decision::Kill => -1.0,
    }
}

#[must_use]
pub const fn quality_weight(quality: EvidenceQuality) -> f64 {
    match quality {
        EvidenceQuality::High => 1.2,
        EvidenceQuality::Medium => 1.0,
        EvidenceQuality::Low => 0.8,
    }
}

/// Mean quality weight over the evidence, or 0.6 with none.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn evidence_multiplier(evidence: &[Evidence]) -> f64 {
    if evidence.is_empty() {
        return NO_EVIDENCE_MULTIPLIER;
    }
    let total: f64 = evidence.iter().map(|e| quality_weight(e.quality)).sum();
    total / evidence.len() as f64
}

/// Freshness multiplier from the test's last touch relative to `now`.
///
/// Timestamps in the future count as fresh. A missing timestamp is stale.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn recency_multiplier(touched: Option<DateTime<Utc>>, now: DateTime<Utc>) -> f64 {
    let Some(touched) = touched else {
        return 0.7;
    };
    let days = (now - touched).num_milliseconds() as f64 / MILLIS_PER_DAY;
    if days <= FRESH_DAYS {
        1.0
    } else if days <= RECENT_DAYS {
        0.85
    } else {
        0.7
    }
}

/// Signed contribution of one decided test.
#[must_use]
pub fn contribution(test: &DecidedTest<'_>, now: DateTime<Utc>) -> f64 {
    let touched = test.test.updated_at.or(test.test.created_at);
    decision_weight(test.decision)
        * evidence_multiplier(&test.test.evidence)
        * recency_multiplier(touched, now)
}

/// Additive bonus for sample size: +3 per test beyond the first, capped at +12.
#[must_use]
pub fn sample_bonus(decided: u32) -> f64 {
    ((f64::from(decided) - 1.0) * SAMPLE_BONUS_PER_TEST).clamp(0.0, SAMPLE_BONUS_CAP)
}

/// Read a level off a score.
///
/// With `counts`, the kill rules take precedence over the score bands. Without
/// counts (child roll-ups), only the bands apply.
#[must_use]
pub fn classify(score: f64, counts: Option<&DecisionCounts>) -> (ConfidenceLevel, LevelRule) {
    if let Some(counts) = counts {
        if counts.kill > 0 && counts.pass == 0 {
            return (ConfidenceLevel::Low, LevelRule::KillWithoutPass);
        }
        if counts.kill >= 2 {
            return (ConfidenceLevel::Low, LevelRule::RepeatedKills);
        }
    }
    let level = if score >= HIGH_THRESHOLD {
        ConfidenceLevel::High
    } else if score >= MEDIUM_THRESHOLD {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    };
    (level, LevelRule::Band)
}

/// Score a node from the decided tests it owns.
///
/// Zero decided tests yields the neutral 50 and therefore `Medium`.
#[must_use]
pub fn score(tests: &[DecidedTest<'_>], now: DateTime<Utc>) -> ScoreResult {
    let mut counts = DecisionCounts::default();
    let mut sum = 0.0;
    for test in tests {
        counts.record(test.decision);
        sum += contribution(test, now);
    }
    let decided = u32::try_from(tests.len()).unwrap_or(u32::MAX);
    let raw = if decided == 0 {
        0.0
    } else {
        sum / f64::from(decided)
    };

    #[allow(clippy::suboptimal_flops)]
    let base = (NEUTRAL_SCORE + SCORE_SPAN * raw).clamp(0.0, 100.0);
    let score = (base + sample_bonus(decided)).clamp(0.0, 100.0);
    let (level, rule) = classify(score, Some(&counts));

    ScoreResult {
        score,
        level,
        counts,
        decided,
        explanation: explain(score, level, rule, &counts, decided),
    }
}

fn explain(
    score: f64,
    level: ConfidenceLevel,
    rule: LevelRule,
    counts: &DecisionCounts,
    decided: u32,
) -> String {
    if decided == 0 {
        return format!("no decided tests; neutral score {score:.1} ({level})");
    }
    let tally = format!(
        "{decided} decided ({} pass, {} iterate, {} kill)",
        counts.pass, counts.iterate, counts.kill
    );
    match rule {
        LevelRule::KillWithoutPass => format!("{tally}; killed with no passing test ({level})"),
        LevelRule::RepeatedKills => format!("{tally}; {} kills cap the level ({level})", counts.kill),
        LevelRule::Band => format!("{tally}; score {score:.1} ({level})"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use canopy_core::dates::DateRange;
    use canopy_core::entities::Test;
    use chrono::{Duration, TimeZone};
    use rstest::rstest;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 1, 12, 0, 0).unwrap()
    }

    fn evidence(quality: EvidenceQuality) -> Evidence {
        Evidence {
            id: "evd-00000001".into(),
            test_id: "tst-00000001".into(),
            quality,
            note: None,
            created_at: now(),
        }
    }

    fn test_touched(days_ago: i64, evidence: Vec<Evidence>) -> Test {
        Test {
            id: "tst-00000001".into(),
            title: "t".into(),
            description: None,
            dates: DateRange::none(),
            decision: None,
            todo: None,
            created_at: None,
            updated_at: Some(now() - Duration::days(days_ago)),
            evidence,
            kpis: vec![],
        }
    }

    #[test]
    fn zero_tests_is_neutral_medium() {
        let result = score(&[], now());
        assert!((result.score - 50.0).abs() < f64::EPSILON);
        assert_eq!(result.level, ConfidenceLevel::Medium);
        assert_eq!(result.decided, 0);
        assert_eq!(result.counts, DecisionCounts::default());
    }

    #[test]
    fn weights_are_monotonic() {
        assert!(decision_weight(Decision::Pass) > decision_weight(Decision::Iterate));
        assert!(decision_weight(Decision::Iterate) > decision_weight(Decision::Kill));
    }

    #[rstest]
    #[case(vec![], 0.6)]
    #[case(vec![EvidenceQuality::High], 1.2)]
    #[case(vec![EvidenceQuality::High, EvidenceQuality::Low], 1.0)]
    #[case(vec![EvidenceQuality::Medium, EvidenceQuality::Medium, EvidenceQuality::Low], 2.8 / 3.0)]
    fn evidence_is_averaged(#[case] qualities: Vec<EvidenceQuality>, #[case] expected: f64) {
        let items: Vec<Evidence> = qualities.into_iter().map(evidence).collect();
        assert!((evidence_multiplier(&items) - expected).abs() < 1e-12);
    }

    #[rstest]
    #[case(0, 1.0)]
    #[case(14, 1.0)]
    #[case(15, 0.85)]
    #[case(45, 0.85)]
    #[case(46, 0.7)]
    #[case(-3, 1.0)]
    fn recency_buckets(#[case] days_ago: i64, #[case] expected: f64) {
        let touched = now() - Duration::days(days_ago);
        assert!((recency_multiplier(Some(touched), now()) - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn missing_timestamp_is_stale() {
        assert!((recency_multiplier(None, now()) - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn created_at_is_fallback_for_recency() {
        let mut test = test_touched(0, vec![]);
        test.updated_at = None;
        test.created_at = Some(now() - Duration::days(20));
        let decided = DecidedTest {
            test: &test,
            decision: Decision::Pass,
        };
        assert!((contribution(&decided, now()) - 0.6 * 0.85).abs() < 1e-12);
    }

    #[rstest]
    #[case(0, 0.0)]
    #[case(1, 0.0)]
    #[case(2, 3.0)]
    #[case(5, 12.0)]
    #[case(9, 12.0)]
    fn sample_bonus_saturates(#[case] n: u32, #[case] expected: f64) {
        assert!((sample_bonus(n) - expected).abs() < f64::EPSILON);
    }

    #[test]
    fn single_kill_without_pass_is_low() {
        let t = test_touched(1, vec![evidence(EvidenceQuality::High)]);
        let tests = [DecidedTest {
            test: &t,
            decision: Decision::Kill,
        }];
        let result = score(&tests, now());
        assert_eq!(result.level, ConfidenceLevel::Low);
        assert!(result.explanation.contains("no passing test"));
    }

    #[test]
    fn two_kills_with_passes_is_low() {
        let t = test_touched(1, vec![evidence(EvidenceQuality::High)]);
        let tests = [
            DecidedTest { test: &t, decision: Decision::Kill },
            DecidedTest { test: &t, decision: Decision::Kill },
            DecidedTest { test: &t, decision: Decision::Pass },
            DecidedTest { test: &t, decision: Decision::Pass },
        ];
        let result = score(&tests, now());
        assert_eq!(result.counts, DecisionCounts { pass: 2, iterate: 0, kill: 2 });
        assert_eq!(result.level, ConfidenceLevel::Low);
        // 50 + 0 base, +9 bonus: the band alone would say medium.
        assert_eq!(classify(result.score, None).0, ConfidenceLevel::Medium);
    }

    #[test]
    fn strong_passes_clamp_at_hundred() {
        let t = test_touched(1, vec![evidence(EvidenceQuality::High)]);
        let tests: Vec<DecidedTest<'_>> = (0..6)
            .map(|_| DecidedTest { test: &t, decision: Decision::Pass })
            .collect();
        let result = score(&tests, now());
        assert!((result.score - 100.0).abs() < f64::EPSILON);
        assert_eq!(result.level, ConfidenceLevel::High);
    }

    #[test]
    fn kills_only_floor_at_zero() {
        let t = test_touched(1, vec![evidence(EvidenceQuality::High)]);
        let tests = [DecidedTest { test: &t, decision: Decision::Kill }];
        let result = score(&tests, now());
        assert!(result.score.abs() < f64::EPSILON);
    }

    #[rstest]
    #[case(70.0, ConfidenceLevel::High)]
    #[case(69.99, ConfidenceLevel::Medium)]
    #[case(40.0, ConfidenceLevel::Medium)]
    #[case(39.99, ConfidenceLevel::Low)]
    fn band_boundaries(#[case] value: f64, #[case] expected: ConfidenceLevel) {
        assert_eq!(classify(value, None).0, expected);
    }
}
