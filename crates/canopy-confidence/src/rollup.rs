//! Combining already-computed child scores.
//!
//! Used where a parent's raw tests are not at hand, e.g. a portfolio view over
//! several outcomes. Decision counts are unknown here, so the kill override
//! cannot apply and only the score bands decide the level.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use canopy_core::enums::ConfidenceLevel;

use crate::scorer::classify;

const EMPTY_ROLLUP_SCORE: f64 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RollupScore {
    pub score: f64,
    pub level: ConfidenceLevel,
    pub children: u32,
}

/// Average child scores into a parent score.
///
/// No children yields the same neutral 50 a node with no decided tests gets.
#[must_use]
pub fn combine_child_scores(scores: &[f64]) -> RollupScore {
    let children = u32::try_from(scores.len()).unwrap_or(u32::MAX);
    let score = if children == 0 {
        EMPTY_ROLLUP_SCORE
    } else {
        (scores.iter().sum::<f64>() / f64::from(children)).clamp(0.0, 100.0)
    };
    RollupScore {
        score,
        level: classify(score, None).0,
        children,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_children() {
        let rollup = combine_child_scores(&[80.0, 60.0]);
        assert!((rollup.score - 70.0).abs() < f64::EPSILON);
        assert_eq!(rollup.level, ConfidenceLevel::High);
        assert_eq!(rollup.children, 2);
    }

    #[test]
    fn low_band_without_kill_override() {
        let rollup = combine_child_scores(&[10.0, 30.0]);
        assert_eq!(rollup.level, ConfidenceLevel::Low);
    }

    #[test]
    fn out_of_range_inputs_are_clamped() {
        let rollup = combine_child_scores(&[150.0, 130.0]);
        assert!((rollup.score - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn no_children_is_neutral() {
        let rollup = combine_child_scores(&[]);
        assert!((rollup.score - 50.0).abs() < f64::EPSILON);
        assert_eq!(rollup.level, ConfidenceLevel::Medium);
        assert_eq!(rollup.children, 0);
    }
}
