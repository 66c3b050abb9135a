//! # canopy-confidence
//!
//! Confidence scoring for the Canopy discovery tree.
//!
//! - [`decision`]: maps a test's free-form decision to pass/iterate/kill
//! - [`scorer`]: turns a set of decided tests into a 0–100 score and a level
//! - [`aggregate`]: walks a whole forest once and scores every container
//! - [`rollup`]: combines already-computed child scores when raw tests are unavailable
//!
//! Everything here is a pure function of its inputs and the supplied `now`.

pub mod aggregate;
pub mod decision;
pub mod error;
pub mod rollup;
pub mod scorer;

pub use aggregate::{ConfidenceMap, ConfidenceReport, NodeKey, compute_all, report};
pub use decision::{DecidedTest, decided, is_decided, normalize};
pub use error::AggregateError;
pub use rollup::{RollupScore, combine_child_scores};
pub use scorer::{DecisionCounts, ScoreResult, score};
