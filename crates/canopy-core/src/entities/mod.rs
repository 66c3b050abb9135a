//! Node structs for the Canopy discovery tree.
//!
//! Each container carries its children inline, so a whole forest serializes as
//! one nested document. Child collections default to empty when absent.
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON
//! roundtrip and schema validation.

mod evidence;
mod kpi;
mod opportunity;
mod outcome;
mod solution;
mod test_node;

pub use evidence::Evidence;
pub use kpi::Kpi;
pub use opportunity::Opportunity;
pub use outcome::Outcome;
pub use solution::Solution;
pub use test_node::{Test, TodoProgress};
