mod evidence;
mod kpi;
mod node;
mod opportunity;
mod outcome;
mod solution;
mod test_node;

pub use evidence::EvidenceCommands;
pub use kpi::KpiCommands;
pub use node::{NodeCreateArgs, NodeUpdateArgs};
pub use opportunity::OpportunityCommands;
pub use outcome::OutcomeCommands;
pub use solution::SolutionCommands;
pub use test_node::TestCommands;
