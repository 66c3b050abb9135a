pub mod confidence;
pub mod dispatch;
pub mod evidence;
pub mod import;
pub mod init;
pub mod kpi;
pub mod opportunity;
pub mod outcome;
pub mod rebuild;
pub mod schema;
pub mod shared;
pub mod solution;
pub mod test_node;
pub mod tree;
