pub mod dates;
pub mod limit;
pub mod node;
pub mod parse;
