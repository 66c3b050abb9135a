//! JSONL trail writer and replayer.
//!
//! The trail is the source of truth for all mutations. Per-day JSONL files
//! live in `.canopy/trail/` and the node store is rebuilt from them.

pub mod replayer;
pub mod writer;
