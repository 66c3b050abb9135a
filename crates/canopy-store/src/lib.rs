//! # canopy-store
//!
//! Node storage and mutation for the Canopy discovery tree.
//!
//! The tree lives in memory as an arena ([`store::NodeStore`]). Every
//! mutation is recorded through a [`repository::TreeRepository`] before it
//! is applied; the shipped repository is a directory of per-day JSONL trail
//! files, and the arena is rebuilt from it by replay on every open.
//!
//! [`service::CanopyService`] is the entry point. Its per-kind operations live
//! in [`repos`].

pub mod error;
pub mod node;
pub mod repos;
pub mod repository;
pub mod service;
pub mod store;
pub mod trail;
pub mod updates;

#[cfg(test)]
mod test_support;

pub use error::StoreError;
pub use node::NodeData;
pub use repository::{MemoryRepository, TrailRepository, TrailSnapshot, TreeRepository};
pub use service::CanopyService;
pub use store::NodeStore;
pub use trail::replayer::{ReplayStats, TrailReplayer};
pub use trail::writer::TrailWriter;
