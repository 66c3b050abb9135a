//! # canopy-core
//!
//! Core types, ID generation, and error types for Canopy.
//!
//! This crate provides the foundational types shared across all Canopy crates:
//! - Node structs for the discovery tree (outcomes, opportunities, solutions, tests)
//! - Node kinds with their allowed parent/child relationships
//! - Date windows and the date coherence validator
//! - ID prefix constants and generation
//! - Cross-cutting error types
//! - Trail operation envelope for JSONL persistence
//! - An injectable clock for recency-sensitive computations

pub mod clock;
pub mod dates;
pub mod entities;
pub mod enums;
pub mod errors;
pub mod ids;
pub mod responses;
pub mod trail;
