//! # canopy-schema
//!
//! JSON Schema generation, validation, and registry for Canopy.
//!
//! Node, trail, and report types derive `JsonSchema` where they are defined
//! (`canopy-core`, `canopy-confidence`). This crate collects them into a
//! [`SchemaRegistry`] that the store uses to check trail payloads and the CLI
//! uses for `cnp schema`.

pub mod error;
pub mod registry;

pub use error::SchemaError;
pub use registry::SchemaRegistry;
