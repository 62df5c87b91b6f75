//! # decli-core
//!
//! Schema model for decli - normalized command-line option schemas.
//!
//! This crate provides the emitter-facing data types produced by the decli
//! resolution engine: per-member option schemas, the literal values embedded
//! in them, and the resolved type descriptors they are derived from. All
//! types are immutable projections; the engine builds them once per
//! declaration and hands them off for code generation.

pub mod schema;

// Re-export main types at the crate root for convenience
pub use schema::{OptionProperties, OptionSchema, PrimitiveKind, QualifiedPath, TypeDescriptor, Value};
