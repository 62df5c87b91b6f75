//! Schema types for normalized command-line options.
//!
//! This module provides the types a generated command-line wiring layer
//! consumes: one [`OptionSchema`] per positional or named option, carrying a
//! fully resolved type, documentation-derived description, and literal
//! default/requiredness values. Nothing here needs to be re-derived at emit
//! time.

pub mod descriptor;
pub mod option;
pub mod value;

pub use self::{
    descriptor::{PrimitiveKind, TypeDescriptor},
    option::{OptionProperties, OptionSchema},
    value::{QualifiedPath, Value},
};
