//! # decli
//!
//! Resolve annotated declarations into normalized command-line option
//! schemas.
//!
//! A function declaration (the command) yields one schema entry per
//! parameter (a positional); a struct declaration (the options shape) yields
//! one entry per property (a named option). Types are classified as
//! primitive, array-of-primitive, or enumerated-choice; descriptions,
//! aliases, defaults, and requiredness come from documentation tags. The
//! result is a [`CommandSchema`] plus a [`ReferenceTable`] naming every
//! external symbol (currently enumerated types) the generated wiring must
//! import.
//!
//! # Example
//!
//! ```
//! use decli::{Project, transform_command};
//!
//! let mut project = Project::new();
//! project
//!     .add_source(
//!         "copy.rs",
//!         r#"
//! /// Copies a file.
//! /// @param source - the file to copy
//! fn copy(source: String, target: Option<String>) {}
//! "#,
//!     )
//!     .expect("source parses");
//!
//! let command = project.command("copy").expect("declared above");
//! let schema = transform_command(&project, command).expect("resolves");
//!
//! assert_eq!(schema.name, "copy");
//! assert_eq!(schema.positionals.len(), 2);
//! ```

pub mod diagnostics;
pub mod doc_comment;
pub mod literal;
pub mod member;
pub mod reference;
pub mod resolve;
pub mod source;
pub mod transform;

// Re-export the schema model so downstream emitters need a single dependency
pub use decli_core::{
    OptionProperties, OptionSchema, PrimitiveKind, QualifiedPath, TypeDescriptor, Value,
};

pub use self::{
    diagnostics::{Diagnostics, DiagnosticsKind},
    doc_comment::{DocBlock, DocTag, TagSelector},
    literal::parse_literal,
    member::{option_entry, positional_entry},
    reference::{FileReferences, Reference, ReferenceTable},
    resolve::{TypeContext, resolve_type},
    source::{CommandDecl, Decl, EnumDecl, ExportKind, Member, NodeId, OptionsDecl, Project, SourceFile},
    transform::{
        CommandSchema, OptionsSchema, assert_name_conflict, transform_command,
        transform_command_with_options, transform_options,
    },
};
