//! Command and options assembly.
//!
//! The assembler walks a declaration's members, builds one schema entry per
//! member, merges per-member references into a per-source-file table, and
//! validates the naming invariants: positional and option namespaces must be
//! disjoint, and no identifier may resolve to two different imports.

use std::collections::HashMap;

use tracing::debug;

use crate::{
    diagnostics::{Diagnostics, DiagnosticsKind},
    member::{option_entry, positional_entry},
    reference::{Reference, ReferenceTable},
    source::{CommandDecl, OptionsDecl, Project},
};
use decli_core::OptionSchema;

/// A fully resolved command: the sole artifact handed to the emitter.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CommandSchema {
    /// The command name.
    pub name: String,
    /// The command's top-level description; empty when undocumented.
    pub description: String,
    /// Positional argument schemas, in signature order.
    pub positionals: Vec<OptionSchema>,
    /// Named option schemas, in declaration order.
    pub options: Vec<OptionSchema>,
    /// The symbols generated code must import.
    pub references: ReferenceTable,
}

/// A resolved options declaration, before pairing with a command.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct OptionsSchema {
    /// Named option schemas, in declaration order.
    pub options: Vec<OptionSchema>,
    /// The symbols the option schemas depend on.
    pub references: ReferenceTable,
}

/// Resolves a command declaration into a schema with no named options.
pub fn transform_command(
    project: &Project,
    command: &CommandDecl,
) -> Result<CommandSchema, Diagnostics> {
    let description = command
        .doc
        .as_ref()
        .and_then(|doc| doc.summary_line())
        .unwrap_or("")
        .to_string();

    let mut positionals = Vec::with_capacity(command.params.len());
    let mut references = ReferenceTable::new();

    for member in &command.params {
        let (schema, reference) = positional_entry(project, command.doc.as_ref(), member)?;
        if let Some(reference) = reference {
            debug!(command = %command.name, symbol = %reference.name, "accumulated reference");
            references.insert(reference);
        }
        positionals.push(schema);
    }

    assert_name_conflict(&positionals, &[])?;
    assert_reference_uniqueness(command, &references)?;

    debug!(
        command = %command.name,
        positionals = positionals.len(),
        "built command schema"
    );

    Ok(CommandSchema {
        name: command.name.clone(),
        description,
        positionals,
        options: Vec::new(),
        references,
    })
}

/// Resolves an options declaration into its option schemas and references.
pub fn transform_options(
    project: &Project,
    options: &OptionsDecl,
) -> Result<OptionsSchema, Diagnostics> {
    let mut entries = Vec::with_capacity(options.props.len());
    let mut references = ReferenceTable::new();

    for member in &options.props {
        let (schema, reference) = option_entry(project, member)?;
        if let Some(reference) = reference {
            debug!(options = %options.name, symbol = %reference.name, "accumulated reference");
            references.insert(reference);
        }
        entries.push(schema);
    }

    debug!(options = %options.name, entries = entries.len(), "built options schema");

    Ok(OptionsSchema {
        options: entries,
        references,
    })
}

/// Resolves a command paired with an options declaration.
///
/// Both member lists are built, compared for name conflicts, and their
/// reference tables merged before the combined identifier space is checked.
pub fn transform_command_with_options(
    project: &Project,
    command: &CommandDecl,
    options: &OptionsDecl,
) -> Result<CommandSchema, Diagnostics> {
    let mut schema = transform_command(project, command)?;
    let options_schema = transform_options(project, options)?;

    assert_name_conflict(&schema.positionals, &options_schema.options)?;

    schema.options = options_schema.options;
    schema.references.merge(options_schema.references);
    assert_reference_uniqueness(command, &schema.references)?;

    Ok(schema)
}

/// Fails when a name appears both as a positional and as a named option.
pub fn assert_name_conflict(
    positionals: &[OptionSchema],
    options: &[OptionSchema],
) -> Result<(), Diagnostics> {
    for positional in positionals {
        if options.iter().any(|option| option.name == positional.name) {
            return Err(Diagnostics::new(
                DiagnosticsKind::NameConflict,
                format!(
                    "`{}` is declared both as a positional and as a named option",
                    positional.name
                ),
            )
            .help("rename the command parameter or the options property"));
        }
    }

    Ok(())
}

/// Checks the combined identifier space of the command name and every
/// reference: the same identifier must never resolve to two different
/// imports.
fn assert_reference_uniqueness(
    command: &CommandDecl,
    references: &ReferenceTable,
) -> Result<(), Diagnostics> {
    let mut seen: HashMap<&str, &Reference> = HashMap::new();

    for reference in references.references() {
        if reference.name == command.name && reference.node != command.node {
            return Err(Diagnostics::new(
                DiagnosticsKind::NameConflict,
                format!(
                    "referenced declaration `{}` (in `{}`) collides with the command's own name",
                    reference.name, reference.source_file
                ),
            )
            .help("rename the command or the referenced declaration"));
        }

        match seen.get(reference.name.as_str()) {
            Some(previous) if previous.node != reference.node => {
                return Err(Diagnostics::new(
                    DiagnosticsKind::NameConflict,
                    format!(
                        "`{}` resolves to two different declarations (in `{}` and `{}`)",
                        reference.name, previous.source_file, reference.source_file
                    ),
                )
                .help("rename one of the conflicting declarations"));
            }
            Some(_) => {}
            None => {
                seen.insert(reference.name.as_str(), reference);
            }
        }
    }

    Ok(())
}
