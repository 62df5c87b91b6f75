//! Per-member schema building.
//!
//! Combines the type resolver's output with documentation-derived
//! description, alias, default, and requiredness into one schema entry per
//! member. Positionals and named options differ in where their documentation
//! lives and in how requiredness is derived: positionals from the optional
//! marker in the signature, options from `@demandOption`-family tags only.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    diagnostics::{Diagnostics, DiagnosticsKind},
    doc_comment::{DocBlock, TagSelector},
    literal::parse_literal,
    reference::Reference,
    resolve::{TypeContext, resolve_type},
    source::{Member, Project},
};
use decli_core::{OptionProperties, OptionSchema, Value};

/// The tag names that mark a named option as required.
static DEMAND_TAGS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^(demandOption|require|required)$").expect("demand tag pattern is valid")
});

/// Builds the schema entry for one command parameter.
///
/// `command_doc` is the command declaration's own documentation block; a
/// parameter's description comes from the `@param` tag naming it.
pub fn positional_entry(
    project: &Project,
    command_doc: Option<&DocBlock>,
    member: &Member,
) -> Result<(OptionSchema, Option<Reference>), Diagnostics> {
    let (descriptor, reference) = resolve_type(project, member, TypeContext::Positional)?;
    let mut properties = OptionProperties::from(descriptor);

    if let Some(description) = command_doc.and_then(|doc| param_description(doc, &member.name)) {
        properties = properties.description(description);
    }

    if !member.optional {
        // Positionals follow the textual-expression convention: the
        // requiredness literal is the string "true"
        properties = properties.demand_option(Value::str("true"));
    }

    Ok((OptionSchema::new(&member.name, properties), reference))
}

/// Builds the schema entry for one options property.
pub fn option_entry(
    project: &Project,
    member: &Member,
) -> Result<(OptionSchema, Option<Reference>), Diagnostics> {
    let (descriptor, reference) = resolve_type(project, member, TypeContext::Option)?;
    let mut properties = OptionProperties::from(descriptor);

    if let Some(doc) = &member.doc {
        if let Some(line) = doc.summary_line() {
            properties = properties.description(line);
        }

        if let Some(tag) = doc.tag("alias", 0) {
            if tag.text.is_empty() {
                return Err(Diagnostics::with_span(
                    DiagnosticsKind::DocTagParse,
                    member.span,
                    format!("@alias tag on `{}` has no value", member.name),
                )
                .help("write the alias after the tag, e.g. `@alias v`"));
            }
            properties = properties.alias(&tag.text);
        }

        if let Some(tag) = doc.tag("default", 0) {
            let value = parse_literal(&tag.text)?;
            if !value.is_textual_literal() {
                return Err(Diagnostics::with_span(
                    DiagnosticsKind::DocTagParse,
                    member.span,
                    format!(
                        "@default on `{}` must be a string or numeric literal",
                        member.name
                    ),
                ));
            }
            properties = properties.default_value(value);
        }

        // First matching tag wins; requiredness of an option is
        // documentation-driven, never derived from Option<T>
        if !doc.tags(TagSelector::Pattern(&DEMAND_TAGS)).is_empty() {
            properties = properties.demand_option(Value::Bool(true));
        }
    }

    Ok((OptionSchema::new(&member.name, properties), reference))
}

/// Extracts the description text for `name` from a command's `@param` tags.
///
/// A tag with no description text yields nothing, not an empty string.
fn param_description<'a>(doc: &'a DocBlock, name: &str) -> Option<&'a str> {
    doc.tags(TagSelector::Exact("param"))
        .into_iter()
        .find_map(|tag| {
            let (documented, description) = split_param_text(&tag.text)?;
            if documented != name || description.is_empty() {
                return None;
            }
            Some(description)
        })
}

/// Splits `{type}? name (- )? description` into the documented name and its
/// description. The braced annotation is ignored; types come from the
/// signature only.
fn split_param_text(text: &str) -> Option<(&str, &str)> {
    let mut rest = text.trim();

    if let Some(stripped) = rest.strip_prefix('{') {
        let close = stripped.find('}')?;
        rest = stripped[close + 1..].trim_start();
    }

    let name_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let (name, mut description) = rest.split_at(name_end);
    if name.is_empty() {
        return None;
    }

    description = description.trim_start();
    if let Some(stripped) = description.strip_prefix('-') {
        description = stripped.trim_start();
    }

    Some((name, description.trim_end()))
}
