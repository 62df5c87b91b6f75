//! Type classification for declaration members.
//!
//! Resolution maps a member's declared type onto one of three descriptor
//! shapes: a primitive, an array of one supported primitive, or an
//! enumerated-choice set. Everything else is a fatal typing error. The pass
//! is pure and referentially transparent over the loaded declaration graph.

use std::fmt;

use quote::ToTokens;
use syn::{GenericArgument, PathArguments, Type};

use crate::{
    diagnostics::{Diagnostics, DiagnosticsKind},
    literal::parse_literal,
    reference::Reference,
    source::{EnumDecl, Member, Project},
};
use decli_core::{PrimitiveKind, TypeDescriptor, Value};

/// Whether a member is resolved as a positional argument or a named option.
/// Only affects error wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeContext {
    /// A command parameter.
    Positional,
    /// An options-shape property.
    Option,
}

impl fmt::Display for TypeContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeContext::Positional => f.write_str("positional"),
            TypeContext::Option => f.write_str("option"),
        }
    }
}

/// Classifies a member's declared type.
///
/// Yields the resolved descriptor plus, when an enumerated type is involved,
/// a [`Reference`] to the enum's declaration (carrying the enum's own export
/// classification and declaring file, not the file being transformed).
pub fn resolve_type(
    project: &Project,
    member: &Member,
    context: TypeContext,
) -> Result<(TypeDescriptor, Option<Reference>), Diagnostics> {
    let Some(ty) = &member.ty else {
        // No declared type resolves as a free-form string
        return Ok((TypeDescriptor::Primitive(PrimitiveKind::String), None));
    };

    match peel(ty) {
        Type::Infer(_) => Ok((TypeDescriptor::Primitive(PrimitiveKind::String), None)),
        Type::Slice(slice) => {
            let kind = element_kind(&slice.elem)?;
            Ok((TypeDescriptor::Array(kind), None))
        }
        Type::Path(type_path) => {
            let Some(segment) = type_path.path.segments.last() else {
                return Err(unsupported(ty, context, member));
            };
            let name = segment.ident.to_string();

            if name == "Vec" {
                let Some(element) = single_type_argument(&segment.arguments) else {
                    return Err(unsupported(ty, context, member));
                };
                let kind = element_kind(element)?;
                return Ok((TypeDescriptor::Array(kind), None));
            }

            if let Some(kind) = primitive_kind(&name) {
                return Ok((TypeDescriptor::Primitive(kind), None));
            }

            if segment.arguments.is_none()
                && let Some(enum_decl) = project.enum_decl(&name)
            {
                return Ok(choice_descriptor(enum_decl));
            }

            Err(unsupported(ty, context, member))
        }
        _ => Err(unsupported(ty, context, member)),
    }
}

fn choice_descriptor(enum_decl: &EnumDecl) -> (TypeDescriptor, Option<Reference>) {
    let choices = enum_decl
        .variants
        .iter()
        .map(|variant| {
            match parse_literal(&format!("{}::{}", enum_decl.name, variant)) {
                Ok(Value::Path(path)) => path,
                // Enum and variant identifiers always form a valid
                // two-segment path
                _ => unreachable!("enum member paths parse as qualified paths"),
            }
        })
        .collect();

    let reference = Reference {
        name: enum_decl.name.clone(),
        export: enum_decl.export,
        node: enum_decl.node,
        source_file: enum_decl.source_file.clone(),
    };

    (TypeDescriptor::Choice(choices), Some(reference))
}

/// Classifies an array element, rejecting anything that is not a supported
/// primitive (nested arrays and enumerated elements included).
fn element_kind(element: &Type) -> Result<PrimitiveKind, Diagnostics> {
    if let Type::Path(type_path) = peel(element)
        && let Some(segment) = type_path.path.segments.last()
        && segment.arguments.is_none()
        && let Some(kind) = primitive_kind(&segment.ident.to_string())
    {
        return Ok(kind);
    }

    Err(Diagnostics::new(
        DiagnosticsKind::UnsupportedArrayElement,
        format!(
            "unsupported array element type `{}`",
            type_display(element)
        ),
    )
    .help("array members may only hold string, number, or boolean values"))
}

/// Maps a type identifier to its schema primitive kind.
fn primitive_kind(name: &str) -> Option<PrimitiveKind> {
    match name {
        "String" | "str" | "char" => Some(PrimitiveKind::String),
        "bool" => Some(PrimitiveKind::Boolean),
        "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
        | "u128" | "usize" | "f32" | "f64" => Some(PrimitiveKind::Number),
        _ => None,
    }
}

/// Looks through references, parentheses, and groups.
fn peel(ty: &Type) -> &Type {
    match ty {
        Type::Reference(reference) => peel(&reference.elem),
        Type::Paren(paren) => peel(&paren.elem),
        Type::Group(group) => peel(&group.elem),
        other => other,
    }
}

fn single_type_argument(arguments: &PathArguments) -> Option<&Type> {
    let PathArguments::AngleBracketed(args) = arguments else {
        return None;
    };
    match args.args.first() {
        Some(GenericArgument::Type(ty)) if args.args.len() == 1 => Some(ty),
        _ => None,
    }
}

fn unsupported(ty: &Type, context: TypeContext, member: &Member) -> Diagnostics {
    Diagnostics::with_span(
        DiagnosticsKind::UnsupportedType,
        member.span,
        format!("unsupported {context} type `{}`", type_display(ty)),
    )
    .help("supported types are string, number, boolean, arrays of these, and unit-variant enums")
}

/// Renders a type for error messages.
fn type_display(ty: &Type) -> String {
    ty.to_token_stream().to_string().replace(' ', "")
}
