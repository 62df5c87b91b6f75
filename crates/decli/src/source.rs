//! The declaration graph consumed by the resolution engine.
//!
//! A [`Project`] owns already-parsed source files and never mutates them.
//! Loading a file adapts each recognized `syn` item into a declaration:
//! functions become commands, structs with named fields become options
//! shapes, and unit-variant enums become enumerated-choice types. Every
//! declaration receives an opaque [`NodeId`] at load time; that handle, not
//! the declaration's name, is its identity.

use proc_macro2::Span;
use syn::{Fields, FnArg, GenericArgument, Item, Pat, PathArguments, Type};

use crate::{
    diagnostics::{Diagnostics, DiagnosticsKind},
    doc_comment::DocBlock,
};

/// An opaque, comparable declaration handle, assigned at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

/// How a declaration is exported from its source file.
///
/// `Named` declarations (`pub`) are imported under their own identifier by
/// generated code; a non-`pub` declaration is the file's implicit primary
/// declaration and is re-exported wholesale by the generated wiring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportKind {
    /// The file's primary, unnamed export.
    Default,
    /// Exported under its own identifier.
    Named,
}

/// A set of loaded source files and their declarations.
#[derive(Debug, Default)]
pub struct Project {
    files: Vec<SourceFile>,
    next_id: u32,
}

/// One loaded source file.
#[derive(Debug)]
pub struct SourceFile {
    path: String,
    decls: Vec<Decl>,
}

/// A named, documented declaration unit.
#[derive(Debug)]
pub enum Decl {
    /// A command declaration (fn item).
    Command(CommandDecl),
    /// An options declaration (struct with named fields).
    Options(OptionsDecl),
    /// An enumerated-choice type (unit-variant enum).
    Enum(EnumDecl),
}

/// A command declaration: one generated command per function.
#[derive(Debug)]
pub struct CommandDecl {
    /// Declaration identity.
    pub node: NodeId,
    /// The command name (the function's identifier).
    pub name: String,
    /// Export classification.
    pub export: ExportKind,
    /// Path of the declaring source file.
    pub source_file: String,
    /// The function's documentation block.
    pub doc: Option<DocBlock>,
    /// Parameters, in signature order.
    pub params: Vec<Member>,
}

/// An options declaration: one named option per property.
#[derive(Debug)]
pub struct OptionsDecl {
    /// Declaration identity.
    pub node: NodeId,
    /// The options-shape name.
    pub name: String,
    /// Export classification.
    pub export: ExportKind,
    /// Path of the declaring source file.
    pub source_file: String,
    /// The struct's documentation block.
    pub doc: Option<DocBlock>,
    /// Properties, in declaration order.
    pub props: Vec<Member>,
}

/// An enumerated-choice type declaration.
#[derive(Debug)]
pub struct EnumDecl {
    /// Declaration identity.
    pub node: NodeId,
    /// The enum's name.
    pub name: String,
    /// Export classification.
    pub export: ExportKind,
    /// Path of the declaring source file.
    pub source_file: String,
    /// The enum's documentation block.
    pub doc: Option<DocBlock>,
    /// Variant names, in declaration order.
    pub variants: Vec<String>,
}

/// One parameter or property of a declaration.
#[derive(Debug)]
pub struct Member {
    /// The member name, unique within its declaration.
    pub name: String,
    /// The declared type, already stripped of an `Option<T>` wrapper.
    /// `None` when the source writes no concrete type (`_`).
    pub ty: Option<Type>,
    /// Whether the member was declared optional (`Option<T>`).
    pub optional: bool,
    /// The member's own documentation block (options properties only;
    /// command parameters are documented via `@param` tags on the command).
    pub doc: Option<DocBlock>,
    /// The member's source span, for diagnostics.
    pub span: Span,
}

impl Project {
    /// Creates an empty project.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a source file and adds its declarations to the project.
    ///
    /// Items that are none of fn / named-field struct / unit-variant enum
    /// are ignored; they can never participate in a schema.
    pub fn add_source(
        &mut self,
        path: impl Into<String>,
        code: &str,
    ) -> Result<(), Diagnostics> {
        let path = path.into();
        let file: syn::File = syn::parse_file(code).map_err(|error| {
            Diagnostics::with_span(
                DiagnosticsKind::Parse,
                error.span(),
                format!("failed to parse `{path}`: {error}"),
            )
        })?;

        let mut decls = Vec::new();
        for item in file.items {
            if let Some(decl) = self.adapt_item(&path, item)? {
                decls.push(decl);
            }
        }

        self.files.push(SourceFile { path, decls });
        Ok(())
    }

    fn adapt_item(&mut self, path: &str, item: Item) -> Result<Option<Decl>, Diagnostics> {
        match item {
            Item::Fn(item) => {
                let mut params = Vec::new();
                for input in &item.sig.inputs {
                    let FnArg::Typed(pat_type) = input else {
                        // Methods never describe commands
                        continue;
                    };
                    params.push(typed_member(pat_type)?);
                }

                Ok(Some(Decl::Command(CommandDecl {
                    node: self.next_node(),
                    name: item.sig.ident.to_string(),
                    export: export_kind(&item.vis),
                    source_file: path.to_string(),
                    doc: DocBlock::from_attrs(&item.attrs),
                    params,
                })))
            }
            Item::Struct(item) => {
                let Fields::Named(fields) = &item.fields else {
                    return Ok(None);
                };

                let mut props = Vec::new();
                for field in &fields.named {
                    let Some(ident) = &field.ident else { continue };
                    let (ty, optional) = normalize_type(field.ty.clone());
                    props.push(Member {
                        name: ident.to_string(),
                        ty,
                        optional,
                        doc: DocBlock::from_attrs(&field.attrs),
                        span: ident.span(),
                    });
                }

                Ok(Some(Decl::Options(OptionsDecl {
                    node: self.next_node(),
                    name: item.ident.to_string(),
                    export: export_kind(&item.vis),
                    source_file: path.to_string(),
                    doc: DocBlock::from_attrs(&item.attrs),
                    props,
                })))
            }
            Item::Enum(item) => {
                // Only closed sets of named constants qualify as choice
                // types; an enum with payload-carrying variants stays
                // unregistered and resolves as an unsupported type.
                if !item
                    .variants
                    .iter()
                    .all(|variant| matches!(variant.fields, Fields::Unit))
                {
                    return Ok(None);
                }

                let variants = item
                    .variants
                    .iter()
                    .map(|variant| variant.ident.to_string())
                    .collect();

                Ok(Some(Decl::Enum(EnumDecl {
                    node: self.next_node(),
                    name: item.ident.to_string(),
                    export: export_kind(&item.vis),
                    source_file: path.to_string(),
                    doc: DocBlock::from_attrs(&item.attrs),
                    variants,
                })))
            }
            _ => Ok(None),
        }
    }

    fn next_node(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// The loaded source files, in load order.
    pub fn files(&self) -> &[SourceFile] {
        &self.files
    }

    /// All declarations across all files, in load order.
    pub fn decls(&self) -> impl Iterator<Item = &Decl> {
        self.files.iter().flat_map(|file| file.decls.iter())
    }

    /// Looks up a command declaration by name.
    pub fn command(&self, name: &str) -> Option<&CommandDecl> {
        self.decls().find_map(|decl| match decl {
            Decl::Command(command) if command.name == name => Some(command),
            _ => None,
        })
    }

    /// Looks up an options declaration by name.
    pub fn options(&self, name: &str) -> Option<&OptionsDecl> {
        self.decls().find_map(|decl| match decl {
            Decl::Options(options) if options.name == name => Some(options),
            _ => None,
        })
    }

    /// Looks up an enumerated-choice declaration by name.
    pub fn enum_decl(&self, name: &str) -> Option<&EnumDecl> {
        self.decls().find_map(|decl| match decl {
            Decl::Enum(enum_decl) if enum_decl.name == name => Some(enum_decl),
            _ => None,
        })
    }
}

impl SourceFile {
    /// The path the file was registered under.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// The file's declarations, in document order.
    pub fn decls(&self) -> &[Decl] {
        &self.decls
    }
}

fn typed_member(pat_type: &syn::PatType) -> Result<Member, Diagnostics> {
    let Pat::Ident(pat_ident) = pat_type.pat.as_ref() else {
        return Err(Diagnostics::with_span(
            DiagnosticsKind::Parse,
            Span::call_site(),
            "command parameters must be plain identifiers",
        )
        .help("destructuring patterns cannot be mapped to positional names"));
    };

    let (ty, optional) = normalize_type(pat_type.ty.as_ref().clone());

    Ok(Member {
        name: pat_ident.ident.to_string(),
        ty,
        optional,
        doc: None,
        span: pat_ident.ident.span(),
    })
}

fn export_kind(vis: &syn::Visibility) -> ExportKind {
    match vis {
        syn::Visibility::Public(_) => ExportKind::Named,
        _ => ExportKind::Default,
    }
}

/// Strips an `Option<T>` wrapper into the optionality flag and maps the
/// inferred type (`_`) to "no declared type".
fn normalize_type(ty: Type) -> (Option<Type>, bool) {
    let (ty, optional) = match unwrap_option(&ty) {
        Some(inner) => (inner.clone(), true),
        None => (ty, false),
    };

    match ty {
        Type::Infer(_) => (None, optional),
        other => (Some(other), optional),
    }
}

/// Returns the wrapped type if `ty` is `Option<T>`.
fn unwrap_option(ty: &Type) -> Option<&Type> {
    let Type::Path(type_path) = ty else { return None };
    let segment = type_path.path.segments.last()?;
    if segment.ident != "Option" {
        return None;
    }

    let PathArguments::AngleBracketed(args) = &segment.arguments else {
        return None;
    };
    match args.args.first() {
        Some(GenericArgument::Type(inner)) if args.args.len() == 1 => Some(inner),
        _ => None,
    }
}
