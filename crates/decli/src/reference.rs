//! External symbol references accumulated during schema assembly.

use indexmap::IndexMap;

use crate::source::{ExportKind, NodeId};

/// A pointer to an externally declared symbol that generated code must
/// import.
///
/// Identity is the declaration handle, never the name: two references to the
/// same declaration are the same reference even when looked up independently.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct Reference {
    /// The referenced declaration's identifier.
    pub name: String,

    /// How the declaration is exported from its source file.
    #[serde(rename = "exportKind")]
    pub export: ExportKind,

    /// The referenced declaration's identity handle.
    #[serde(skip)]
    pub node: NodeId,

    /// The source file declaring the symbol.
    #[serde(rename = "sourceFile")]
    pub source_file: String,
}

/// Per-source-file reference lists, split by import syntax.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
pub struct FileReferences {
    /// References imported as the file's primary export.
    pub default: Vec<Reference>,
    /// References imported under their own identifier.
    pub named: Vec<Reference>,
}

/// The side-table of references a command schema depends on.
///
/// Keyed by declaring source file, deduplicated by declaration identity,
/// insertion order preserved throughout.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
#[serde(transparent)]
pub struct ReferenceTable {
    files: IndexMap<String, FileReferences>,
}

impl ReferenceTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a reference, keyed by its declaring file. A reference to an
    /// already-recorded declaration is dropped.
    pub fn insert(&mut self, reference: Reference) {
        if self.contains(reference.node) {
            return;
        }

        let entry = self.files.entry(reference.source_file.clone()).or_default();
        match reference.export {
            ExportKind::Default => entry.default.push(reference),
            ExportKind::Named => entry.named.push(reference),
        }
    }

    /// Merges another table into this one, preserving both insertion orders
    /// and deduplicating by declaration identity.
    pub fn merge(&mut self, other: ReferenceTable) {
        for (_, file_refs) in other.files {
            for reference in file_refs.default.into_iter().chain(file_refs.named) {
                self.insert(reference);
            }
        }
    }

    /// Whether a declaration is already recorded.
    pub fn contains(&self, node: NodeId) -> bool {
        self.references().any(|reference| reference.node == node)
    }

    /// The per-file reference lists for a source file.
    pub fn get(&self, source_file: &str) -> Option<&FileReferences> {
        self.files.get(source_file)
    }

    /// Iterates (source file, reference lists) in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FileReferences)> {
        self.files.iter().map(|(path, refs)| (path.as_str(), refs))
    }

    /// Iterates every recorded reference, default imports before named ones
    /// within each file.
    pub fn references(&self) -> impl Iterator<Item = &Reference> {
        self.files
            .values()
            .flat_map(|refs| refs.default.iter().chain(refs.named.iter()))
    }

    /// Whether the table records no references at all.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}
