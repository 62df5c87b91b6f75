//! Build-time diagnostics for declaration resolution.
//!
//! Every failure the engine reports is a documentation or typing error in the
//! source declarations: fatal, surfaced synchronously, never retried. A
//! diagnostic carries a classification, the offending span, and ordered
//! help/note suggestions.

use std::{
    borrow::Cow,
    error::Error,
    fmt::{self, Display},
};

use proc_macro2::Span;

/// The failure classification of a [`Diagnostics`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticsKind {
    /// A source file the declaration parser rejects.
    Parse,
    /// A member's declared type is not primitive, array-of-primitive, or an
    /// enumerated-choice type.
    UnsupportedType,
    /// An array member's element type is unsupported.
    UnsupportedArrayElement,
    /// A positional/option, reference, or command identifier collision.
    NameConflict,
    /// A documentation tag's text does not parse as a recognized literal.
    DocTagParse,
}

/// A fatal resolution error.
#[derive(Debug)]
pub struct Diagnostics {
    kind: DiagnosticsKind,
    span: Span,
    message: Cow<'static, str>,
    suggestions: Vec<Suggestion>,
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
enum Suggestion {
    Help(Cow<'static, str>),
    Note(Cow<'static, str>),
}

impl Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Help(help) => write!(f, "help = {}", help),
            Self::Note(note) => write!(f, "note = {}", note),
        }
    }
}

impl Diagnostics {
    /// Creates a diagnostic without a source span.
    pub fn new<S: Into<Cow<'static, str>>>(kind: DiagnosticsKind, message: S) -> Self {
        Self::with_span(kind, Span::call_site(), message)
    }

    /// Creates a diagnostic pointing at a source span.
    pub fn with_span<S: Into<Cow<'static, str>>>(
        kind: DiagnosticsKind,
        span: Span,
        message: S,
    ) -> Self {
        Self {
            kind,
            span,
            message: message.into(),
            suggestions: Vec::new(),
        }
    }

    /// Attaches a help suggestion.
    pub fn help<S: Into<Cow<'static, str>>>(mut self, help: S) -> Self {
        self.suggestions.push(Suggestion::Help(help.into()));
        self.suggestions.sort();
        self
    }

    /// Attaches a note suggestion.
    pub fn note<S: Into<Cow<'static, str>>>(mut self, note: S) -> Self {
        self.suggestions.push(Suggestion::Note(note.into()));
        self.suggestions.sort();
        self
    }

    /// The failure classification.
    pub fn kind(&self) -> DiagnosticsKind {
        self.kind
    }

    /// The primary message, without suggestions.
    pub fn message(&self) -> &str {
        self.message.as_ref()
    }

    /// The span the diagnostic points at.
    pub fn span(&self) -> Span {
        self.span
    }
}

impl Display for Diagnostics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message.as_ref())?;

        if !self.suggestions.is_empty() {
            let suggestions = self
                .suggestions
                .iter()
                .map(|s| s.to_string())
                .collect::<Vec<_>>()
                .join("\n");
            write!(f, "\n\n{}", suggestions)?;
        }

        Ok(())
    }
}

impl Error for Diagnostics {}

impl From<syn::Error> for Diagnostics {
    fn from(value: syn::Error) -> Self {
        Self::with_span(DiagnosticsKind::Parse, value.span(), value.to_string())
    }
}

impl From<Diagnostics> for syn::Error {
    fn from(value: Diagnostics) -> Self {
        let mut error = syn::Error::new(value.span, value.message.as_ref());

        for suggestion in &value.suggestions {
            match suggestion {
                Suggestion::Help(help) => {
                    error.combine(syn::Error::new(value.span, format!("help: {}", help)));
                }
                Suggestion::Note(note) => {
                    error.combine(syn::Error::new(value.span, format!("note: {}", note)));
                }
            }
        }

        error
    }
}
