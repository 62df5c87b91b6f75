//! Literal values embedded in a generated schema.

use std::fmt;

/// A qualified enum-member path, e.g. `Level::Debug`.
///
/// Used for the entries of a `choices` list. Serializes as its display form
/// (`"Level::Debug"`), which is what the emitter splices into generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QualifiedPath {
    /// The enum declaration's name.
    pub qualifier: String,
    /// The member (variant) name.
    pub member: String,
}

impl QualifiedPath {
    /// Creates a new qualified path.
    pub fn new(qualifier: impl Into<String>, member: impl Into<String>) -> Self {
        Self {
            qualifier: qualifier.into(),
            member: member.into(),
        }
    }
}

impl fmt::Display for QualifiedPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}::{}", self.qualifier, self.member)
    }
}

impl serde::Serialize for QualifiedPath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

/// A typed literal or qualified-reference value usable directly inside a
/// generated schema.
///
/// These are the only value forms the documentation-tag grammar admits; the
/// emitter embeds them verbatim (a string stays a string literal, a number a
/// numeric literal, a path a member access).
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(untagged)]
pub enum Value {
    /// A boolean literal.
    Bool(bool),
    /// A numeric literal, integer or float.
    Num(serde_json::Number),
    /// A string literal.
    Str(String),
    /// A qualified enum-member path.
    Path(QualifiedPath),
}

impl Value {
    /// Creates a string literal value.
    pub fn str(value: impl Into<String>) -> Self {
        Value::Str(value.into())
    }

    /// Creates an integer literal value.
    pub fn int(value: i64) -> Self {
        Value::Num(value.into())
    }

    /// Returns `true` for the string and numeric literal forms.
    pub fn is_textual_literal(&self) -> bool {
        matches!(self, Value::Str(_) | Value::Num(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qualified_path_displays_as_double_colon_form() {
        //* Given
        let path = QualifiedPath::new("Level", "Debug");

        //* When
        let rendered = path.to_string();

        //* Then
        assert_eq!(rendered, "Level::Debug", "display form joins with `::`");
    }

    #[test]
    fn value_serializes_untagged() {
        //* Given
        let values = vec![
            Value::Bool(true),
            Value::int(42),
            Value::str("bar"),
            Value::Path(QualifiedPath::new("E", "A")),
        ];

        //* When
        let rendered = serde_json::to_value(&values).expect("values should serialize");

        //* Then
        assert_eq!(
            rendered,
            serde_json::json!([true, 42, "bar", "E::A"]),
            "each variant should serialize to its bare literal form"
        );
    }
}
