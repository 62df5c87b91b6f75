//! Resolved type descriptors.

use std::fmt;

use super::value::QualifiedPath;

/// The primitive value kinds a command-line option can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimitiveKind {
    /// A free-form string value.
    String,
    /// A numeric value, integer or float.
    Number,
    /// A boolean flag value.
    Boolean,
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrimitiveKind::String => f.write_str("string"),
            PrimitiveKind::Number => f.write_str("number"),
            PrimitiveKind::Boolean => f.write_str("boolean"),
        }
    }
}

/// The classification of a member's declared type.
///
/// Exactly one variant applies per member. Array-of-choice is not
/// representable; the resolver rejects enum array elements before a
/// descriptor is ever built.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeDescriptor {
    /// A single primitive value.
    Primitive(PrimitiveKind),
    /// A repeatable primitive value.
    Array(PrimitiveKind),
    /// A closed set of enum-member references, in declaration order.
    Choice(Vec<QualifiedPath>),
}

impl TypeDescriptor {
    /// The primitive kind, for the `Primitive` and `Array` variants.
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        match self {
            TypeDescriptor::Primitive(kind) | TypeDescriptor::Array(kind) => Some(*kind),
            TypeDescriptor::Choice(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primitive_kind_serializes_lowercase() {
        //* Given
        let kinds = vec![
            PrimitiveKind::String,
            PrimitiveKind::Number,
            PrimitiveKind::Boolean,
        ];

        //* When
        let rendered = serde_json::to_value(&kinds).expect("kinds should serialize");

        //* Then
        assert_eq!(
            rendered,
            serde_json::json!(["string", "number", "boolean"]),
            "kinds should match the generated schema's type spellings"
        );
    }

    #[test]
    fn choice_descriptor_has_no_primitive_kind() {
        //* Given
        let descriptor = TypeDescriptor::Choice(vec![QualifiedPath::new("E", "A")]);

        //* When
        let kind = descriptor.primitive_kind();

        //* Then
        assert_eq!(kind, None, "choices carry no primitive kind");
    }
}
