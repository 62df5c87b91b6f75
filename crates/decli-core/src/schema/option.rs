//! Per-member option schema entities.

use super::{
    descriptor::{PrimitiveKind, TypeDescriptor},
    value::{QualifiedPath, Value},
};

/// One schema entry: a positional argument or a named option.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct OptionSchema {
    /// The argument or flag name, taken from the source member.
    pub name: String,

    /// The resolved schema properties.
    pub properties: OptionProperties,
}

impl OptionSchema {
    /// Creates a new schema entry.
    pub fn new(name: impl Into<String>, properties: OptionProperties) -> Self {
        Self {
            name: name.into(),
            properties,
        }
    }
}

/// The resolved properties of one option.
///
/// Exactly one of `schema_type`/`choices` is set, and `array` only ever
/// accompanies `schema_type`. Every field that is absent in the source stays
/// absent here; the emitter must not see empty-string placeholders.
#[derive(Debug, Clone, PartialEq, Default, serde::Serialize)]
pub struct OptionProperties {
    /// The primitive value type.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub schema_type: Option<PrimitiveKind>,

    /// Whether the option accepts repeated values.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub array: Option<bool>,

    /// The closed set of accepted values, for enumerated-choice types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub choices: Option<Vec<QualifiedPath>>,

    /// A description of the option.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// An alternative (short) name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,

    /// The default value literal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    /// Whether the option must be supplied.
    #[serde(rename = "demandOption", skip_serializing_if = "Option::is_none")]
    pub demand_option: Option<Value>,
}

impl OptionProperties {
    /// Creates empty properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the primitive value type.
    pub fn schema_type(mut self, schema_type: PrimitiveKind) -> Self {
        self.schema_type = Some(schema_type);
        self
    }

    /// Marks the option as repeatable.
    pub fn array(mut self, array: bool) -> Self {
        self.array = Some(array);
        self
    }

    /// Sets the accepted-value set.
    pub fn choices(mut self, choices: Vec<QualifiedPath>) -> Self {
        self.choices = Some(choices);
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the alias.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    /// Sets the default value.
    pub fn default_value(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// Sets the requiredness literal.
    pub fn demand_option(mut self, demand_option: Value) -> Self {
        self.demand_option = Some(demand_option);
        self
    }
}

impl From<TypeDescriptor> for OptionProperties {
    /// Seeds the type-bearing fields from a resolved descriptor.
    fn from(descriptor: TypeDescriptor) -> Self {
        match descriptor {
            TypeDescriptor::Primitive(kind) => OptionProperties::new().schema_type(kind),
            TypeDescriptor::Array(kind) => OptionProperties::new().schema_type(kind).array(true),
            TypeDescriptor::Choice(choices) => OptionProperties::new().choices(choices),
        }
    }
}
