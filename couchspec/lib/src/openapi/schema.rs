//! JSON-Schema shaped descriptors used in `components.schemas` and inline
//! in parameters, request bodies and responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use strum::Display;

/// Prefix every component schema reference starts with.
pub const COMPONENT_SCHEMA_PREFIX: &str = "#/components/schemas/";

/// The `type` keyword of a schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SchemaKind {
    Object,
    Array,
    String,
    Integer,
    Number,
    Boolean,
}

/// The `additionalProperties` keyword: either a flag or a schema every extra
/// property must satisfy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    Allowed(bool),
    Schema(Box<Schema>),
}

/// A schema object.
///
/// Built with small constructors and `with_*`/`property` builders so the
/// catalogs read like the data they describe.
///
/// ## Examples
///
/// ```
/// use couchspec::openapi::Schema;
///
/// let doc = Schema::object()
///     .property("_id", Schema::string())
///     .property("tags", Schema::array(Schema::string()))
///     .allow_additional_properties();
///
/// let value = serde_json::to_value(&doc).unwrap();
/// assert_eq!(value["type"], "object");
/// assert_eq!(value["properties"]["tags"]["items"]["type"], "string");
/// assert_eq!(value["additionalProperties"], true);
///
/// let reference = Schema::reference("Document");
/// assert_eq!(
///     serde_json::to_value(&reference).unwrap()["$ref"],
///     "#/components/schemas/Document"
/// );
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schema {
    #[serde(rename = "$ref", skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<SchemaKind>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    #[serde(rename = "additionalProperties", skip_serializing_if = "Option::is_none")]
    pub additional_properties: Option<AdditionalProperties>,
}

impl Schema {
    fn of_kind(kind: SchemaKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    pub fn object() -> Self {
        Self::of_kind(SchemaKind::Object)
    }

    pub fn string() -> Self {
        Self::of_kind(SchemaKind::String)
    }

    pub fn integer() -> Self {
        Self::of_kind(SchemaKind::Integer)
    }

    pub fn number() -> Self {
        Self::of_kind(SchemaKind::Number)
    }

    pub fn boolean() -> Self {
        Self::of_kind(SchemaKind::Boolean)
    }

    /// An array whose elements match `items`.
    pub fn array(items: Schema) -> Self {
        Self {
            items: Some(Box::new(items)),
            ..Self::of_kind(SchemaKind::Array)
        }
    }

    /// Raw bytes, as used for attachment bodies.
    pub fn binary() -> Self {
        Self::string().with_format("binary")
    }

    /// A `$ref` to a named component schema.
    pub fn reference(name: &str) -> Self {
        Self {
            reference: Some(format!("{COMPONENT_SCHEMA_PREFIX}{name}")),
            ..Self::default()
        }
    }

    /// Adds (or replaces) a property.
    pub fn property(mut self, name: impl Into<String>, schema: Schema) -> Self {
        self.properties.insert(name.into(), schema);
        self
    }

    /// Sets the required-property subset.
    pub fn with_required(mut self, names: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.required = names.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn with_default(mut self, default: impl Into<serde_json::Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    /// Restricts a string schema to the given values.
    pub fn with_enum(mut self, values: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.enum_values = values.into_iter().map(Into::into).collect();
        self
    }

    /// Marks an object as open to properties beyond the declared ones.
    pub fn allow_additional_properties(mut self) -> Self {
        self.additional_properties = Some(AdditionalProperties::Allowed(true));
        self
    }

    /// Declares an object as a map whose values match `schema`.
    pub fn with_additional_properties(mut self, schema: Schema) -> Self {
        self.additional_properties = Some(AdditionalProperties::Schema(Box::new(schema)));
        self
    }

    /// Name of the component schema this schema points at, if it is a `$ref`
    /// into `#/components/schemas/`.
    pub fn referenced_name(&self) -> Option<&str> {
        self.reference
            .as_deref()
            .and_then(|r| r.strip_prefix(COMPONENT_SCHEMA_PREFIX))
    }

    /// Every `$ref` reachable from this schema, including nested properties,
    /// array items and additional-properties schemas.
    pub fn references(&self) -> Vec<&str> {
        let mut refs = Vec::new();
        self.collect_references(&mut refs);
        refs
    }

    fn collect_references<'a>(&'a self, refs: &mut Vec<&'a str>) {
        if let Some(reference) = self.reference.as_deref() {
            refs.push(reference);
        }
        for property in self.properties.values() {
            property.collect_references(refs);
        }
        if let Some(items) = &self.items {
            items.collect_references(refs);
        }
        if let Some(AdditionalProperties::Schema(schema)) = &self.additional_properties {
            schema.collect_references(refs);
        }
    }
}
