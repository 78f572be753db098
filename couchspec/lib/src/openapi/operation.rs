//! Operation objects: parameters, request bodies and responses.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::schema::Schema;

pub const APPLICATION_JSON: &str = "application/json";
pub const APPLICATION_OCTET_STREAM: &str = "application/octet-stream";

/// Where a parameter is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParameterLocation {
    Path,
    Query,
}

/// A single operation parameter.
///
/// ## Examples
///
/// ```
/// use couchspec::openapi::{Parameter, ParameterLocation, Schema};
///
/// let rev = Parameter::query("rev", Schema::string())
///     .required()
///     .with_description("Document revision");
/// assert_eq!(rev.location, ParameterLocation::Query);
/// assert!(rev.required);
///
/// let db = Parameter::path("db");
/// assert!(db.required);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    pub name: String,
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    pub required: bool,
    pub schema: Schema,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Parameter {
    /// A path parameter. OpenAPI requires these to be `required: true`.
    pub fn path(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            location: ParameterLocation::Path,
            required: true,
            schema: Schema::string(),
            description: None,
        }
    }

    /// An optional query parameter.
    pub fn query(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            location: ParameterLocation::Query,
            required: false,
            schema,
            description: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn is_path(&self) -> bool {
        self.location == ParameterLocation::Path
    }
}

/// A media type entry under `content`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaType {
    pub schema: Schema,
}

/// A request body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestBody {
    #[serde(default)]
    pub required: bool,
    pub content: BTreeMap<String, MediaType>,
}

impl RequestBody {
    /// A JSON body validated by `schema`. Bodies start out required.
    pub fn json(schema: Schema) -> Self {
        Self::with_media_type(APPLICATION_JSON, schema)
    }

    /// A raw byte body.
    pub fn binary() -> Self {
        Self::with_media_type(APPLICATION_OCTET_STREAM, Schema::binary())
    }

    fn with_media_type(media_type: &str, schema: Schema) -> Self {
        Self {
            required: true,
            content: BTreeMap::from([(media_type.to_string(), MediaType { schema })]),
        }
    }

    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }
}

/// A response keyed by status code inside an operation.
///
/// ## Examples
///
/// ```
/// use couchspec::openapi::{Response, Schema};
///
/// let ok = Response::new("Request completed successfully")
///     .with_json(Schema::reference("DatabaseInfo"));
/// assert!(ok.content.contains_key("application/json"));
///
/// let gone = Response::new("Database not found");
/// assert!(gone.content.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub description: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub content: BTreeMap<String, MediaType>,
}

impl Response {
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            content: BTreeMap::new(),
        }
    }

    pub fn with_json(self, schema: Schema) -> Self {
        self.with_content(APPLICATION_JSON, schema)
    }

    pub fn with_binary(self) -> Self {
        self.with_content(APPLICATION_OCTET_STREAM, Schema::binary())
    }

    fn with_content(mut self, media_type: &str, schema: Schema) -> Self {
        self.content
            .insert(media_type.to_string(), MediaType { schema });
        self
    }
}

/// A single operation under a path item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "operationId")]
    pub operation_id: String,
    pub summary: String,
    pub description: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<Parameter>,
    #[serde(rename = "requestBody", skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBody>,
    pub responses: BTreeMap<String, Response>,
}

impl Operation {
    /// Looks up a parameter by name and location.
    pub fn parameter(&self, name: &str, location: ParameterLocation) -> Option<&Parameter> {
        self.parameters
            .iter()
            .find(|p| p.name == name && p.location == location)
    }

    /// Every schema this operation embeds: parameter schemas, request body
    /// schemas and response schemas.
    pub fn schemas(&self) -> impl Iterator<Item = &Schema> {
        let params = self.parameters.iter().map(|p| &p.schema);
        let body = self
            .request_body
            .iter()
            .flat_map(|b| b.content.values().map(|m| &m.schema));
        let responses = self
            .responses
            .values()
            .flat_map(|r| r.content.values().map(|m| &m.schema));
        params.chain(body).chain(responses)
    }
}
