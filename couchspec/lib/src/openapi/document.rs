//! The root OpenAPI document and its metadata objects.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::method::RestMethod;

use super::endpoint::EndpointSpec;
use super::operation::Operation;
use super::schema::Schema;

/// Operations of one path, keyed by method.
pub type PathItem = BTreeMap<RestMethod, Operation>;

/// One entry of the top-level `security` list: scheme name to scopes.
pub type SecurityRequirement = BTreeMap<String, Vec<String>>;

/// Metadata about the API for the OpenAPI `info` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Info {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub version: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<Contact>,
}

impl Info {
    pub fn new(title: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            version: version.into(),
            contact: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_contact(mut self, contact: Contact) -> Self {
        self.contact = Some(contact);
        self
    }
}

/// Contact information for the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contact {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// A server object for the OpenAPI `servers` section.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Server {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Server {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// A security scheme under `components.securitySchemes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityScheme {
    #[serde(rename = "type")]
    pub kind: String,
    pub scheme: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl SecurityScheme {
    /// HTTP Basic authentication (`Authorization: Basic <base64(user:pass)>`).
    pub fn http_basic() -> Self {
        Self {
            kind: "http".to_string(),
            scheme: "basic".to_string(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Components {
    #[serde(default)]
    pub schemas: BTreeMap<String, Schema>,
    #[serde(rename = "securitySchemes", default)]
    pub security_schemes: BTreeMap<String, SecurityScheme>,
}

/// A complete OpenAPI document.
///
/// ## Examples
///
/// ```rust
/// use couchspec::RestMethod;
/// use couchspec::openapi::{EndpointSpec, Info, OpenApiDocument, Response, SecurityScheme, Server};
///
/// let doc = OpenApiDocument::new("3.0.0", Info::new("CouchDB API", "3.3.0"))
///     .add_server(Server::new("http://localhost:5984"))
///     .add_endpoint(
///         EndpointSpec::new("listDatabases", RestMethod::Get, "/_all_dbs")
///             .with_response(200, Response::new("Request completed successfully")),
///     )
///     .add_security_scheme("basicAuth", SecurityScheme::http_basic())
///     .with_global_security(["basicAuth"]);
///
/// let value = serde_json::to_value(&doc).unwrap();
/// assert_eq!(value["paths"]["/_all_dbs"]["get"]["operationId"], "listDatabases");
/// assert_eq!(value["security"][0]["basicAuth"], serde_json::json!([]));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenApiDocument {
    pub openapi: String,
    pub info: Info,
    pub servers: Vec<Server>,
    pub paths: BTreeMap<String, PathItem>,
    pub components: Components,
    pub security: Vec<SecurityRequirement>,
}

impl OpenApiDocument {
    pub fn new(openapi_version: impl Into<String>, info: Info) -> Self {
        Self {
            openapi: openapi_version.into(),
            info,
            servers: Vec::new(),
            paths: BTreeMap::new(),
            components: Components::default(),
            security: Vec::new(),
        }
    }

    pub fn add_server(mut self, server: Server) -> Self {
        self.servers.push(server);
        self
    }

    /// Adds an endpoint, merging it into an existing path item when the path
    /// is already present.
    pub fn add_endpoint(mut self, endpoint: EndpointSpec) -> Self {
        self.paths
            .entry(endpoint.path.clone())
            .or_default()
            .insert(endpoint.method, endpoint.operation());
        self
    }

    pub fn add_endpoints(self, endpoints: impl IntoIterator<Item = EndpointSpec>) -> Self {
        endpoints.into_iter().fold(self, Self::add_endpoint)
    }

    pub fn with_schemas(mut self, schemas: BTreeMap<String, Schema>) -> Self {
        self.components.schemas.extend(schemas);
        self
    }

    pub fn add_security_scheme(mut self, name: impl Into<String>, scheme: SecurityScheme) -> Self {
        self.components.security_schemes.insert(name.into(), scheme);
        self
    }

    /// Sets global security requirements (by scheme name).
    ///
    /// Applied to every operation; operations here never override them.
    pub fn with_global_security(
        mut self,
        scheme_names: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        self.security = scheme_names
            .into_iter()
            .map(|name| BTreeMap::from([(name.into(), Vec::new())]))
            .collect();
        self
    }

    /// Iterates `(path, method, operation)` over every operation.
    pub fn operations(&self) -> impl Iterator<Item = (&str, RestMethod, &Operation)> {
        self.paths.iter().flat_map(|(path, item)| {
            item.iter()
                .map(move |(method, op)| (path.as_str(), *method, op))
        })
    }
}
