//! Composes the probe result and the static catalogs into one document.

use tracing::{debug, instrument};

use crate::catalog;
use crate::error::SpecError;
use crate::openapi::{Contact, Info, OpenApiDocument, SecurityScheme, Server};
use crate::probe::{ProbeClient, ServerInfo};
use crate::validation::validate_document;

/// OpenAPI version tag written when the caller does not override it.
pub const DEFAULT_OPENAPI_VERSION: &str = "3.0.0";

/// Name of the single security scheme.
pub const BASIC_AUTH: &str = "basicAuth";

/// Builds the document for a probed server.
///
/// Pure and deterministic: the same inputs always yield the same document.
///
/// ## Examples
///
/// ```
/// use couchspec::assembler::{assemble, DEFAULT_OPENAPI_VERSION};
/// use couchspec::probe::ServerInfo;
///
/// let info = ServerInfo::from_json(serde_json::json!({ "version": "3.3.0" })).unwrap();
/// let doc = assemble(&info, "http://localhost:5984/", DEFAULT_OPENAPI_VERSION);
///
/// assert_eq!(doc.info.version, "3.3.0");
/// assert_eq!(doc.servers[0].url, "http://localhost:5984");
/// ```
pub fn assemble(server_info: &ServerInfo, base_url: &str, openapi_version: &str) -> OpenApiDocument {
    let version = server_info.version();

    let info = Info::new("CouchDB API", version)
        .with_description(format!("CouchDB {version} REST API"))
        .with_contact(Contact {
            name: Some("Apache CouchDB".to_string()),
            url: Some("https://couchdb.apache.org/".to_string()),
            email: None,
        });

    OpenApiDocument::new(openapi_version, info)
        .add_server(
            Server::new(base_url.trim_end_matches('/')).with_description("CouchDB Server"),
        )
        .add_endpoints(catalog::endpoints())
        .with_schemas(catalog::schemas())
        .add_security_scheme(BASIC_AUTH, SecurityScheme::http_basic())
        .with_global_security([BASIC_AUTH])
}

/// Probes the server, assembles the document and checks it.
///
/// ## Errors
///
/// Returns [`SpecError::Connectivity`] if the probe fails and
/// [`SpecError::Catalog`] if the assembled document is inconsistent.
#[instrument(name = "generate", skip(client), fields(base_url = client.base_url()))]
pub async fn generate(
    client: &ProbeClient,
    openapi_version: &str,
) -> Result<OpenApiDocument, SpecError> {
    let server_info = client.server_info().await?;
    let document = assemble(&server_info, client.base_url(), openapi_version);
    validate_document(&document)?;

    debug!(
        paths = document.paths.len(),
        operations = document.operations().count(),
        schemas = document.components.schemas.len(),
        "Assembled OpenAPI document"
    );

    Ok(document)
}
