//! Typed OpenAPI 3.0 object model.
//!
//! Every object serializes directly with serde, so the same value feeds the
//! JSON and YAML encoders.
//!
//! ## Examples
//!
//! ```rust
//! use couchspec::openapi::{EndpointSpec, Info, OpenApiDocument, Response, Schema, Server};
//! use couchspec::RestMethod;
//!
//! let doc = OpenApiDocument::new("3.0.0", Info::new("CouchDB API", "3.3.0"))
//!     .add_server(Server::new("http://localhost:5984"))
//!     .add_endpoint(
//!         EndpointSpec::new("getDatabase", RestMethod::Get, "/{db}")
//!             .with_summary("Get database information")
//!             .with_response(
//!                 200,
//!                 Response::new("Request completed successfully")
//!                     .with_json(Schema::reference("DatabaseInfo")),
//!             ),
//!     );
//!
//! let json = serde_json::to_string_pretty(&doc).unwrap();
//! assert!(json.contains("\"/{db}\""));
//! ```

pub mod document;
pub mod endpoint;
pub mod operation;
pub mod schema;

pub use document::{
    Components, Contact, Info, OpenApiDocument, PathItem, SecurityRequirement, SecurityScheme,
    Server,
};
pub use endpoint::EndpointSpec;
pub use operation::{
    APPLICATION_JSON, APPLICATION_OCTET_STREAM, MediaType, Operation, Parameter,
    ParameterLocation, RequestBody, Response,
};
pub use schema::{AdditionalProperties, COMPONENT_SCHEMA_PREFIX, Schema, SchemaKind};
