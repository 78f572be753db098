//! OpenAPI 3.0 document generation for the CouchDB REST API.
//!
//! The pipeline is probe, assemble, validate, write:
//!
//! 1. [`probe::ProbeClient`] fetches the server's identity document
//! 2. [`assembler::assemble`] combines its version with the static
//!    [`catalog`] of endpoints and schemas
//! 3. [`validation::validate_document`] checks the catalogs are consistent
//! 4. [`writer::save`] encodes JSON or YAML and writes the file atomically
//!
//! ## Examples
//!
//! ```rust,ignore
//! use couchspec::{assembler, probe::ProbeClient, writer};
//!
//! let client = ProbeClient::builder("http://localhost:5984").build()?;
//! let doc = assembler::generate(&client, assembler::DEFAULT_OPENAPI_VERSION).await?;
//! let report = writer::save(&doc, "couchdb-openapi.json".as_ref(), writer::OutputFormat::Json)?;
//! println!("OpenAPI spec saved to: {}", report.path.display());
//! ```

pub mod assembler;
pub mod catalog;
pub mod error;
pub mod method;
pub mod openapi;
pub mod parser;
pub mod probe;
pub mod validation;
pub mod writer;

pub use assembler::{DEFAULT_OPENAPI_VERSION, assemble, generate};
pub use error::{CatalogError, ConnectivityError, PersistenceError, SpecError};
pub use method::RestMethod;
pub use openapi::OpenApiDocument;
pub use probe::{Credentials, ProbeClient, ServerInfo};
pub use writer::{OutputFormat, SaveReport};
