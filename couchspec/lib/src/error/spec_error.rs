//! Top-level error type.

use super::{CatalogError, ConnectivityError, PersistenceError};
use thiserror::Error;

/// Top-level error for a generate run.
///
/// ## Examples
///
/// ```rust,ignore
/// use couchspec::error::SpecError;
///
/// fn report(err: SpecError) {
///     match err {
///         SpecError::Connectivity(e) => eprintln!("Error connecting to CouchDB: {e}"),
///         SpecError::Catalog(e) => eprintln!("Invalid API catalog: {e}"),
///         SpecError::Persistence(e) => eprintln!("Error saving file: {e}"),
///     }
/// }
/// ```
#[derive(Debug, Error)]
pub enum SpecError {
    /// The server could not be probed.
    #[error(transparent)]
    Connectivity(#[from] ConnectivityError),

    /// The assembled document failed its consistency checks.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The document could not be written.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}
