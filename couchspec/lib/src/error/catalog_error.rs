//! Consistency failures in the static endpoint and schema catalogs.

use thiserror::Error;

/// A defect in the assembled document's own catalogs.
///
/// These indicate a bug in the catalog data rather than a runtime
/// condition, and name the offending operation or schema.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// A path parameter has no matching placeholder, or a placeholder has
    /// no path parameter.
    #[error("{location}: path parameter '{name}' does not match the template placeholders")]
    PathParameterMismatch { location: String, name: String },

    /// The same placeholder appears more than once in a template.
    #[error("path '{path}' repeats the placeholder '{{{name}}}'")]
    DuplicatePlaceholder { path: String, name: String },

    /// Two operations share an `operationId`.
    #[error("operationId '{operation_id}' is used by both {first} and {second}")]
    DuplicateOperationId {
        operation_id: String,
        first: String,
        second: String,
    },

    /// A `$ref` points at a schema the catalog does not define.
    #[error("{location}: reference '{reference}' does not resolve to a component schema")]
    DanglingReference { location: String, reference: String },

    /// The security schemes and the global requirement disagree.
    #[error("security configuration is inconsistent: {0}")]
    SecurityMismatch(String),
}
