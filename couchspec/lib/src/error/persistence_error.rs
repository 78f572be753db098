//! Errors raised while writing the generated document.

use thiserror::Error;

/// The output document could not be encoded or written.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Failed to write the output file (permissions, disk full, bad path).
    #[error("failed to write '{path}': {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// JSON serialization failed.
    #[error("failed to serialize OpenAPI document to JSON: {0}")]
    Json(#[source] serde_json::Error),

    /// YAML serialization failed.
    #[cfg(feature = "yaml")]
    #[error("failed to serialize OpenAPI document to YAML: {0}")]
    Yaml(#[source] serde_yaml::Error),

    /// An encoder was requested that this build does not include.
    #[error("no {format} encoder is compiled into this build")]
    EncoderUnavailable { format: &'static str },
}
