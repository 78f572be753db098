//! Errors raised while probing the CouchDB server.

use thiserror::Error;

/// The server could not be reached or did not answer with a JSON object.
///
/// None of these are retried.
#[derive(Debug, Error)]
pub enum ConnectivityError {
    /// The configured base URL is not a valid URL.
    #[error("invalid server URL '{url}': {source}")]
    InvalidUrl {
        /// The URL as given.
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// HTTP request failed due to a network or protocol error.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Server returned a non-success HTTP status code.
    #[error("HTTP {status}: {message}")]
    HttpStatus {
        /// The HTTP status code returned.
        status: u16,
        /// Response body, or the canonical reason if the body was unreadable.
        message: String,
    },

    /// Response body was not valid JSON.
    #[error("response body is not valid JSON: {0}")]
    InvalidBody(#[source] serde_json::Error),

    /// Response body was JSON but not an object.
    #[error("expected a JSON object from the server root, got {0}")]
    UnexpectedBody(String),
}

impl ConnectivityError {
    /// Returns the HTTP status code if the server answered at all.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            Self::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
