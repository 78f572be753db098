//! Server probe: one authenticated `GET {base_url}/` returning the server's
//! identity document.
//!
//! ## Examples
//!
//! ```rust,ignore
//! use couchspec::probe::{Credentials, ProbeClient};
//!
//! let client = ProbeClient::builder("http://localhost:5984")
//!     .credentials(Credentials::from_parts(Some("admin".into()), Some("secret".into())))
//!     .build()?;
//!
//! let info = client.server_info().await?;
//! println!("CouchDB {}", info.version());
//! ```

use std::fmt;
use std::time::Duration;

use serde_json::{Map, Value};
use tracing::{Span, debug, info, instrument, warn};
use url::Url;

use crate::error::ConnectivityError;

/// Version reported when the server omits `version` or it is not a string.
pub const UNKNOWN_VERSION: &str = "unknown";

/// HTTP Basic credentials.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Pairs optional CLI inputs into credentials.
    ///
    /// Both parts must be present and non-empty; a lone username or a lone
    /// password disables authentication instead of failing.
    ///
    /// ## Examples
    ///
    /// ```
    /// use couchspec::probe::Credentials;
    ///
    /// assert!(Credentials::from_parts(Some("admin".into()), Some("secret".into())).is_some());
    /// assert!(Credentials::from_parts(Some("admin".into()), None).is_none());
    /// assert!(Credentials::from_parts(None, None).is_none());
    /// ```
    pub fn from_parts(username: Option<String>, password: Option<String>) -> Option<Self> {
        let username = username.filter(|u| !u.is_empty());
        let password = password.filter(|p| !p.is_empty());

        match (username, password) {
            (Some(username), Some(password)) => Some(Self { username, password }),
            (None, None) => None,
            (username, _) => {
                debug!(
                    has_username = username.is_some(),
                    "Only one credential supplied; sending the probe unauthenticated"
                );
                None
            }
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// The JSON object returned by the server root.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerInfo(Map<String, Value>);

impl ServerInfo {
    /// Wraps a parsed body, which must be a JSON object.
    ///
    /// ## Errors
    ///
    /// Returns [`ConnectivityError::UnexpectedBody`] for any other JSON value.
    pub fn from_json(value: Value) -> Result<Self, ConnectivityError> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(ConnectivityError::UnexpectedBody(
                json_kind(&other).to_string(),
            )),
        }
    }

    /// The server's `version`, or [`UNKNOWN_VERSION`].
    pub fn version(&self) -> &str {
        self.0
            .get("version")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN_VERSION)
    }

    pub fn has_version(&self) -> bool {
        self.0.get("version").is_some_and(Value::is_string)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Builder for configuring a [`ProbeClient`].
#[derive(Debug)]
pub struct ProbeClientBuilder {
    base_url: String,
    credentials: Option<Credentials>,
    timeout: Option<Duration>,
}

impl ProbeClientBuilder {
    fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            credentials: None,
            timeout: None,
        }
    }

    pub fn credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    /// Sets the request timeout. `None` waits indefinitely.
    pub fn timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Builds the [`ProbeClient`].
    ///
    /// ## Errors
    ///
    /// Returns [`ConnectivityError::InvalidUrl`] if `{base_url}/` does not
    /// parse, or [`ConnectivityError::Request`] if the HTTP client cannot be
    /// constructed.
    pub fn build(self) -> Result<ProbeClient, ConnectivityError> {
        let base_url = self.base_url.trim_end_matches('/').to_string();
        let probe_url =
            Url::parse(&format!("{base_url}/")).map_err(|source| ConnectivityError::InvalidUrl {
                url: self.base_url.clone(),
                source,
            })?;

        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(ProbeClient {
            client,
            base_url,
            probe_url,
            credentials: self.credentials,
        })
    }
}

/// Async HTTP client for the server probe.
#[derive(Debug)]
pub struct ProbeClient {
    client: reqwest::Client,
    base_url: String,
    probe_url: Url,
    credentials: Option<Credentials>,
}

impl ProbeClient {
    pub fn builder(base_url: impl Into<String>) -> ProbeClientBuilder {
        ProbeClientBuilder::new(base_url)
    }

    /// The base URL with trailing slashes removed.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn is_authenticated(&self) -> bool {
        self.credentials.is_some()
    }

    /// Fetches the server's identity document.
    ///
    /// Sends exactly one request and never retries.
    ///
    /// ## Errors
    ///
    /// - [`ConnectivityError::Request`] on transport failure or timeout
    /// - [`ConnectivityError::HttpStatus`] on a non-2xx status
    /// - [`ConnectivityError::InvalidBody`] if the body is not JSON
    /// - [`ConnectivityError::UnexpectedBody`] if the body is not an object
    #[instrument(
        name = "server_probe",
        level = "debug",
        skip(self),
        fields(
            http.url = %self.probe_url,
            http.status_code = tracing::field::Empty,
            authenticated = self.credentials.is_some(),
        )
    )]
    pub async fn server_info(&self) -> Result<ServerInfo, ConnectivityError> {
        let mut request = self.client.get(self.probe_url.clone());
        if let Some(credentials) = &self.credentials {
            request = request.basic_auth(&credentials.username, Some(&credentials.password));
        }

        let response = request.send().await?;
        let status = response.status();
        Span::current().record("http.status_code", status.as_u16());

        if !status.is_success() {
            let message = match response.text().await {
                Ok(text) if !text.trim().is_empty() => text.trim().to_string(),
                _ => status.to_string(),
            };
            return Err(ConnectivityError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        let body = response.bytes().await?;
        let value: Value = serde_json::from_slice(&body).map_err(ConnectivityError::InvalidBody)?;
        let info = ServerInfo::from_json(value)?;

        if info.has_version() {
            info!(version = info.version(), "CouchDB server probed");
        } else {
            warn!("Server response has no version; reporting '{UNKNOWN_VERSION}'");
        }

        Ok(info)
    }
}
