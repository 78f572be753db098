//! HTTP methods that can appear in an OpenAPI path item.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// HTTP methods for CouchDB endpoints.
///
/// The variant order matches the field order of an OpenAPI path item, so a
/// `BTreeMap<RestMethod, _>` serializes operations in the conventional order.
///
/// ## Examples
///
/// ```rust
/// use couchspec::RestMethod;
///
/// let method = RestMethod::Delete;
/// assert_eq!(method.to_string(), "DELETE");
///
/// let parsed: RestMethod = "HEAD".parse().unwrap();
/// assert_eq!(parsed, RestMethod::Head);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "UPPERCASE")]
pub enum RestMethod {
    /// HTTP GET - Retrieve a resource.
    Get,
    /// HTTP PUT - Create or replace a resource.
    Put,
    /// HTTP POST - Submit a query or trigger an action.
    Post,
    /// HTTP DELETE - Remove a resource.
    Delete,
    /// HTTP HEAD - Retrieve headers only.
    Head,
}
