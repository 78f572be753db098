//! Declarative endpoint descriptors.
//!
//! An [`EndpointSpec`] is one (path template, method) pair plus its contract.
//! Path parameters are derived from the template, so only query parameters
//! are declared by hand.

use std::collections::BTreeMap;

use crate::method::RestMethod;
use crate::parser::extract_path_params;

use super::operation::{Operation, Parameter, RequestBody, Response};

/// One endpoint: a method on a path template, plus its contract.
///
/// ## Examples
///
/// ```
/// use couchspec::RestMethod;
/// use couchspec::openapi::{EndpointSpec, Parameter, Response, Schema};
///
/// let delete = EndpointSpec::new("deleteDocument", RestMethod::Delete, "/{db}/{docid}")
///     .with_summary("Delete document")
///     .with_parameter(Parameter::query("rev", Schema::string()).required())
///     .with_response(200, Response::new("Document deleted successfully"));
///
/// let op = delete.operation();
/// let names: Vec<_> = op.parameters.iter().map(|p| p.name.as_str()).collect();
/// assert_eq!(names, vec!["db", "docid", "rev"]);
/// ```
#[derive(Debug, Clone)]
pub struct EndpointSpec {
    /// Unique identifier, emitted as `operationId`.
    pub id: String,
    pub method: RestMethod,
    /// URL path template (may contain `{param}` placeholders).
    pub path: String,
    pub summary: String,
    pub description: String,
    /// Tags for grouping endpoints.
    pub tags: Vec<String>,
    /// Declared parameters. Path parameters missing here are filled in from
    /// the template when the operation is built.
    pub parameters: Vec<Parameter>,
    pub request_body: Option<RequestBody>,
    pub responses: BTreeMap<String, Response>,
}

impl EndpointSpec {
    pub fn new(id: impl Into<String>, method: RestMethod, path: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            method,
            path: path.into(),
            summary: String::new(),
            description: String::new(),
            tags: Vec::new(),
            parameters: Vec::new(),
            request_body: None,
            responses: BTreeMap::new(),
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = summary.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn with_parameter(mut self, parameter: Parameter) -> Self {
        self.parameters.push(parameter);
        self
    }

    pub fn with_request_body(mut self, body: RequestBody) -> Self {
        self.request_body = Some(body);
        self
    }

    /// Adds the response for `status`, replacing any earlier one.
    pub fn with_response(mut self, status: u16, response: Response) -> Self {
        self.responses.insert(status.to_string(), response);
        self
    }

    /// Builds the operation object.
    ///
    /// Path parameters come first, in template order, followed by the
    /// declared query parameters in declaration order.
    pub fn operation(&self) -> Operation {
        let mut parameters: Vec<Parameter> = extract_path_params(&self.path)
            .into_iter()
            .map(|name| {
                self.parameters
                    .iter()
                    .find(|p| p.is_path() && p.name == name)
                    .cloned()
                    .unwrap_or_else(|| Parameter::path(name))
            })
            .collect();

        // Declared path parameters without a placeholder are kept so the
        // catalog checks can report them.
        let declared: Vec<Parameter> = self
            .parameters
            .iter()
            .filter(|p| !p.is_path() || !parameters.iter().any(|q| q.is_path() && q.name == p.name))
            .cloned()
            .collect();
        parameters.extend(declared);

        Operation {
            operation_id: self.id.clone(),
            summary: self.summary.clone(),
            description: self.description.clone(),
            tags: self.tags.clone(),
            parameters,
            request_body: self.request_body.clone(),
            responses: self.responses.clone(),
        }
    }
}
