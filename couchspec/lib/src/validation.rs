//! Consistency checks for an assembled document.
//!
//! The catalogs are static data, so any failure here is a defect in the
//! catalog itself rather than in the server being described.
//!
//! ## Validation Checks
//!
//! - **Path parameters**: every `{placeholder}` has exactly one path
//!   parameter and every path parameter has exactly one placeholder
//! - **Operation ids**: unique across the document
//! - **References**: every `$ref` resolves to a component schema
//! - **Security**: exactly one scheme, referenced by the global requirement
//!
//! ## Examples
//!
//! ```
//! use couchspec::assembler::assemble;
//! use couchspec::probe::ServerInfo;
//! use couchspec::validation::validate_document;
//!
//! let info = ServerInfo::from_json(serde_json::json!({ "version": "3.3.0" })).unwrap();
//! let doc = assemble(&info, "http://localhost:5984", "3.0.0");
//! assert!(validate_document(&doc).is_ok());
//! ```

use std::collections::{BTreeMap, HashMap};

use crate::error::CatalogError;
use crate::openapi::{OpenApiDocument, Operation, Schema};
use crate::parser::extract_path_params;

/// Runs every check against `doc`, stopping at the first failure.
///
/// ## Errors
///
/// Returns the [`CatalogError`] variant describing the first defect found.
pub fn validate_document(doc: &OpenApiDocument) -> Result<(), CatalogError> {
    validate_security(doc)?;

    for path in doc.paths.keys() {
        validate_placeholders(path)?;
    }

    let mut operation_ids: HashMap<&str, String> = HashMap::new();
    for (path, method, operation) in doc.operations() {
        let location = format!("{method} {path}");

        validate_path_params(path, &location, operation)?;

        for schema in operation.schemas() {
            validate_references(schema, &location, &doc.components.schemas)?;
        }

        if let Some(first) = operation_ids.insert(&operation.operation_id, location.clone()) {
            return Err(CatalogError::DuplicateOperationId {
                operation_id: operation.operation_id.clone(),
                first,
                second: location,
            });
        }
    }

    for (name, schema) in &doc.components.schemas {
        let location = format!("components.schemas.{name}");
        validate_references(schema, &location, &doc.components.schemas)?;
    }

    Ok(())
}

fn validate_security(doc: &OpenApiDocument) -> Result<(), CatalogError> {
    let schemes = &doc.components.security_schemes;
    if schemes.len() != 1 {
        return Err(CatalogError::SecurityMismatch(format!(
            "expected exactly one security scheme, found {}",
            schemes.len()
        )));
    }

    if doc.security.is_empty() {
        return Err(CatalogError::SecurityMismatch(
            "no global security requirement".to_string(),
        ));
    }

    for requirement in &doc.security {
        if let Some(unknown) = requirement.keys().find(|name| !schemes.contains_key(*name)) {
            return Err(CatalogError::SecurityMismatch(format!(
                "global requirement references unknown scheme '{unknown}'"
            )));
        }
    }

    Ok(())
}

fn validate_placeholders(path: &str) -> Result<(), CatalogError> {
    let placeholders = extract_path_params(path);
    for (idx, name) in placeholders.iter().enumerate() {
        if placeholders[..idx].contains(name) {
            return Err(CatalogError::DuplicatePlaceholder {
                path: path.to_string(),
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

fn validate_path_params(
    path: &str,
    location: &str,
    operation: &Operation,
) -> Result<(), CatalogError> {
    let placeholders = extract_path_params(path);
    let path_params: Vec<&str> = operation
        .parameters
        .iter()
        .filter(|p| p.is_path())
        .map(|p| p.name.as_str())
        .collect();

    let mismatch = |name: &str| CatalogError::PathParameterMismatch {
        location: location.to_string(),
        name: name.to_string(),
    };

    for name in &placeholders {
        if path_params.iter().filter(|p| *p == name).count() != 1 {
            return Err(mismatch(*name));
        }
    }

    for name in &path_params {
        if !placeholders.contains(name) {
            return Err(mismatch(*name));
        }
    }

    Ok(())
}

fn validate_references(
    schema: &Schema,
    location: &str,
    schemas: &BTreeMap<String, Schema>,
) -> Result<(), CatalogError> {
    for reference in schema.references() {
        let resolved = reference
            .strip_prefix(crate::openapi::COMPONENT_SCHEMA_PREFIX)
            .is_some_and(|name| schemas.contains_key(name));

        if !resolved {
            return Err(CatalogError::DanglingReference {
                location: location.to_string(),
                reference: reference.to_string(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::method::RestMethod;
    use crate::openapi::{EndpointSpec, Info, Parameter, Response, SecurityScheme};

    fn base() -> OpenApiDocument {
        OpenApiDocument::new("3.0.0", Info::new("Test", "1.0"))
            .with_schemas(catalog::schemas())
            .add_security_scheme("basicAuth", SecurityScheme::http_basic())
            .with_global_security(["basicAuth"])
    }

    #[test]
    fn full_catalog_passes() {
        let doc = base().add_endpoints(catalog::endpoints());
        assert!(validate_document(&doc).is_ok());
    }

    #[test]
    fn stray_path_param_is_rejected() {
        let doc = base().add_endpoint(
            EndpointSpec::new("broken", RestMethod::Get, "/{db}")
                .with_parameter(Parameter::path("docid"))
                .with_response(200, Response::new("ok")),
        );

        match validate_document(&doc) {
            Err(CatalogError::PathParameterMismatch { location, name }) => {
                assert_eq!(location, "GET /{db}");
                assert_eq!(name, "docid");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn missing_path_param_is_rejected() {
        let mut doc = base().add_endpoint(
            EndpointSpec::new("getDatabase", RestMethod::Get, "/{db}")
                .with_response(200, Response::new("ok")),
        );
        for item in doc.paths.values_mut() {
            for operation in item.values_mut() {
                operation.parameters.clear();
            }
        }

        assert!(matches!(
            validate_document(&doc),
            Err(CatalogError::PathParameterMismatch { name, .. }) if name == "db"
        ));
    }

    #[test]
    fn repeated_placeholder_is_rejected() {
        let doc = base().add_endpoint(
            EndpointSpec::new("twice", RestMethod::Get, "/{db}/{db}")
                .with_response(200, Response::new("ok")),
        );

        assert!(matches!(
            validate_document(&doc),
            Err(CatalogError::DuplicatePlaceholder { name, .. }) if name == "db"
        ));
    }

    #[test]
    fn duplicate_operation_id_is_rejected() {
        let doc = base().add_endpoints([
            EndpointSpec::new("same", RestMethod::Get, "/_all_dbs")
                .with_response(200, Response::new("ok")),
            EndpointSpec::new("same", RestMethod::Post, "/_replicate")
                .with_response(200, Response::new("ok")),
        ]);

        let err = validate_document(&doc).unwrap_err();
        assert!(matches!(err, CatalogError::DuplicateOperationId { .. }));
        assert!(err.to_string().contains("'same'"));
    }

    #[test]
    fn dangling_operation_reference_is_rejected() {
        let doc = base().add_endpoint(
            EndpointSpec::new("getThing", RestMethod::Get, "/thing")
                .with_response(200, Response::new("ok").with_json(Schema::reference("Missing"))),
        );

        match validate_document(&doc) {
            Err(CatalogError::DanglingReference { location, reference }) => {
                assert_eq!(location, "GET /thing");
                assert_eq!(reference, "#/components/schemas/Missing");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn dangling_schema_reference_is_rejected() {
        let mut schemas = catalog::schemas();
        schemas.insert(
            "Broken".to_string(),
            Schema::object().property("inner", Schema::reference("Nowhere")),
        );
        let doc = base().with_schemas(schemas);

        assert!(matches!(
            validate_document(&doc),
            Err(CatalogError::DanglingReference { location, .. })
                if location == "components.schemas.Broken"
        ));
    }

    #[test]
    fn security_must_reference_single_scheme() {
        let none = OpenApiDocument::new("3.0.0", Info::new("Test", "1.0"));
        assert!(matches!(
            validate_document(&none),
            Err(CatalogError::SecurityMismatch(_))
        ));

        let unreferenced = OpenApiDocument::new("3.0.0", Info::new("Test", "1.0"))
            .add_security_scheme("basicAuth", SecurityScheme::http_basic());
        assert!(matches!(
            validate_document(&unreferenced),
            Err(CatalogError::SecurityMismatch(_))
        ));

        let wrong_name = base().with_global_security(["tokenAuth"]);
        let err = validate_document(&wrong_name).unwrap_err();
        assert!(err.to_string().contains("tokenAuth"));
    }
}
