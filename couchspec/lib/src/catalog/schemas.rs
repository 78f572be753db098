//! Component schemas for CouchDB request and response bodies.
//!
//! Schemas refer to each other only through `$ref`, never by inlining.

use std::collections::BTreeMap;

use crate::openapi::Schema;

/// Returns every component schema keyed by name.
///
/// ## Examples
///
/// ```
/// let schemas = couchspec::catalog::schemas();
/// assert!(schemas.contains_key("Document"));
/// assert!(schemas.contains_key("ErrorResponse"));
/// ```
pub fn schemas() -> BTreeMap<String, Schema> {
    [
        ("ServerInfo", server_info()),
        ("DatabaseInfo", database_info()),
        ("AllDocsResponse", all_docs_response()),
        ("UserDocument", user_document()),
        ("Document", document()),
        ("DocumentResponse", document_response()),
        ("MangoQuery", mango_query()),
        ("MangoResponse", mango_response()),
        ("ChangesResponse", changes_response()),
        ("BulkDocsRequest", bulk_docs_request()),
        ("DesignDocument", design_document()),
        ("ViewQuery", view_query()),
        ("ViewResponse", view_response()),
        ("ReplicationRequest", replication_request()),
        ("ReplicationResponse", replication_response()),
        ("ErrorResponse", error_response()),
    ]
    .into_iter()
    .map(|(name, schema)| (name.to_string(), schema))
    .collect()
}

fn server_info() -> Schema {
    Schema::object()
        .property("couchdb", Schema::string())
        .property("version", Schema::string())
        .property("git_sha", Schema::string())
        .property("uuid", Schema::string())
        .property("features", Schema::array(Schema::string()))
        .property(
            "vendor",
            Schema::object()
                .property("name", Schema::string())
                .property("version", Schema::string()),
        )
}

fn database_info() -> Schema {
    Schema::object()
        .property("db_name", Schema::string())
        .property("doc_count", Schema::integer())
        .property("doc_del_count", Schema::integer())
        .property("update_seq", Schema::integer())
        .property("purge_seq", Schema::integer())
        .property("compact_running", Schema::boolean())
        .property("disk_size", Schema::integer())
        .property("data_size", Schema::integer())
        .property("instance_start_time", Schema::string())
        .property("disk_format_version", Schema::integer())
}

fn all_docs_response() -> Schema {
    let row = Schema::object()
        .property("id", Schema::string())
        .property("key", Schema::string())
        .property("value", Schema::object())
        .property("doc", Schema::object());

    Schema::object()
        .property("total_rows", Schema::integer())
        .property("offset", Schema::integer())
        .property("rows", Schema::array(row))
}

fn user_document() -> Schema {
    Schema::object()
        .with_required(["name", "password", "type", "roles"])
        .property("_id", Schema::string())
        .property("_rev", Schema::string())
        .property("name", Schema::string())
        .property("password", Schema::string())
        .property("type", Schema::string().with_enum(["user"]))
        .property("roles", Schema::array(Schema::string()))
}

fn document() -> Schema {
    Schema::object()
        .property("_id", Schema::string())
        .property("_rev", Schema::string())
        .property("_deleted", Schema::boolean())
        .property("_attachments", Schema::object())
        .property("_revisions", Schema::object())
        .property("_revs_info", Schema::array(Schema::object()))
        .allow_additional_properties()
}

fn document_response() -> Schema {
    Schema::object()
        .property("ok", Schema::boolean())
        .property("id", Schema::string())
        .property("rev", Schema::string())
}

fn mango_query() -> Schema {
    Schema::object()
        .with_required(["selector"])
        .property(
            "selector",
            Schema::object()
                .with_description("JSON object describing criteria used to select documents"),
        )
        .property(
            "limit",
            Schema::integer().with_description("Maximum number of results returned"),
        )
        .property(
            "skip",
            Schema::integer().with_description("Skip the first 'n' results"),
        )
        .property(
            "sort",
            Schema::array(Schema::object()).with_description("Array of field name direction pairs"),
        )
        .property(
            "fields",
            Schema::array(Schema::string()).with_description("Array of field names to return"),
        )
        .property(
            "use_index",
            Schema::array(Schema::string()).with_description("Index to use for query"),
        )
}

fn mango_response() -> Schema {
    Schema::object()
        .property("docs", Schema::array(Schema::reference("Document")))
        .property("bookmark", Schema::string())
        .property("warning", Schema::string())
}

fn changes_response() -> Schema {
    let change = Schema::object()
        .property("seq", Schema::string())
        .property("id", Schema::string())
        .property(
            "changes",
            Schema::array(Schema::object().property("rev", Schema::string())),
        )
        .property("deleted", Schema::boolean())
        .property("doc", Schema::reference("Document"));

    Schema::object()
        .property("results", Schema::array(change))
        .property("last_seq", Schema::string())
        .property("pending", Schema::integer())
}

fn bulk_docs_request() -> Schema {
    Schema::object()
        .with_required(["docs"])
        .property("docs", Schema::array(Schema::reference("Document")))
        .property("new_edits", Schema::boolean().with_default(true))
}

fn design_document() -> Schema {
    let view = Schema::object()
        .property("map", Schema::string())
        .property("reduce", Schema::string());

    Schema::object()
        .with_required(["_id", "views"])
        .property("_id", Schema::string())
        .property("_rev", Schema::string())
        .property("language", Schema::string().with_default("javascript"))
        .property(
            "views",
            Schema::object()
                .with_description("Map of view names to view definitions")
                .with_additional_properties(view),
        )
        .property("filters", Schema::object())
        .property("lists", Schema::object())
        .property("shows", Schema::object())
        .property("updates", Schema::object())
        .property("validate_doc_update", Schema::string())
        .property("autoupdate", Schema::boolean())
}

fn view_query() -> Schema {
    Schema::object()
        .property("key", Schema::string().with_description("Key to query"))
        .property(
            "keys",
            Schema::array(Schema::string()).with_description("Array of keys to query"),
        )
        .property("startkey", Schema::string().with_description("Start key"))
        .property("endkey", Schema::string().with_description("End key"))
        .property("startkey_docid", Schema::string())
        .property("endkey_docid", Schema::string())
        .property(
            "limit",
            Schema::integer().with_description("Maximum number of results"),
        )
        .property(
            "skip",
            Schema::integer().with_description("Skip the first 'n' results"),
        )
        .property("descending", Schema::boolean().with_default(false))
        .property("include_docs", Schema::boolean().with_default(false))
        .property("inclusive_end", Schema::boolean().with_default(true))
        .property("reduce", Schema::boolean().with_default(true))
        .property("group", Schema::boolean().with_default(false))
        .property("group_level", Schema::integer())
}

fn view_response() -> Schema {
    let row = Schema::object()
        .property("id", Schema::string())
        .property("key", Schema::string())
        .property("value", Schema::object())
        .property("doc", Schema::reference("Document"));

    Schema::object()
        .property("total_rows", Schema::integer())
        .property("offset", Schema::integer())
        .property("rows", Schema::array(row))
}

fn replication_request() -> Schema {
    Schema::object()
        .with_required(["source", "target"])
        .property(
            "source",
            Schema::string().with_description("Source database URL or name"),
        )
        .property(
            "target",
            Schema::string().with_description("Target database URL or name"),
        )
        .property("create_target", Schema::boolean().with_default(false))
        .property("continuous", Schema::boolean().with_default(false))
        .property(
            "doc_ids",
            Schema::array(Schema::string()).with_description("Array of document IDs to replicate"),
        )
        .property("filter", Schema::string())
        .property("query_params", Schema::object())
}

fn replication_response() -> Schema {
    let session = [
        "start_last_seq",
        "end_last_seq",
        "recorded_seq",
        "missing_checked",
        "missing_found",
        "docs_read",
        "docs_written",
        "doc_write_failures",
    ]
    .into_iter()
    .fold(
        Schema::object()
            .property("session_id", Schema::string())
            .property("start_time", Schema::string())
            .property("end_time", Schema::string()),
        |schema, counter| schema.property(counter, Schema::integer()),
    );

    Schema::object()
        .property("ok", Schema::boolean())
        .property("session_id", Schema::string())
        .property("source_last_seq", Schema::integer())
        .property("history", Schema::array(session))
}

/// CouchDB's failure body, e.g. `{"error":"not_found","reason":"missing"}`.
fn error_response() -> Schema {
    Schema::object()
        .with_required(["error", "reason"])
        .property(
            "error",
            Schema::string().with_description("Error identifier, such as not_found or conflict"),
        )
        .property(
            "reason",
            Schema::string().with_description("Human-readable explanation"),
        )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openapi::{AdditionalProperties, SchemaKind};
    use serde_json::json;

    fn walk<'a>(schema: &'a Schema, out: &mut Vec<&'a Schema>) {
        out.push(schema);
        for property in schema.properties.values() {
            walk(property, out);
        }
        if let Some(items) = &schema.items {
            walk(items, out);
        }
        if let Some(AdditionalProperties::Schema(extra)) = &schema.additional_properties {
            walk(extra, out);
        }
    }

    #[test]
    fn catalog_has_all_schemas() {
        let names: Vec<_> = schemas().into_keys().collect();
        assert_eq!(names.len(), 16);
        for expected in [
            "AllDocsResponse",
            "BulkDocsRequest",
            "ChangesResponse",
            "DatabaseInfo",
            "DesignDocument",
            "Document",
            "DocumentResponse",
            "ErrorResponse",
            "MangoQuery",
            "MangoResponse",
            "ReplicationRequest",
            "ReplicationResponse",
            "ServerInfo",
            "UserDocument",
            "ViewQuery",
            "ViewResponse",
        ] {
            assert!(names.iter().any(|n| n == expected), "missing {expected}");
        }
    }

    #[test]
    fn every_array_declares_items() {
        for (name, schema) in schemas() {
            let mut nodes = Vec::new();
            walk(&schema, &mut nodes);
            for node in nodes {
                if node.kind == Some(SchemaKind::Array) {
                    assert!(node.items.is_some(), "array without items in {name}");
                }
            }
        }
    }

    #[test]
    fn internal_references_resolve() {
        let catalog = schemas();
        for (name, schema) in &catalog {
            for reference in schema.references() {
                let target = reference
                    .strip_prefix(crate::openapi::COMPONENT_SCHEMA_PREFIX)
                    .unwrap_or(reference);
                assert!(catalog.contains_key(target), "{name} -> {reference}");
            }
        }
    }

    #[test]
    fn user_document_shape() {
        let value = serde_json::to_value(&schemas()["UserDocument"]).unwrap();
        assert_eq!(value["required"], json!(["name", "password", "type", "roles"]));
        assert_eq!(value["properties"]["type"]["enum"], json!(["user"]));
    }

    #[test]
    fn document_allows_additional_properties() {
        let value = serde_json::to_value(&schemas()["Document"]).unwrap();
        assert_eq!(value["additionalProperties"], true);
    }

    #[test]
    fn defaults_are_carried() {
        let catalog = schemas();
        let bulk = serde_json::to_value(&catalog["BulkDocsRequest"]).unwrap();
        assert_eq!(bulk["properties"]["new_edits"]["default"], true);

        let design = serde_json::to_value(&catalog["DesignDocument"]).unwrap();
        assert_eq!(design["properties"]["language"]["default"], "javascript");
        assert_eq!(
            design["properties"]["views"]["additionalProperties"]["properties"]["map"]["type"],
            "string"
        );
    }

    #[test]
    fn nested_documents_use_references() {
        let value = serde_json::to_value(&schemas()["MangoResponse"]).unwrap();
        assert_eq!(
            value["properties"]["docs"]["items"],
            json!({ "$ref": "#/components/schemas/Document" })
        );
    }
}
