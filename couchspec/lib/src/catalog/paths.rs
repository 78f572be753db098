//! The CouchDB endpoint catalog.
//!
//! Each endpoint is one [`EndpointSpec`]; adding an endpoint means adding an
//! entry to [`endpoints`]. Path parameters are derived from the template, so
//! entries only declare query parameters.

use std::collections::BTreeMap;

use crate::method::RestMethod;
use crate::openapi::{EndpointSpec, Parameter, PathItem, RequestBody, Response, Schema};

const TAG_SERVER: &str = "server";
const TAG_DATABASES: &str = "databases";
const TAG_DOCUMENTS: &str = "documents";
const TAG_USERS: &str = "users";
const TAG_DESIGN: &str = "design";
const TAG_ATTACHMENTS: &str = "attachments";
const TAG_REPLICATION: &str = "replication";

const SUCCESS: &str = "Request completed successfully";

/// Every endpoint in catalog order.
pub fn endpoints() -> Vec<EndpointSpec> {
    let mut all = Vec::new();
    all.extend(server_endpoints());
    all.extend(database_endpoints());
    all.extend(user_endpoints());
    all.extend(document_endpoints());
    all.extend(design_endpoints());
    all.extend(attachment_endpoints());
    all.extend(replication_endpoints());
    all
}

/// The endpoints grouped by path template, then by method.
///
/// ## Examples
///
/// ```
/// use couchspec::RestMethod;
///
/// let paths = couchspec::catalog::paths();
/// let delete = &paths["/{db}/{docid}"][&RestMethod::Delete];
/// assert_eq!(delete.operation_id, "deleteDocument");
/// ```
pub fn paths() -> BTreeMap<String, PathItem> {
    let mut paths: BTreeMap<String, PathItem> = BTreeMap::new();
    for endpoint in endpoints() {
        paths
            .entry(endpoint.path.clone())
            .or_default()
            .insert(endpoint.method, endpoint.operation());
    }
    paths
}

fn json_response(description: &str, schema: &str) -> Response {
    Response::new(description).with_json(Schema::reference(schema))
}

/// A failure response carrying CouchDB's `{error, reason}` body.
fn failure(description: &str) -> Response {
    json_response(description, "ErrorResponse")
}

fn rev() -> Parameter {
    Parameter::query("rev", Schema::string()).with_description("Document revision")
}

fn flag(name: &str, description: &str) -> Parameter {
    Parameter::query(name, Schema::boolean()).with_description(description)
}

fn server_endpoints() -> Vec<EndpointSpec> {
    vec![
        EndpointSpec::new("getServerInfo", RestMethod::Get, "/")
            .with_summary("Get server information")
            .with_description("Accesses the root of a CouchDB instance")
            .with_tag(TAG_SERVER)
            .with_response(200, json_response(SUCCESS, "ServerInfo")),
        EndpointSpec::new("listDatabases", RestMethod::Get, "/_all_dbs")
            .with_summary("List all databases")
            .with_description("Returns a list of all the databases in the CouchDB instance")
            .with_tag(TAG_SERVER)
            .with_response(
                200,
                Response::new(SUCCESS).with_json(Schema::array(Schema::string())),
            ),
    ]
}

fn database_endpoints() -> Vec<EndpointSpec> {
    vec![
        EndpointSpec::new("createDatabase", RestMethod::Put, "/{db}")
            .with_summary("Create database")
            .with_description("Creates a new database")
            .with_tag(TAG_DATABASES)
            .with_response(201, json_response("Database created successfully", "DocumentResponse"))
            .with_response(400, failure("Invalid database name"))
            .with_response(412, failure("Database already exists")),
        EndpointSpec::new("getDatabase", RestMethod::Get, "/{db}")
            .with_summary("Get database information")
            .with_description("Gets information about the specified database")
            .with_tag(TAG_DATABASES)
            .with_response(200, json_response(SUCCESS, "DatabaseInfo"))
            .with_response(404, failure("Database not found")),
        EndpointSpec::new("deleteDatabase", RestMethod::Delete, "/{db}")
            .with_summary("Delete database")
            .with_description("Deletes the specified database")
            .with_tag(TAG_DATABASES)
            .with_response(200, json_response("Database deleted successfully", "DocumentResponse"))
            .with_response(404, failure("Database not found")),
        EndpointSpec::new("listAllDocs", RestMethod::Get, "/{db}/_all_docs")
            .with_summary("Get all documents")
            .with_description("Returns all documents in the database")
            .with_tag(TAG_DATABASES)
            .with_response(200, json_response(SUCCESS, "AllDocsResponse")),
        EndpointSpec::new("getChanges", RestMethod::Get, "/{db}/_changes")
            .with_summary("Get database changes")
            .with_description("Returns a list of changes made to documents in the database")
            .with_tag(TAG_DATABASES)
            .with_parameter(
                Parameter::query(
                    "feed",
                    Schema::string().with_enum(["normal", "longpoll", "continuous", "eventsource"]),
                )
                .with_description("Type of feed"),
            )
            .with_parameter(
                Parameter::query("since", Schema::string())
                    .with_description("Start from this sequence number"),
            )
            .with_parameter(
                Parameter::query("limit", Schema::integer())
                    .with_description("Maximum number of results"),
            )
            .with_parameter(flag("include_docs", "Include document bodies"))
            .with_response(200, json_response(SUCCESS, "ChangesResponse")),
    ]
}

fn user_endpoints() -> Vec<EndpointSpec> {
    vec![
        EndpointSpec::new("getUsersDatabase", RestMethod::Get, "/_users")
            .with_summary("Get users database info")
            .with_description("Accesses the internal users database")
            .with_tag(TAG_USERS)
            .with_response(200, json_response(SUCCESS, "DatabaseInfo")),
        EndpointSpec::new("getUser", RestMethod::Get, "/_users/{user_id}")
            .with_summary("Get user document")
            .with_description("Gets a user document from the users database")
            .with_tag(TAG_USERS)
            .with_response(200, json_response(SUCCESS, "UserDocument"))
            .with_response(404, failure("User not found")),
        EndpointSpec::new("putUser", RestMethod::Put, "/_users/{user_id}")
            .with_summary("Create/update user")
            .with_description("Creates or updates a user document")
            .with_tag(TAG_USERS)
            .with_request_body(RequestBody::json(Schema::reference("UserDocument")))
            .with_response(
                201,
                json_response("User created/updated successfully", "DocumentResponse"),
            ),
    ]
}

fn document_endpoints() -> Vec<EndpointSpec> {
    vec![
        EndpointSpec::new("getDocument", RestMethod::Get, "/{db}/{docid}")
            .with_summary("Get document")
            .with_description("Gets a document from the specified database")
            .with_tag(TAG_DOCUMENTS)
            .with_parameter(rev())
            .with_parameter(flag("revs", "Include revision history"))
            .with_parameter(flag("revs_info", "Include revision info"))
            .with_parameter(flag("attachments", "Include attachments"))
            .with_response(200, json_response(SUCCESS, "Document"))
            .with_response(404, failure("Document not found")),
        // Creation carries no rev; updates put it in the body's `_rev`.
        EndpointSpec::new("putDocument", RestMethod::Put, "/{db}/{docid}")
            .with_summary("Create/update document")
            .with_description("Creates or updates a document in the specified database")
            .with_tag(TAG_DOCUMENTS)
            .with_request_body(RequestBody::json(Schema::reference("Document")))
            .with_response(
                201,
                json_response("Document created/updated successfully", "DocumentResponse"),
            )
            .with_response(400, failure("Invalid request"))
            .with_response(409, failure("Document conflict")),
        EndpointSpec::new("deleteDocument", RestMethod::Delete, "/{db}/{docid}")
            .with_summary("Delete document")
            .with_description("Deletes a document from the specified database")
            .with_tag(TAG_DOCUMENTS)
            .with_parameter(rev().required())
            .with_response(200, json_response("Document deleted successfully", "DocumentResponse"))
            .with_response(404, failure("Document not found"))
            .with_response(409, failure("Document conflict")),
        EndpointSpec::new("headDocument", RestMethod::Head, "/{db}/{docid}")
            .with_summary("Check document existence")
            .with_description("Checks if a document exists in the specified database")
            .with_tag(TAG_DOCUMENTS)
            .with_response(200, Response::new("Document exists"))
            .with_response(404, Response::new("Document not found")),
        EndpointSpec::new("findDocuments", RestMethod::Post, "/{db}/_find")
            .with_summary("Query documents using Mango")
            .with_description("Query documents using the Mango query syntax")
            .with_tag(TAG_DOCUMENTS)
            .with_request_body(RequestBody::json(Schema::reference("MangoQuery")))
            .with_response(200, json_response(SUCCESS, "MangoResponse"))
            .with_response(400, failure("Invalid query")),
        EndpointSpec::new("bulkDocs", RestMethod::Post, "/{db}/_bulk_docs")
            .with_summary("Bulk document operations")
            .with_description("Performs bulk document operations (create, update, delete)")
            .with_tag(TAG_DOCUMENTS)
            .with_request_body(RequestBody::json(Schema::reference("BulkDocsRequest")))
            .with_response(
                201,
                Response::new("Bulk operations completed")
                    .with_json(Schema::array(Schema::reference("DocumentResponse"))),
            ),
    ]
}

fn design_endpoints() -> Vec<EndpointSpec> {
    vec![
        EndpointSpec::new("getDesignDocument", RestMethod::Get, "/{db}/_design/{ddoc}")
            .with_summary("Get design document")
            .with_description("Gets a design document from the specified database")
            .with_tag(TAG_DESIGN)
            .with_response(200, json_response(SUCCESS, "DesignDocument"))
            .with_response(404, failure("Design document not found")),
        EndpointSpec::new("putDesignDocument", RestMethod::Put, "/{db}/_design/{ddoc}")
            .with_summary("Create/update design document")
            .with_description("Creates or updates a design document in the specified database")
            .with_tag(TAG_DESIGN)
            .with_request_body(RequestBody::json(Schema::reference("DesignDocument")))
            .with_response(
                201,
                json_response(
                    "Design document created/updated successfully",
                    "DocumentResponse",
                ),
            ),
        EndpointSpec::new("deleteDesignDocument", RestMethod::Delete, "/{db}/_design/{ddoc}")
            .with_summary("Delete design document")
            .with_description("Deletes a design document from the specified database")
            .with_tag(TAG_DESIGN)
            .with_parameter(rev().required())
            .with_response(
                200,
                json_response("Design document deleted successfully", "DocumentResponse"),
            )
            .with_response(404, failure("Design document not found"))
            .with_response(409, failure("Document conflict")),
        EndpointSpec::new("queryView", RestMethod::Get, "/{db}/_design/{ddoc}/_view/{view}")
            .with_summary("Query a view")
            .with_description("Queries a view from a design document")
            .with_tag(TAG_DESIGN)
            .with_parameter(
                Parameter::query("key", Schema::string()).with_description("Key to query"),
            )
            .with_parameter(
                Parameter::query("startkey", Schema::string()).with_description("Start key"),
            )
            .with_parameter(
                Parameter::query("endkey", Schema::string()).with_description("End key"),
            )
            .with_parameter(
                Parameter::query("limit", Schema::integer())
                    .with_description("Maximum number of results"),
            )
            .with_parameter(flag("include_docs", "Include document bodies"))
            .with_response(200, json_response(SUCCESS, "ViewResponse")),
        EndpointSpec::new("postView", RestMethod::Post, "/{db}/_design/{ddoc}/_view/{view}")
            .with_summary("Query a view with POST")
            .with_description("Queries a view from a design document using POST method")
            .with_tag(TAG_DESIGN)
            .with_request_body(RequestBody::json(Schema::reference("ViewQuery")).optional())
            .with_response(200, json_response(SUCCESS, "ViewResponse")),
    ]
}

fn attachment_endpoints() -> Vec<EndpointSpec> {
    const PATH: &str = "/{db}/{docid}/{attachment}";

    vec![
        EndpointSpec::new("getAttachment", RestMethod::Get, PATH)
            .with_summary("Get attachment")
            .with_description("Gets an attachment from a document")
            .with_tag(TAG_ATTACHMENTS)
            .with_parameter(rev())
            .with_response(200, Response::new(SUCCESS).with_binary())
            .with_response(404, failure("Attachment not found")),
        EndpointSpec::new("putAttachment", RestMethod::Put, PATH)
            .with_summary("Add/update attachment")
            .with_description("Adds or updates an attachment to a document")
            .with_tag(TAG_ATTACHMENTS)
            .with_parameter(rev().required())
            .with_request_body(RequestBody::binary())
            .with_response(
                201,
                json_response("Attachment added/updated successfully", "DocumentResponse"),
            )
            .with_response(409, failure("Document conflict")),
        EndpointSpec::new("deleteAttachment", RestMethod::Delete, PATH)
            .with_summary("Delete attachment")
            .with_description("Deletes an attachment from a document")
            .with_tag(TAG_ATTACHMENTS)
            .with_parameter(rev().required())
            .with_response(
                200,
                json_response("Attachment deleted successfully", "DocumentResponse"),
            )
            .with_response(404, failure("Attachment not found"))
            .with_response(409, failure("Document conflict")),
    ]
}

fn replication_endpoints() -> Vec<EndpointSpec> {
    vec![
        EndpointSpec::new("replicate", RestMethod::Post, "/_replicate")
            .with_summary("Replicate database")
            .with_description("Replicates a database from source to target")
            .with_tag(TAG_REPLICATION)
            .with_request_body(RequestBody::json(Schema::reference("ReplicationRequest")))
            .with_response(200, json_response("Replication started", "ReplicationResponse")),
    ]
}
