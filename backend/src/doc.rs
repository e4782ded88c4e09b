//! OpenAPI documentation configuration.
//!
//! [`ApiDoc`] registers every complaint and health endpoint together with the
//! schema wrappers from [`crate::inbound::http::schemas`], which keep domain
//! types free of utoipa derives. The document is served by Swagger UI in
//! debug builds and printed by `cargo run --bin openapi-dump`.

use utoipa::OpenApi;

use crate::inbound::http::complaints::{
    ComplaintRequestBody, ComplaintResponseBody, DeleteComplaintResponseBody,
};
use crate::inbound::http::schemas::{ErrorCodeSchema, ErrorSchema, PrioritySchema};

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Complaint tracking API",
        description = "Create, list, read, update, and delete customer complaints."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::complaints::create_complaint,
        crate::inbound::http::complaints::list_complaints,
        crate::inbound::http::complaints::get_complaint,
        crate::inbound::http::complaints::update_complaint,
        crate::inbound::http::complaints::delete_complaint,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ComplaintRequestBody,
        ComplaintResponseBody,
        DeleteComplaintResponseBody,
        PrioritySchema,
        ErrorSchema,
        ErrorCodeSchema
    )),
    tags(
        (name = "complaints", description = "Complaint records"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    //! Schema field structure. Path registration is covered by
    //! `tests/openapi_schemas_bdd.rs`.

    use rstest::rstest;
    use utoipa::openapi::RefOr;
    use utoipa::openapi::schema::Schema;

    use super::*;

    fn schema_fields(name: &str) -> Vec<String> {
        let doc = ApiDoc::openapi();
        let schemas = &doc.components.as_ref().expect("components").schemas;
        match schemas.get(name).expect("schema registered") {
            RefOr::T(Schema::Object(obj)) => obj.properties.keys().cloned().collect(),
            _ => panic!("expected Object schema for {name}"),
        }
    }

    #[rstest]
    #[case("Error", &["code", "message", "traceId", "details"])]
    #[case(
        "ComplaintResponseBody",
        &["id", "userName", "issue", "priority", "createdAt", "updatedAt"]
    )]
    #[case("ComplaintRequestBody", &["userName", "issue", "priority"])]
    #[case("DeleteComplaintResponseBody", &["message", "id"])]
    fn schemas_use_camel_case_fields(#[case] name: &str, #[case] expected: &[&str]) {
        let fields = schema_fields(name);

        for field in expected {
            assert!(fields.iter().any(|f| f == field), "{name} lacks {field}");
        }
    }
}
