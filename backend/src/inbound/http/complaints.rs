//! Complaint HTTP handlers.
//!
//! ```text
//! POST   /api/complaints
//! GET    /api/complaints
//! GET    /api/complaints/{id}
//! PUT    /api/complaints/{id}
//! DELETE /api/complaints/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ports::{
    ComplaintFieldsInput, ComplaintPayload, CreateComplaintRequest, DeleteComplaintRequest,
    GetComplaintRequest, PriorityInput, UpdateComplaintRequest,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, PrioritySchema};
use crate::inbound::http::state::HttpState;

/// Acknowledgement message returned after a delete.
pub const DELETED_MESSAGE: &str = "Complaint deleted successfully";

/// Request payload for creating or replacing a complaint.
///
/// Fields stay optional here so that missing values are reported through the
/// same validation envelope as blank ones.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintRequestBody {
    #[schema(example = "Ada Lovelace")]
    pub user_name: Option<String>,
    #[schema(example = "The third-floor printer is jammed")]
    pub issue: Option<String>,
    /// Defaults to `Low` when omitted. An explicit `null` is rejected.
    #[serde(default, skip_serializing_if = "PriorityInput::is_omitted")]
    #[schema(value_type = PrioritySchema)]
    pub priority: PriorityInput,
}

impl From<ComplaintRequestBody> for ComplaintFieldsInput {
    fn from(value: ComplaintRequestBody) -> Self {
        Self {
            user_name: value.user_name,
            issue: value.issue,
            priority: value.priority,
        }
    }
}

/// Complaint record as returned to clients.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ComplaintResponseBody {
    #[schema(format = "uuid")]
    pub id: String,
    pub user_name: String,
    pub issue: String,
    #[schema(value_type = PrioritySchema)]
    pub priority: String,
    #[schema(format = "date-time")]
    pub created_at: String,
    #[schema(format = "date-time")]
    pub updated_at: String,
}

fn rfc3339(timestamp: DateTime<Utc>) -> String {
    timestamp.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

impl From<ComplaintPayload> for ComplaintResponseBody {
    fn from(value: ComplaintPayload) -> Self {
        Self {
            id: value.id.to_string(),
            user_name: value.user_name,
            issue: value.issue,
            priority: value.priority.to_string(),
            created_at: rfc3339(value.created_at),
            updated_at: rfc3339(value.updated_at),
        }
    }
}

/// Acknowledgement returned after deleting a complaint.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DeleteComplaintResponseBody {
    #[schema(example = "Complaint deleted successfully")]
    pub message: String,
    #[schema(format = "uuid")]
    pub id: String,
}

/// Register every complaint handler on a scope or app.
///
/// # Examples
/// ```no_run
/// use actix_web::{App, web};
/// use complaints::inbound::http::complaints::configure;
///
/// let _app = App::new().service(web::scope("/api").configure(configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(create_complaint)
        .service(list_complaints)
        .service(get_complaint)
        .service(update_complaint)
        .service(delete_complaint);
}

/// Create a complaint.
#[utoipa::path(
    post,
    path = "/api/complaints",
    request_body = ComplaintRequestBody,
    responses(
        (status = 201, description = "Complaint created", body = ComplaintResponseBody),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["complaints"],
    operation_id = "createComplaint"
)]
#[post("/complaints")]
pub async fn create_complaint(
    state: web::Data<HttpState>,
    payload: web::Json<ComplaintRequestBody>,
) -> ApiResult<HttpResponse> {
    let response = state
        .complaints
        .create_complaint(CreateComplaintRequest {
            fields: payload.into_inner().into(),
        })
        .await?;

    Ok(HttpResponse::Created().json(ComplaintResponseBody::from(response.complaint)))
}

/// List every complaint, most recently created first.
#[utoipa::path(
    get,
    path = "/api/complaints",
    responses(
        (status = 200, description = "All complaints", body = [ComplaintResponseBody]),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["complaints"],
    operation_id = "listComplaints"
)]
#[get("/complaints")]
pub async fn list_complaints(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<ComplaintResponseBody>>> {
    let response = state.complaints_query.list_complaints().await?;
    Ok(web::Json(
        response
            .complaints
            .into_iter()
            .map(ComplaintResponseBody::from)
            .collect(),
    ))
}

/// Fetch one complaint.
#[utoipa::path(
    get,
    path = "/api/complaints/{id}",
    params(("id" = String, Path, description = "Complaint identifier (UUID)")),
    responses(
        (status = 200, description = "Complaint found", body = ComplaintResponseBody),
        (status = 400, description = "Invalid ID", body = ErrorSchema),
        (status = 404, description = "Complaint not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["complaints"],
    operation_id = "getComplaint"
)]
#[get("/complaints/{id}")]
pub async fn get_complaint(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ComplaintResponseBody>> {
    let response = state
        .complaints_query
        .get_complaint(GetComplaintRequest {
            id: path.into_inner(),
        })
        .await?;

    Ok(web::Json(ComplaintResponseBody::from(response.complaint)))
}

/// Replace the user name, issue, and priority of a complaint.
#[utoipa::path(
    put,
    path = "/api/complaints/{id}",
    params(("id" = String, Path, description = "Complaint identifier (UUID)")),
    request_body = ComplaintRequestBody,
    responses(
        (status = 200, description = "Complaint updated", body = ComplaintResponseBody),
        (status = 400, description = "Validation failed", body = ErrorSchema),
        (status = 404, description = "Complaint not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["complaints"],
    operation_id = "updateComplaint"
)]
#[put("/complaints/{id}")]
pub async fn update_complaint(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<ComplaintRequestBody>,
) -> ApiResult<web::Json<ComplaintResponseBody>> {
    let response = state
        .complaints
        .update_complaint(UpdateComplaintRequest {
            id: path.into_inner(),
            fields: payload.into_inner().into(),
        })
        .await?;

    Ok(web::Json(ComplaintResponseBody::from(response.complaint)))
}

/// Delete a complaint.
#[utoipa::path(
    delete,
    path = "/api/complaints/{id}",
    params(("id" = String, Path, description = "Complaint identifier (UUID)")),
    responses(
        (status = 200, description = "Complaint deleted", body = DeleteComplaintResponseBody),
        (status = 400, description = "Invalid ID", body = ErrorSchema),
        (status = 404, description = "Complaint not found", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["complaints"],
    operation_id = "deleteComplaint"
)]
#[delete("/complaints/{id}")]
pub async fn delete_complaint(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<DeleteComplaintResponseBody>> {
    let response = state
        .complaints
        .delete_complaint(DeleteComplaintRequest {
            id: path.into_inner(),
        })
        .await?;

    Ok(web::Json(DeleteComplaintResponseBody {
        message: DELETED_MESSAGE.to_owned(),
        id: response.id.to_string(),
    }))
}

#[cfg(test)]
#[path = "complaints_tests.rs"]
mod tests;
