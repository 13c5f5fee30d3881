//! Repair booking and lifecycle endpoints.
//!
//! ```text
//! POST  /api/v1/repairs {"deviceType":"smartphone","deviceModel":"iPhone 13",...}
//! GET   /api/v1/repairs?userId=3
//! GET   /api/v1/repairs/7
//! GET   /api/v1/repairs/7/progress
//! PATCH /api/v1/repairs/7/status {"status":"diagnosed","notes":"Battery swollen"}
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, get, patch, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::domain::ports::{CreateRepairRequest, UpdateRepairStatusRequest};
use crate::domain::{ProgressEntry, Repair, RepairIntakeDraft, RepairStatus, UserId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{ErrorSchema, ProgressEntrySchema, RepairStatusSchema};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_repair_id, parse_user_id};

/// Booking form for `POST /api/v1/repairs`.
///
/// Missing text fields default to empty so validation can name the field.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateRepairBody {
    #[serde(default)]
    #[schema(example = "smartphone")]
    pub device_type: String,
    #[serde(default)]
    #[schema(example = "iPhone 13")]
    pub device_model: String,
    #[serde(default)]
    #[schema(example = "Cracked screen")]
    pub issue_description: String,
    #[serde(default)]
    #[schema(example = "Jane Doe")]
    pub customer_name: String,
    #[serde(default)]
    #[schema(example = "jane@example.com")]
    pub customer_email: String,
    #[serde(default)]
    pub customer_phone: Option<String>,
    /// Owning account, when the customer is signed up.
    #[serde(default)]
    pub user_id: Option<i64>,
}

impl From<CreateRepairBody> for CreateRepairRequest {
    fn from(body: CreateRepairBody) -> Self {
        Self {
            intake: RepairIntakeDraft {
                device_type: body.device_type,
                device_model: body.device_model,
                issue_description: body.issue_description,
                customer_name: body.customer_name,
                customer_email: body.customer_email,
                customer_phone: body.customer_phone,
            },
            user_id: body.user_id.map(UserId::new),
        }
    }
}

/// Status change for `PATCH /api/v1/repairs/{id}/status`.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusBody {
    /// Target status. `in_progress` and `ready` are accepted as aliases.
    #[serde(default)]
    #[schema(example = "diagnosed")]
    pub status: String,
    /// Note for the progress entry; a default note is recorded when absent.
    #[serde(default)]
    pub notes: Option<String>,
}

/// Optional owner filter for `GET /api/v1/repairs`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListRepairsQuery {
    /// Only return repairs owned by this account.
    pub user_id: Option<String>,
}

/// A repair as returned to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RepairResponse {
    pub id: i64,
    pub user_id: Option<i64>,
    #[schema(example = "REPK7M2Q9XA")]
    pub tracking_code: String,
    pub device_type: String,
    pub device_model: String,
    pub issue_description: String,
    #[schema(value_type = RepairStatusSchema)]
    pub status: RepairStatus,
    pub estimated_completion: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: Option<String>,
    pub technician_notes: String,
    pub technician_id: String,
}

impl From<&Repair> for RepairResponse {
    fn from(repair: &Repair) -> Self {
        Self {
            id: repair.id().as_i64(),
            user_id: repair.user_id().map(UserId::as_i64),
            tracking_code: repair.tracking_code().as_str().to_owned(),
            device_type: repair.device_type().to_owned(),
            device_model: repair.device_model().to_owned(),
            issue_description: repair.issue_description().to_owned(),
            status: repair.status(),
            estimated_completion: repair.estimated_completion(),
            created_at: repair.created_at(),
            updated_at: repair.updated_at(),
            customer_name: repair.customer_name().to_owned(),
            customer_email: repair.customer_email().to_owned(),
            customer_phone: repair.customer_phone().map(str::to_owned),
            technician_notes: repair.technician_notes().to_owned(),
            technician_id: repair.technician_id().to_owned(),
        }
    }
}

/// Book a repair and issue its tracking code.
#[utoipa::path(
    post,
    path = "/api/v1/repairs",
    request_body = CreateRepairBody,
    responses(
        (
            status = 201,
            description = "Repair booked",
            headers(("Location" = String, description = "URL of the new repair")),
            body = RepairResponse
        ),
        (status = 400, description = "Invalid booking", body = ErrorSchema),
        (status = 409, description = "No unique tracking code could be allocated", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema),
        (status = 500, description = "Internal server error", body = ErrorSchema)
    ),
    tags = ["repairs"],
    operation_id = "createRepair"
)]
#[post("/repairs")]
pub async fn create_repair(
    state: web::Data<HttpState>,
    payload: web::Json<CreateRepairBody>,
) -> ApiResult<HttpResponse> {
    let repair = state
        .repairs
        .create_repair(payload.into_inner().into())
        .await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/v1/repairs/{}", repair.id())))
        .json(RepairResponse::from(&repair)))
}

/// List repairs, optionally only those owned by one account.
#[utoipa::path(
    get,
    path = "/api/v1/repairs",
    params(ListRepairsQuery),
    responses(
        (status = 200, description = "Repairs ordered by id", body = [RepairResponse]),
        (status = 400, description = "Invalid userId", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["repairs"],
    operation_id = "listRepairs"
)]
#[get("/repairs")]
pub async fn list_repairs(
    state: web::Data<HttpState>,
    query: web::Query<ListRepairsQuery>,
) -> ApiResult<web::Json<Vec<RepairResponse>>> {
    let user_id = query
        .into_inner()
        .user_id
        .map(|raw| parse_user_id(&raw, FieldName::new("userId")))
        .transpose()?;
    let repairs = state.repairs_query.list_repairs(user_id).await?;
    Ok(web::Json(repairs.iter().map(RepairResponse::from).collect()))
}

/// Fetch one repair.
#[utoipa::path(
    get,
    path = "/api/v1/repairs/{id}",
    params(("id" = i64, Path, description = "Repair id")),
    responses(
        (status = 200, description = "Repair", body = RepairResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Repair not found", body = ErrorSchema)
    ),
    tags = ["repairs"],
    operation_id = "getRepair"
)]
#[get("/repairs/{id}")]
pub async fn get_repair(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<RepairResponse>> {
    let id = parse_repair_id(&path.into_inner())?;
    let repair = state.repairs_query.get_repair(id).await?;
    Ok(web::Json(RepairResponse::from(&repair)))
}

/// Progress timeline of a repair, oldest first.
#[utoipa::path(
    get,
    path = "/api/v1/repairs/{id}/progress",
    params(("id" = i64, Path, description = "Repair id")),
    responses(
        (status = 200, description = "Progress entries", body = [ProgressEntrySchema]),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Repair not found", body = ErrorSchema)
    ),
    tags = ["repairs"],
    operation_id = "getRepairProgress"
)]
#[get("/repairs/{id}/progress")]
pub async fn get_repair_progress(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<ProgressEntry>>> {
    let id = parse_repair_id(&path.into_inner())?;
    let history = state.repairs_query.get_history(id).await?;
    Ok(web::Json(history))
}

/// Move a repair to a new status and record the change.
#[utoipa::path(
    patch,
    path = "/api/v1/repairs/{id}/status",
    params(("id" = i64, Path, description = "Repair id")),
    request_body = UpdateStatusBody,
    responses(
        (status = 200, description = "Updated repair", body = RepairResponse),
        (status = 400, description = "Unknown status value", body = ErrorSchema),
        (status = 404, description = "Repair not found", body = ErrorSchema),
        (status = 409, description = "Transition not allowed from the current status", body = ErrorSchema)
    ),
    tags = ["repairs"],
    operation_id = "updateRepairStatus"
)]
#[patch("/repairs/{id}/status")]
pub async fn update_repair_status(
    state: web::Data<HttpState>,
    path: web::Path<String>,
    payload: web::Json<UpdateStatusBody>,
) -> ApiResult<web::Json<RepairResponse>> {
    let repair_id = parse_repair_id(&path.into_inner())?;
    let UpdateStatusBody { status, notes } = payload.into_inner();
    let repair = state
        .repairs
        .update_status(UpdateRepairStatusRequest {
            repair_id,
            status,
            notes,
        })
        .await?;
    Ok(web::Json(RepairResponse::from(&repair)))
}

#[cfg(test)]
#[path = "repairs_tests.rs"]
mod tests;
