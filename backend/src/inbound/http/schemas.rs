//! OpenAPI schema definitions for domain types.
//!
//! Domain types remain framework-agnostic by not deriving `ToSchema`. This
//! module provides the schema definitions required for OpenAPI documentation
//! using utoipa's external schema registration.
//!
//! The schema wrappers mirror the serialised shape of their domain types but
//! live in the inbound adapter layer where framework concerns belong.

use utoipa::ToSchema;

/// OpenAPI schema for [`crate::domain::ErrorCode`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// The request conflicts with the resource's current state.
    #[schema(rename = "conflict")]
    Conflict,
    /// A backing store is temporarily unreachable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "status must be one of received, diagnosed, repairing, testing, completed, cancelled")]
    message: String,
    /// Correlation identifier of the request.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Field-level details such as `{field, code, value}`.
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for [`crate::domain::RepairStatus`].
#[derive(ToSchema)]
#[schema(as = crate::domain::RepairStatus)]
pub enum RepairStatusSchema {
    #[schema(rename = "received")]
    Received,
    #[schema(rename = "diagnosed")]
    Diagnosed,
    #[schema(rename = "repairing")]
    Repairing,
    #[schema(rename = "testing")]
    Testing,
    #[schema(rename = "completed")]
    Completed,
    #[schema(rename = "cancelled")]
    Cancelled,
}

/// OpenAPI schema for [`crate::domain::ProgressEntry`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ProgressEntry)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ProgressEntrySchema {
    #[schema(example = 1)]
    id: i64,
    #[schema(example = 1)]
    repair_id: i64,
    status: RepairStatusSchema,
    #[schema(example = "Device received for repair")]
    notes: Option<String>,
    #[schema(value_type = String, format = DateTime, example = "2026-03-01T09:00:00Z")]
    timestamp: String,
}

/// OpenAPI schema for [`crate::domain::ServiceOffering`].
#[derive(ToSchema)]
#[schema(as = crate::domain::ServiceOffering)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ServiceOfferingSchema {
    id: i64,
    #[schema(example = "smartphone")]
    category: String,
    #[schema(example = "Screen Replacement")]
    name: String,
    description: String,
    #[schema(example = "From $79")]
    price: String,
    #[schema(example = "1-2 hours")]
    estimated_time: String,
}

/// OpenAPI schema for [`crate::domain::BlogPost`].
#[derive(ToSchema)]
#[schema(as = crate::domain::BlogPost)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct BlogPostSchema {
    id: i64,
    title: String,
    #[schema(example = "extend-smartphone-battery-life")]
    slug: String,
    content: String,
    excerpt: String,
    category: String,
    image_url: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    published_at: String,
}

/// OpenAPI schema for [`crate::domain::TeamMember`].
#[derive(ToSchema)]
#[schema(as = crate::domain::TeamMember)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct TeamMemberSchema {
    id: i64,
    name: String,
    position: String,
    bio: Option<String>,
    image_url: Option<String>,
}

/// OpenAPI schema for [`crate::domain::Faq`].
#[derive(ToSchema)]
#[schema(as = crate::domain::Faq)]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct FaqSchema {
    id: i64,
    question: String,
    answer: String,
    #[schema(example = 1)]
    order: i32,
}
