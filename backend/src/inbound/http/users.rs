//! Customer account endpoints.
//!
//! ```text
//! POST /api/v1/users {"username":"jdoe","password":"...","fullName":"Jane Doe","email":"jane@example.com"}
//! GET  /api/v1/users/3
//! ```

use actix_web::http::header;
use actix_web::{HttpResponse, get, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{RegistrationDraft, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{FieldName, parse_user_id};

/// Sign-up form.
#[derive(Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterUserBody {
    #[serde(default)]
    #[schema(example = "jdoe")]
    pub username: String,
    #[serde(default)]
    #[schema(min_length = 8)]
    pub password: String,
    #[serde(default)]
    #[schema(example = "Jane Doe")]
    pub full_name: String,
    #[serde(default)]
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

impl From<RegisterUserBody> for RegistrationDraft {
    fn from(body: RegisterUserBody) -> Self {
        Self {
            username: body.username,
            password: body.password,
            full_name: body.full_name,
            email: body.email,
            phone: body.phone,
        }
    }
}

/// Public view of an account. The password hash never leaves the server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().as_i64(),
            username: user.username().as_str().to_owned(),
            full_name: user.full_name().to_owned(),
            email: user.email().as_str().to_owned(),
            phone: user.phone().map(str::to_owned),
            created_at: user.created_at(),
        }
    }
}

/// Create a customer account.
#[utoipa::path(
    post,
    path = "/api/v1/users",
    request_body = RegisterUserBody,
    responses(
        (
            status = 201,
            description = "Account created",
            headers(("Location" = String, description = "URL of the new account")),
            body = UserResponse
        ),
        (status = 400, description = "Invalid sign-up form", body = ErrorSchema),
        (status = 409, description = "Username or email already registered", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "registerUser"
)]
#[post("/users")]
pub async fn register_user(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterUserBody>,
) -> ApiResult<HttpResponse> {
    let user = state.users.register(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/api/v1/users/{}", user.id())))
        .json(UserResponse::from(&user)))
}

/// Fetch an account.
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    params(("id" = i64, Path, description = "Account id")),
    responses(
        (status = 200, description = "Account", body = UserResponse),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Account not found", body = ErrorSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<UserResponse>> {
    let id = parse_user_id(&path.into_inner(), FieldName::new("id"))?;
    let user = state.users.get_user(id).await?;
    Ok(web::Json(UserResponse::from(&user)))
}
