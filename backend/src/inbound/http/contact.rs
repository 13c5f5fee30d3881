//! Contact form endpoint.
//!
//! ```text
//! POST /api/v1/contact {"name":"Jane","email":"jane@example.com","subject":"Hi","message":"..."}
//! ```

use actix_web::{HttpResponse, post, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ContactDraft;
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::ErrorSchema;
use crate::inbound::http::state::HttpState;

/// Confirmation text returned once a message is stored.
pub const CONTACT_ACK: &str = "Contact message sent successfully";

/// Contact form body.
#[derive(Debug, Default, Deserialize, Serialize, ToSchema)]
pub struct ContactBody {
    #[serde(default)]
    #[schema(example = "Jane Doe")]
    pub name: String,
    #[serde(default)]
    #[schema(example = "jane@example.com")]
    pub email: String,
    #[serde(default)]
    #[schema(example = "Opening hours")]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl From<ContactBody> for ContactDraft {
    fn from(body: ContactBody) -> Self {
        Self {
            name: body.name,
            email: body.email,
            subject: body.subject,
            message: body.message,
        }
    }
}

/// Acknowledgement for a stored message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ContactAck {
    #[schema(example = "Contact message sent successfully")]
    pub message: String,
}

/// Store a contact message for staff follow-up.
#[utoipa::path(
    post,
    path = "/api/v1/contact",
    request_body = ContactBody,
    responses(
        (status = 201, description = "Message stored", body = ContactAck),
        (status = 400, description = "Invalid message", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["contact"],
    operation_id = "submitContact"
)]
#[post("/contact")]
pub async fn submit_contact(
    state: web::Data<HttpState>,
    payload: web::Json<ContactBody>,
) -> ApiResult<HttpResponse> {
    state.contact.submit(payload.into_inner().into()).await?;
    Ok(HttpResponse::Created().json(ContactAck {
        message: CONTACT_ACK.to_owned(),
    }))
}
