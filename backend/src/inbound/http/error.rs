//! JSON error envelopes for the repair API.
//!
//! Handlers return [`ApiResult`] and let `?` carry a [`domain::Error`]
//! straight into the response. Status codes follow the error code:
//!
//! | code                  | status | typical cause                                  |
//! |-----------------------|--------|------------------------------------------------|
//! | `invalid_request`     | 400    | blank booking field, unknown status value      |
//! | `not_found`           | 404    | unknown repair id or tracking code             |
//! | `conflict`            | 409    | illegal transition, duplicate account, codes exhausted |
//! | `service_unavailable` | 503    | database pool could not hand out a connection  |
//! | `internal_error`      | 500    | failed statement; message is never shown       |
//!
//! [`domain::Error`]: crate::domain::Error

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use tracing::{error, info, warn};

use crate::domain::{Error, ErrorCode, TRACE_ID_HEADER};

/// Result alias used by every handler under `/api/v1`.
pub type ApiResult<T> = Result<T, Error>;

const REDACTED_MESSAGE: &str = "Internal server error";

fn status_for(code: ErrorCode) -> StatusCode {
    match code {
        ErrorCode::InvalidRequest => StatusCode::BAD_REQUEST,
        ErrorCode::NotFound => StatusCode::NOT_FOUND,
        ErrorCode::Conflict => StatusCode::CONFLICT,
        ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
        ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Body sent to the client. Internal failures lose message and details but
/// keep the trace id so support can find the log line.
fn client_view(error: &Error) -> Error {
    if error.code() != ErrorCode::InternalError {
        return error.clone();
    }
    let redacted = Error::internal(REDACTED_MESSAGE);
    match error.trace_id() {
        Some(id) => redacted.with_trace_id(id.to_owned()),
        None => redacted,
    }
}

fn log_outcome(error: &Error) {
    let trace_id = error.trace_id();
    match error.code() {
        ErrorCode::InternalError => {
            error!(?trace_id, message = %error.message(), "repair API request failed");
        }
        ErrorCode::ServiceUnavailable => {
            warn!(?trace_id, message = %error.message(), "repair store unavailable");
        }
        ErrorCode::Conflict => {
            info!(?trace_id, details = ?error.details(), "repair API request refused");
        }
        ErrorCode::InvalidRequest | ErrorCode::NotFound => {}
    }
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        status_for(self.code())
    }

    fn error_response(&self) -> HttpResponse {
        log_outcome(self);

        let mut builder = HttpResponse::build(self.status_code());
        if let Some(id) = self.trace_id() {
            builder.insert_header((TRACE_ID_HEADER, id.to_owned()));
        }
        builder.json(client_view(self))
    }
}

#[cfg(test)]
mod tests;
