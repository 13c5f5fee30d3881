//! Public tracking lookup.
//!
//! ```text
//! GET /api/v1/track/REPK7M2Q9XA
//! ```

use actix_web::{get, web};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::ProgressEntry;
use crate::domain::ports::TrackedRepair;
use crate::inbound::http::ApiResult;
use crate::inbound::http::repairs::RepairResponse;
use crate::inbound::http::schemas::{ErrorSchema, ProgressEntrySchema};
use crate::inbound::http::state::HttpState;

/// A repair together with its timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TrackResponse {
    pub repair: RepairResponse,
    #[schema(value_type = Vec<ProgressEntrySchema>)]
    pub progress: Vec<ProgressEntry>,
}

impl From<TrackedRepair> for TrackResponse {
    fn from(tracked: TrackedRepair) -> Self {
        Self {
            repair: RepairResponse::from(&tracked.repair),
            progress: tracked.progress,
        }
    }
}

/// Look up a repair by the code printed on the customer's receipt.
///
/// Codes are matched case-insensitively after trimming. Anything that is not
/// a well-formed code is reported as not found.
#[utoipa::path(
    get,
    path = "/api/v1/track/{code}",
    params(("code" = String, Path, description = "Tracking code such as REPK7M2Q9XA")),
    responses(
        (status = 200, description = "Repair and progress", body = TrackResponse),
        (status = 404, description = "No repair carries this code", body = ErrorSchema),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["tracking"],
    operation_id = "trackRepair"
)]
#[get("/track/{code}")]
pub async fn track_repair(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<TrackResponse>> {
    let tracked = state.repairs_query.track(&path.into_inner()).await?;
    Ok(web::Json(TrackResponse::from(tracked)))
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;
    use serde_json::{Value, json};

    use super::*;
    use crate::domain::RepairStatus;
    use crate::inbound::http::test_utils::{memory_backend, test_app};

    const CODE: &str = "REPK7M2Q9XA";

    async fn booked_app() -> impl actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
    > {
        let backend = memory_backend(&[CODE]);
        let app = actix_test::init_service(test_app(backend.state)).await;
        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::post()
                .uri("/api/v1/repairs")
                .set_json(json!({
                    "deviceType": "laptop",
                    "deviceModel": "ThinkPad X1",
                    "issueDescription": "Will not power on",
                    "customerName": "Sam Lee",
                    "customerEmail": "sam@example.com"
                }))
                .to_request(),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        app
    }

    #[rstest]
    #[case(CODE)]
    #[case("repk7m2q9xa")]
    #[actix_web::test]
    async fn tracking_returns_repair_and_timeline(#[case] code: &str) {
        let app = booked_app().await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/v1/track/{code}"))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
        let body: TrackResponse = actix_test::read_body_json(res).await;
        assert_eq!(body.repair.tracking_code, CODE);
        assert_eq!(body.repair.status, RepairStatus::Received);
        assert_eq!(body.progress.len(), 1);
        assert_eq!(body.progress[0].status, RepairStatus::Received);
    }

    #[rstest]
    #[case("REPZZZZZZZZ")]
    #[case("REP0000000O")]
    #[case("hello")]
    #[actix_web::test]
    async fn unknown_or_malformed_codes_are_not_found(#[case] code: &str) {
        let app = booked_app().await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri(&format!("/api/v1/track/{code}"))
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::NOT_FOUND);
        let body: Value = actix_test::read_body_json(res).await;
        assert_eq!(body["code"], "not_found");
    }
}
