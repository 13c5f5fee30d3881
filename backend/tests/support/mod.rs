//! Shared harness for HTTP integration tests over the in-memory store.

use std::sync::Arc;

use actix_web::dev::{Service, ServiceResponse};
use actix_web::{App, test as actix_test, web};
use backend::Trace;
use backend::domain::ports::TrackingCodeGenerator;
use backend::domain::{CatalogueService, ContactService, RepairLifecycleService, UserService};
use backend::inbound::http::api_scope;
use backend::inbound::http::state::{HttpState, HttpStatePorts};
use backend::outbound::memory::MemoryStore;
use backend::test_support::MutableClock;
use chrono::{DateTime, TimeZone, Utc};
use serde_json::Value;

/// Instant every harness clock starts at.
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 4, 6, 8, 30, 0)
        .single()
        .expect("valid start time")
}

/// Store, clock and HTTP state sharing one in-memory backend.
pub struct Harness {
    pub store: Arc<MemoryStore>,
    pub clock: Arc<MutableClock>,
    pub state: HttpState,
}

/// Wire services over a fresh in-memory store.
pub fn harness(codes: Arc<dyn TrackingCodeGenerator>) -> Harness {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(MutableClock::new(start_time()));
    let lifecycle = Arc::new(RepairLifecycleService::new(
        Arc::clone(&store),
        Arc::clone(&store),
        codes,
        clock.clone(),
    ));
    let state = HttpState::new(HttpStatePorts {
        repairs: lifecycle.clone(),
        repairs_query: lifecycle,
        users: Arc::new(UserService::new(Arc::clone(&store), clock.clone())),
        catalogue: Arc::new(CatalogueService::new(Arc::clone(&store))),
        contact: Arc::new(ContactService::new(Arc::clone(&store), clock.clone())),
    });
    Harness {
        store,
        clock,
        state,
    }
}

/// Initialise the full API over `state`.
pub async fn init_app(
    state: HttpState,
) -> impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error> {
    actix_test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .wrap(Trace)
            .service(api_scope()),
    )
    .await
}

/// Send `req` and return the status with the decoded JSON body.
pub async fn send(
    app: &impl Service<actix_http::Request, Response = ServiceResponse, Error = actix_web::Error>,
    req: actix_http::Request,
) -> (u16, Value) {
    let res = actix_test::call_service(app, req).await;
    let status = res.status().as_u16();
    let body = actix_test::read_body(res).await;
    let json = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).expect("JSON body")
    };
    (status, json)
}
