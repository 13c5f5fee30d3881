//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, web};
use chrono::{DateTime, TimeZone, Utc};

use crate::Trace;
use crate::domain::{CatalogueService, ContactService, RepairLifecycleService, UserService};
use crate::inbound::http::api_scope;
use crate::inbound::http::state::{HttpState, HttpStatePorts};
use crate::outbound::memory::MemoryStore;
use crate::test_support::{MutableClock, ScriptedTrackingCodes};

/// Fixed instant handler tests start from.
pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0)
        .single()
        .expect("valid start time")
}

/// Memory-backed services plus handles for inspecting and steering them.
pub struct MemoryBackend {
    pub store: Arc<MemoryStore>,
    pub clock: Arc<MutableClock>,
    pub state: HttpState,
}

/// Wire every port to one in-memory store, a controllable clock and the
/// given scripted tracking codes.
pub fn memory_backend(codes: &[&str]) -> MemoryBackend {
    let store = Arc::new(MemoryStore::new());
    let clock = Arc::new(MutableClock::new(start_time()));
    let lifecycle = Arc::new(RepairLifecycleService::new(
        Arc::clone(&store),
        Arc::clone(&store),
        Arc::new(ScriptedTrackingCodes::new(codes)),
        clock.clone(),
    ));
    let state = HttpState::new(HttpStatePorts {
        repairs: lifecycle.clone(),
        repairs_query: lifecycle,
        users: Arc::new(UserService::new(Arc::clone(&store), clock.clone())),
        catalogue: Arc::new(CatalogueService::new(Arc::clone(&store))),
        contact: Arc::new(ContactService::new(Arc::clone(&store), clock.clone())),
    });
    MemoryBackend {
        store,
        clock,
        state,
    }
}

/// Build an app exposing the whole API over `state`.
pub fn test_app(
    state: HttpState,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(state))
        .wrap(Trace)
        .service(api_scope())
}
