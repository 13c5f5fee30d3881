//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::{AppSettings, ServerConfig};

use state_builders::build_http_state;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use backend::Trace;
#[cfg(debug_assertions)]
use backend::doc::ApiDoc;
use backend::inbound::http::api_scope;
use backend::inbound::http::health::{HealthState, live, ready};
use backend::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api_scope())
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Prepare storage, then construct an Actix HTTP server.
///
/// # Parameters
/// - `health_state`: shared readiness state, marked ready once storage is
///   prepared and the socket is bound.
/// - `config`: validated [`ServerConfig`] selecting the storage backend.
///
/// # Returns
/// A spawned [`Server`] that must be awaited to drive the listener.
///
/// # Errors
/// Returns an error when migrations, the pool or catalogue seeding
/// fail, and [`std::io::Error`] (wrapped) when binding the socket fails.
pub async fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = build_http_state(&config)
        .await
        .map_err(std::io::Error::other)?;
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(config.bind_addr())?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;

    use super::*;
    use super::config::StorageBackend;

    async fn memory_deps() -> AppDependencies {
        let config = ServerConfig {
            bind_addr: "127.0.0.1:0".parse().expect("socket address"),
            storage: StorageBackend::Memory,
            database_url: None,
            db_max_connections: 1,
            seed_catalogue: true,
        };
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: build_http_state(&config).await.expect("memory state"),
        }
    }

    #[actix_web::test]
    async fn app_serves_api_and_probes() {
        let deps = memory_deps().await;
        let health = deps.health_state.clone();
        let app = actix_test::init_service(build_app(deps)).await;

        let not_ready = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert_eq!(not_ready.status(), StatusCode::SERVICE_UNAVAILABLE);

        health.mark_ready();
        let ready_res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/health/ready").to_request(),
        )
        .await;
        assert_eq!(ready_res.status(), StatusCode::OK);

        let faqs = actix_test::call_service(
            &app,
            actix_test::TestRequest::get().uri("/api/v1/faqs").to_request(),
        )
        .await;
        assert_eq!(faqs.status(), StatusCode::OK);
        assert!(faqs.headers().contains_key("trace-id"));
    }

    #[cfg(debug_assertions)]
    #[actix_web::test]
    async fn openapi_document_is_served_in_debug_builds() {
        let app = actix_test::init_service(build_app(memory_deps().await)).await;

        let res = actix_test::call_service(
            &app,
            actix_test::TestRequest::get()
                .uri("/api-docs/openapi.json")
                .to_request(),
        )
        .await;

        assert_eq!(res.status(), StatusCode::OK);
    }
}
