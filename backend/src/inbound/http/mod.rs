//! HTTP inbound adapter exposing REST endpoints.
//!
//! ```text
//! POST  /api/v1/repairs              GET /api/v1/services[?category=]
//! GET   /api/v1/repairs[?userId=]    GET /api/v1/services/category/{category}
//! GET   /api/v1/repairs/{id}         GET /api/v1/services/{id}
//! GET   /api/v1/repairs/{id}/progress GET /api/v1/blog, /api/v1/blog/{slug}
//! PATCH /api/v1/repairs/{id}/status  GET /api/v1/team, /api/v1/faqs
//! GET   /api/v1/track/{code}         POST /api/v1/contact
//! POST  /api/v1/users                GET /api/v1/users/{id}
//! ```

use actix_web::{Scope, web};

pub mod catalogue;
pub mod contact;
pub mod error;
pub mod health;
pub mod repairs;
pub mod schemas;
pub mod state;
#[cfg(test)]
pub mod test_utils;
pub mod track;
pub mod users;
pub mod validation;

pub use error::ApiResult;

/// Scope mounting every API handler under `/api/v1`, with extractor errors
/// mapped onto the JSON error envelope.
pub fn api_scope() -> Scope {
    web::scope("/api/v1")
        .app_data(validation::json_config())
        .app_data(validation::path_config())
        .app_data(validation::query_config())
        .service(repairs::create_repair)
        .service(repairs::list_repairs)
        .service(repairs::get_repair)
        .service(repairs::get_repair_progress)
        .service(repairs::update_repair_status)
        .service(track::track_repair)
        .service(catalogue::list_services)
        .service(catalogue::list_services_in_category)
        .service(catalogue::get_service)
        .service(catalogue::list_blog_posts)
        .service(catalogue::get_blog_post)
        .service(catalogue::list_team)
        .service(catalogue::list_faqs)
        .service(contact::submit_contact)
        .service(users::register_user)
        .service(users::get_user)
}
