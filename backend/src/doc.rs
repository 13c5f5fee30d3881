//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers:
//!
//! - **Paths**: every HTTP endpoint from the inbound layer (repairs,
//!   tracking, catalogue, contact, users, health)
//! - **Schemas**: domain type wrappers ([`ErrorSchema`],
//!   [`RepairStatusSchema`], [`ProgressEntrySchema`] and the catalogue
//!   schemas) that provide OpenAPI definitions without coupling domain types
//!   to the utoipa framework
//!
//! The generated specification is used by Swagger UI (debug builds) and
//! exported via `cargo run --bin openapi-dump` for external tooling.

use crate::inbound::http::schemas::{
    BlogPostSchema, ErrorCodeSchema, ErrorSchema, FaqSchema, ProgressEntrySchema,
    RepairStatusSchema, ServiceOfferingSchema, TeamMemberSchema,
};
use utoipa::OpenApi;

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only and used by tooling.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "FastFix backend API",
        description = "Repair booking, status tracking and shop catalogue for FastFix."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::repairs::create_repair,
        crate::inbound::http::repairs::list_repairs,
        crate::inbound::http::repairs::get_repair,
        crate::inbound::http::repairs::get_repair_progress,
        crate::inbound::http::repairs::update_repair_status,
        crate::inbound::http::track::track_repair,
        crate::inbound::http::catalogue::list_services,
        crate::inbound::http::catalogue::list_services_in_category,
        crate::inbound::http::catalogue::get_service,
        crate::inbound::http::catalogue::list_blog_posts,
        crate::inbound::http::catalogue::get_blog_post,
        crate::inbound::http::catalogue::list_team,
        crate::inbound::http::catalogue::list_faqs,
        crate::inbound::http::contact::submit_contact,
        crate::inbound::http::users::register_user,
        crate::inbound::http::users::get_user,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        ErrorSchema,
        ErrorCodeSchema,
        RepairStatusSchema,
        ProgressEntrySchema,
        ServiceOfferingSchema,
        BlogPostSchema,
        TeamMemberSchema,
        FaqSchema,
    )),
    tags(
        (name = "repairs", description = "Booking repairs and moving them through their lifecycle"),
        (name = "tracking", description = "Public lookup by tracking code"),
        (name = "catalogue", description = "Services, blog posts, team and FAQs"),
        (name = "contact", description = "Contact form"),
        (name = "users", description = "Customer accounts"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
