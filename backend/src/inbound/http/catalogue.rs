//! Read-only marketing catalogue endpoints.
//!
//! ```text
//! GET /api/v1/services?category=smartphone
//! GET /api/v1/services/category/smartphone
//! GET /api/v1/services/3
//! GET /api/v1/blog
//! GET /api/v1/blog/extend-smartphone-battery-life
//! GET /api/v1/team
//! GET /api/v1/faqs
//! ```

use actix_web::{get, web};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::domain::{BlogPost, Faq, ServiceOffering, TeamMember};
use crate::inbound::http::ApiResult;
use crate::inbound::http::schemas::{
    BlogPostSchema, ErrorSchema, FaqSchema, ServiceOfferingSchema, TeamMemberSchema,
};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::parse_catalogue_id;

/// Optional category filter for `GET /api/v1/services`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ServicesQuery {
    /// Exact category name; blank means no filter.
    pub category: Option<String>,
}

/// List advertised services ordered by id.
#[utoipa::path(
    get,
    path = "/api/v1/services",
    params(ServicesQuery),
    responses(
        (status = 200, description = "Services", body = [ServiceOfferingSchema]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "listServices"
)]
#[get("/services")]
pub async fn list_services(
    state: web::Data<HttpState>,
    query: web::Query<ServicesQuery>,
) -> ApiResult<web::Json<Vec<ServiceOffering>>> {
    let services = state.catalogue.services(query.into_inner().category).await?;
    Ok(web::Json(services))
}

/// List the services in one category.
#[utoipa::path(
    get,
    path = "/api/v1/services/category/{category}",
    params(("category" = String, Path, description = "Category name")),
    responses(
        (status = 200, description = "Services in the category", body = [ServiceOfferingSchema]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "listServicesInCategory"
)]
#[get("/services/category/{category}")]
pub async fn list_services_in_category(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<Vec<ServiceOffering>>> {
    let services = state.catalogue.services(Some(path.into_inner())).await?;
    Ok(web::Json(services))
}

/// Fetch one service.
#[utoipa::path(
    get,
    path = "/api/v1/services/{id}",
    params(("id" = i64, Path, description = "Service id")),
    responses(
        (status = 200, description = "Service", body = ServiceOfferingSchema),
        (status = 400, description = "Malformed id", body = ErrorSchema),
        (status = 404, description = "Service not found", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "getService"
)]
#[get("/services/{id}")]
pub async fn get_service(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<ServiceOffering>> {
    let id = parse_catalogue_id(&path.into_inner())?;
    Ok(web::Json(state.catalogue.service(id).await?))
}

/// List blog posts, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/blog",
    responses(
        (status = 200, description = "Blog posts", body = [BlogPostSchema]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "listBlogPosts"
)]
#[get("/blog")]
pub async fn list_blog_posts(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<BlogPost>>> {
    Ok(web::Json(state.catalogue.blog_posts().await?))
}

/// Fetch a blog post by its slug.
#[utoipa::path(
    get,
    path = "/api/v1/blog/{slug}",
    params(("slug" = String, Path, description = "URL slug")),
    responses(
        (status = 200, description = "Blog post", body = BlogPostSchema),
        (status = 404, description = "No post with this slug", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "getBlogPost"
)]
#[get("/blog/{slug}")]
pub async fn get_blog_post(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<web::Json<BlogPost>> {
    Ok(web::Json(state.catalogue.blog_post(&path.into_inner()).await?))
}

/// List team members ordered by id.
#[utoipa::path(
    get,
    path = "/api/v1/team",
    responses(
        (status = 200, description = "Team members", body = [TeamMemberSchema]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "listTeam"
)]
#[get("/team")]
pub async fn list_team(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<TeamMember>>> {
    Ok(web::Json(state.catalogue.team().await?))
}

/// List FAQs in display order.
#[utoipa::path(
    get,
    path = "/api/v1/faqs",
    responses(
        (status = 200, description = "FAQs", body = [FaqSchema]),
        (status = 503, description = "Service unavailable", body = ErrorSchema)
    ),
    tags = ["catalogue"],
    operation_id = "listFaqs"
)]
#[get("/faqs")]
pub async fn list_faqs(state: web::Data<HttpState>) -> ApiResult<web::Json<Vec<Faq>>> {
    Ok(web::Json(state.catalogue.faqs().await?))
}
