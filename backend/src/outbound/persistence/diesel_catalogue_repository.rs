//! PostgreSQL-backed `CatalogueRepository` implementation using Diesel ORM.
//!
//! Reference data is plain rows with no invariants beyond the draft checks,
//! so conversions here are infallible.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel::result::Error as DieselError;
use diesel_async::RunQueryDsl;

use crate::domain::ports::{CatalogueRepository, CatalogueRepositoryError};
use crate::domain::{
    BlogPost, BlogPostDraft, Faq, FaqDraft, ServiceOffering, ServiceOfferingDraft, TeamMember,
    TeamMemberDraft,
};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, unique_violation_constraint,
};
use super::models::{
    BlogPostRow, FaqRow, NewBlogPostRow, NewFaqRow, NewServiceRow, NewTeamMemberRow, ServiceRow,
    TeamMemberRow,
};
use super::pool::{DbPool, PoolError};
use super::schema::{blog_posts, faqs, services, team_members};

/// Diesel-backed implementation of the catalogue repository port.
#[derive(Clone)]
pub struct DieselCatalogueRepository {
    pool: DbPool,
}

impl DieselCatalogueRepository {
    /// Create a new repository with the given connection pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CatalogueRepositoryError {
    map_basic_pool_error(error, CatalogueRepositoryError::connection)
}

fn map_diesel_error(error: DieselError) -> CatalogueRepositoryError {
    map_basic_diesel_error(
        error,
        CatalogueRepositoryError::query,
        CatalogueRepositoryError::connection,
    )
}

impl From<ServiceRow> for ServiceOffering {
    fn from(row: ServiceRow) -> Self {
        Self {
            id: row.id,
            category: row.category,
            name: row.name,
            description: row.description,
            price: row.price,
            estimated_time: row.estimated_time,
        }
    }
}

impl From<BlogPostRow> for BlogPost {
    fn from(row: BlogPostRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            slug: row.slug,
            content: row.content,
            excerpt: row.excerpt,
            category: row.category,
            image_url: row.image_url,
            published_at: row.published_at,
        }
    }
}

impl From<TeamMemberRow> for TeamMember {
    fn from(row: TeamMemberRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            position: row.position,
            bio: row.bio,
            image_url: row.image_url,
        }
    }
}

impl From<FaqRow> for Faq {
    fn from(row: FaqRow) -> Self {
        Self {
            id: row.id,
            question: row.question,
            answer: row.answer,
            order: row.display_order,
        }
    }
}

#[async_trait]
impl CatalogueRepository for DieselCatalogueRepository {
    async fn list_services(&self) -> Result<Vec<ServiceOffering>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = services::table
            .order_by(services::id.asc())
            .select(ServiceRow::as_select())
            .load::<ServiceRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(ServiceOffering::from).collect())
    }

    async fn list_services_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<ServiceOffering>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = services::table
            .filter(services::category.eq(category))
            .order_by(services::id.asc())
            .select(ServiceRow::as_select())
            .load::<ServiceRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(ServiceOffering::from).collect())
    }

    async fn find_service(
        &self,
        id: i64,
    ) -> Result<Option<ServiceOffering>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = services::table
            .find(id)
            .select(ServiceRow::as_select())
            .first::<ServiceRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(ServiceOffering::from))
    }

    async fn create_service(
        &self,
        draft: ServiceOfferingDraft,
    ) -> Result<ServiceOffering, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let id: i64 = diesel::insert_into(services::table)
            .values(&NewServiceRow {
                category: &draft.category,
                name: &draft.name,
                description: &draft.description,
                price: &draft.price,
                estimated_time: &draft.estimated_time,
            })
            .returning(services::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(ServiceOffering::from_draft(id, draft))
    }

    async fn list_blog_posts(&self) -> Result<Vec<BlogPost>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = blog_posts::table
            .order_by((blog_posts::published_at.desc(), blog_posts::id.asc()))
            .select(BlogPostRow::as_select())
            .load::<BlogPostRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(BlogPost::from).collect())
    }

    async fn find_blog_post_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<BlogPost>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let row = blog_posts::table
            .filter(blog_posts::slug.eq(slug))
            .select(BlogPostRow::as_select())
            .first::<BlogPostRow>(&mut conn)
            .await
            .optional()
            .map_err(map_diesel_error)?;

        Ok(row.map(BlogPost::from))
    }

    async fn create_blog_post(
        &self,
        draft: BlogPostDraft,
    ) -> Result<BlogPost, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let id: i64 = diesel::insert_into(blog_posts::table)
            .values(&NewBlogPostRow {
                title: &draft.title,
                slug: &draft.slug,
                content: &draft.content,
                excerpt: &draft.excerpt,
                category: &draft.category,
                image_url: draft.image_url.as_deref(),
                published_at: draft.published_at,
            })
            .returning(blog_posts::id)
            .get_result(&mut conn)
            .await
            .map_err(|err| {
                if unique_violation_constraint(&err).is_some() {
                    CatalogueRepositoryError::duplicate_slug(draft.slug.as_str())
                } else {
                    map_diesel_error(err)
                }
            })?;

        Ok(BlogPost::from_draft(id, draft))
    }

    async fn list_team_members(&self) -> Result<Vec<TeamMember>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = team_members::table
            .order_by(team_members::id.asc())
            .select(TeamMemberRow::as_select())
            .load::<TeamMemberRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(TeamMember::from).collect())
    }

    async fn create_team_member(
        &self,
        draft: TeamMemberDraft,
    ) -> Result<TeamMember, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let id: i64 = diesel::insert_into(team_members::table)
            .values(&NewTeamMemberRow {
                name: &draft.name,
                position: &draft.position,
                bio: draft.bio.as_deref(),
                image_url: draft.image_url.as_deref(),
            })
            .returning(team_members::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(TeamMember::from_draft(id, draft))
    }

    async fn list_faqs(&self) -> Result<Vec<Faq>, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let rows = faqs::table
            .order_by((faqs::display_order.asc(), faqs::id.asc()))
            .select(FaqRow::as_select())
            .load::<FaqRow>(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(rows.into_iter().map(Faq::from).collect())
    }

    async fn create_faq(&self, draft: FaqDraft) -> Result<Faq, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let id: i64 = diesel::insert_into(faqs::table)
            .values(&NewFaqRow {
                question: &draft.question,
                answer: &draft.answer,
                display_order: draft.order,
            })
            .returning(faqs::id)
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(Faq::from_draft(id, draft))
    }

    async fn is_empty(&self) -> Result<bool, CatalogueRepositoryError> {
        let mut conn = self.pool.get().await.map_err(map_pool_error)?;

        let services: i64 = services::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let team: i64 = team_members::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let questions: i64 = faqs::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;
        let posts: i64 = blog_posts::table
            .count()
            .get_result(&mut conn)
            .await
            .map_err(map_diesel_error)?;

        Ok(services + team + questions + posts == 0)
    }
}
