//! Port for marketing reference data.

use async_trait::async_trait;

use crate::domain::{
    BlogPost, BlogPostDraft, Faq, FaqDraft, ServiceOffering, ServiceOfferingDraft, TeamMember,
    TeamMemberDraft,
};

use super::define_port_error;

define_port_error! {
    /// Errors raised by catalogue repository adapters.
    pub enum CatalogueRepositoryError {
        /// Repository connection could not be established.
        Connection { message: String } =>
            "catalogue repository connection failed: {message}",
        /// Query or mutation failed during execution.
        Query { message: String } =>
            "catalogue repository query failed: {message}",
        /// A blog post with the slug already exists.
        DuplicateSlug { slug: String } =>
            "blog post slug {slug} is already in use",
    }
}

/// Port for services, blog posts, team members and FAQs.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueRepository: Send + Sync {
    /// All service offerings ordered by id.
    async fn list_services(&self) -> Result<Vec<ServiceOffering>, CatalogueRepositoryError>;

    /// Service offerings in `category`, ordered by id.
    async fn list_services_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<ServiceOffering>, CatalogueRepositoryError>;

    /// Find a service offering by id.
    async fn find_service(
        &self,
        id: i64,
    ) -> Result<Option<ServiceOffering>, CatalogueRepositoryError>;

    /// Insert a service offering.
    async fn create_service(
        &self,
        draft: ServiceOfferingDraft,
    ) -> Result<ServiceOffering, CatalogueRepositoryError>;

    /// Blog posts, newest first.
    async fn list_blog_posts(&self) -> Result<Vec<BlogPost>, CatalogueRepositoryError>;

    /// Find a blog post by slug.
    async fn find_blog_post_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<BlogPost>, CatalogueRepositoryError>;

    /// Insert a blog post.
    async fn create_blog_post(
        &self,
        draft: BlogPostDraft,
    ) -> Result<BlogPost, CatalogueRepositoryError>;

    /// Team members ordered by id.
    async fn list_team_members(&self) -> Result<Vec<TeamMember>, CatalogueRepositoryError>;

    /// Insert a team member.
    async fn create_team_member(
        &self,
        draft: TeamMemberDraft,
    ) -> Result<TeamMember, CatalogueRepositoryError>;

    /// FAQs by display order.
    async fn list_faqs(&self) -> Result<Vec<Faq>, CatalogueRepositoryError>;

    /// Insert an FAQ.
    async fn create_faq(&self, draft: FaqDraft) -> Result<Faq, CatalogueRepositoryError>;

    /// Whether any reference data has been stored yet.
    async fn is_empty(&self) -> Result<bool, CatalogueRepositoryError>;
}
