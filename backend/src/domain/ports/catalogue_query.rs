//! Driving port for the public reference data.

use async_trait::async_trait;

use crate::domain::{BlogPost, Error, Faq, ServiceOffering, TeamMember};

/// Domain use-case port for catalogue reads.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogueQuery: Send + Sync {
    /// Service offerings, optionally restricted to one category.
    async fn services(&self, category: Option<String>) -> Result<Vec<ServiceOffering>, Error>;

    /// One service offering.
    async fn service(&self, id: i64) -> Result<ServiceOffering, Error>;

    /// Blog posts, newest first.
    async fn blog_posts(&self) -> Result<Vec<BlogPost>, Error>;

    /// One blog post by slug.
    async fn blog_post(&self, slug: &str) -> Result<BlogPost, Error>;

    /// Team members.
    async fn team(&self) -> Result<Vec<TeamMember>, Error>;

    /// FAQs by display order.
    async fn faqs(&self) -> Result<Vec<Faq>, Error>;
}
