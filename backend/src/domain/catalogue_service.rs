//! Read-only service over the marketing reference data.

use std::sync::Arc;

use async_trait::async_trait;

use crate::domain::ports::{CatalogueQuery, CatalogueRepository, CatalogueRepositoryError};
use crate::domain::{BlogPost, Error, Faq, ServiceOffering, TeamMember};

/// Catalogue service implementing [`CatalogueQuery`].
#[derive(Clone)]
pub struct CatalogueService<C> {
    catalogue: Arc<C>,
}

impl<C> CatalogueService<C> {
    /// Create a new service over the given repository.
    pub fn new(catalogue: Arc<C>) -> Self {
        Self { catalogue }
    }
}

fn map_catalogue_error(error: CatalogueRepositoryError) -> Error {
    match error {
        CatalogueRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("catalogue repository unavailable: {message}"))
        }
        CatalogueRepositoryError::Query { message } => {
            Error::internal(format!("catalogue repository error: {message}"))
        }
        CatalogueRepositoryError::DuplicateSlug { slug } => {
            Error::internal(format!("unexpected blog slug conflict: {slug}"))
        }
    }
}

#[async_trait]
impl<C> CatalogueQuery for CatalogueService<C>
where
    C: CatalogueRepository,
{
    async fn services(&self, category: Option<String>) -> Result<Vec<ServiceOffering>, Error> {
        let result = match category.as_deref().map(str::trim) {
            Some(category) if !category.is_empty() => {
                self.catalogue.list_services_by_category(category).await
            }
            _ => self.catalogue.list_services().await,
        };
        result.map_err(map_catalogue_error)
    }

    async fn service(&self, id: i64) -> Result<ServiceOffering, Error> {
        self.catalogue
            .find_service(id)
            .await
            .map_err(map_catalogue_error)?
            .ok_or_else(|| Error::not_found(format!("service {id} not found")))
    }

    async fn blog_posts(&self) -> Result<Vec<BlogPost>, Error> {
        self.catalogue
            .list_blog_posts()
            .await
            .map_err(map_catalogue_error)
    }

    async fn blog_post(&self, slug: &str) -> Result<BlogPost, Error> {
        self.catalogue
            .find_blog_post_by_slug(slug)
            .await
            .map_err(map_catalogue_error)?
            .ok_or_else(|| Error::not_found(format!("blog post {slug} not found")))
    }

    async fn team(&self) -> Result<Vec<TeamMember>, Error> {
        self.catalogue
            .list_team_members()
            .await
            .map_err(map_catalogue_error)
    }

    async fn faqs(&self) -> Result<Vec<Faq>, Error> {
        self.catalogue.list_faqs().await.map_err(map_catalogue_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::MockCatalogueRepository;
    use rstest::rstest;

    #[rstest]
    #[case(None)]
    #[case(Some("  "))]
    #[tokio::test]
    async fn blank_category_lists_everything(#[case] category: Option<&str>) {
        let mut repo = MockCatalogueRepository::new();
        repo.expect_list_services()
            .times(1)
            .returning(|| Ok(Vec::new()));
        repo.expect_list_services_by_category().times(0);

        let service = CatalogueService::new(Arc::new(repo));
        let listed = service
            .services(category.map(str::to_owned))
            .await
            .expect("listed");
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn category_filter_is_trimmed() {
        let mut repo = MockCatalogueRepository::new();
        repo.expect_list_services().times(0);
        repo.expect_list_services_by_category()
            .withf(|category| category == "tablet")
            .times(1)
            .returning(|_| Ok(Vec::new()));

        let service = CatalogueService::new(Arc::new(repo));
        service
            .services(Some(" tablet ".to_owned()))
            .await
            .expect("listed");
    }

    #[tokio::test]
    async fn missing_blog_post_is_not_found() {
        let mut repo = MockCatalogueRepository::new();
        repo.expect_find_blog_post_by_slug()
            .times(1)
            .returning(|_| Ok(None));

        let error = CatalogueService::new(Arc::new(repo))
            .blog_post("nope")
            .await
            .expect_err("missing");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn query_failure_is_internal() {
        let mut repo = MockCatalogueRepository::new();
        repo.expect_list_faqs()
            .times(1)
            .returning(|| Err(CatalogueRepositoryError::query("syntax error")));

        let error = CatalogueService::new(Arc::new(repo))
            .faqs()
            .await
            .expect_err("query failed");
        assert_eq!(error.code(), ErrorCode::InternalError);
    }
}
