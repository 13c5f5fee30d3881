//! Startup seed for the marketing reference data.
//!
//! The fixture is compiled into the binary. Seeding is skipped when the
//! store already holds reference data, so restarts against a persistent
//! database do not duplicate rows.

use serde::Deserialize;
use tracing::{debug, info};

use crate::domain::ports::{CatalogueRepository, CatalogueRepositoryError};
use crate::domain::{BlogPostDraft, Error, FaqDraft, ServiceOfferingDraft, TeamMemberDraft};

const CATALOGUE_FIXTURE: &str = include_str!("../../fixtures/catalogue.json");

/// Reference data loaded from the bundled fixture.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CatalogueSeed {
    pub services: Vec<ServiceOfferingDraft>,
    pub team_members: Vec<TeamMemberDraft>,
    pub faqs: Vec<FaqDraft>,
    pub blog_posts: Vec<BlogPostDraft>,
}

/// What [`seed_catalogue`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store already held data.
    Skipped,
    /// The fixture was written.
    Seeded {
        services: usize,
        team_members: usize,
        faqs: usize,
        blog_posts: usize,
    },
}

impl CatalogueSeed {
    /// Parse and validate the bundled fixture.
    pub fn bundled() -> Result<Self, Error> {
        Self::from_json(CATALOGUE_FIXTURE)
    }

    /// Parse and validate a fixture document.
    pub fn from_json(raw: &str) -> Result<Self, Error> {
        let seed: Self = serde_json::from_str(raw)
            .map_err(|err| Error::internal(format!("catalogue fixture is malformed: {err}")))?;
        seed.validate()?;
        Ok(seed)
    }

    fn validate(&self) -> Result<(), Error> {
        let invalid = |err: crate::domain::CatalogueValidationError| {
            Error::internal(format!("catalogue fixture is invalid: {err}"))
        };
        for draft in &self.services {
            draft.validate().map_err(invalid)?;
        }
        for draft in &self.team_members {
            draft.validate().map_err(invalid)?;
        }
        for draft in &self.faqs {
            draft.validate().map_err(invalid)?;
        }
        for draft in &self.blog_posts {
            draft.validate().map_err(invalid)?;
        }
        Ok(())
    }
}

fn map_seed_error(error: CatalogueRepositoryError) -> Error {
    match error {
        CatalogueRepositoryError::Connection { message } => {
            Error::service_unavailable(format!("catalogue repository unavailable: {message}"))
        }
        other => Error::internal(format!("catalogue seed failed: {other}")),
    }
}

/// Write `seed` into `repo` unless it already holds reference data.
pub async fn seed_catalogue<C>(repo: &C, seed: CatalogueSeed) -> Result<SeedOutcome, Error>
where
    C: CatalogueRepository + ?Sized,
{
    if !repo.is_empty().await.map_err(map_seed_error)? {
        debug!("catalogue already populated; skipping seed");
        return Ok(SeedOutcome::Skipped);
    }

    let CatalogueSeed {
        services,
        team_members,
        faqs,
        blog_posts,
    } = seed;
    let outcome = SeedOutcome::Seeded {
        services: services.len(),
        team_members: team_members.len(),
        faqs: faqs.len(),
        blog_posts: blog_posts.len(),
    };

    for draft in services {
        repo.create_service(draft).await.map_err(map_seed_error)?;
    }
    for draft in team_members {
        repo.create_team_member(draft)
            .await
            .map_err(map_seed_error)?;
    }
    for draft in faqs {
        repo.create_faq(draft).await.map_err(map_seed_error)?;
    }
    for draft in blog_posts {
        repo.create_blog_post(draft).await.map_err(map_seed_error)?;
    }

    info!(?outcome, "catalogue seeded");
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::MockCatalogueRepository;
    use crate::domain::{BlogPost, ErrorCode, Faq, ServiceOffering, TeamMember};

    #[test]
    fn bundled_fixture_is_valid() {
        let seed = CatalogueSeed::bundled().expect("fixture parses");
        assert_eq!(seed.services.len(), 12);
        assert_eq!(seed.team_members.len(), 4);
        assert_eq!(seed.faqs.len(), 5);
        assert_eq!(seed.blog_posts.len(), 3);
    }

    #[test]
    fn invalid_fixture_is_rejected() {
        let raw = r#"{"services": [], "teamMembers": [], "faqs": [
            {"question": "q", "answer": "a", "order": -1}
        ], "blogPosts": []}"#;
        let error = CatalogueSeed::from_json(raw).expect_err("negative order");
        assert_eq!(error.code(), ErrorCode::InternalError);
    }

    #[tokio::test]
    async fn populated_store_is_left_alone() {
        let mut repo = MockCatalogueRepository::new();
        repo.expect_is_empty().times(1).returning(|| Ok(false));
        repo.expect_create_service().times(0);

        let seed = CatalogueSeed::bundled().expect("fixture parses");
        let outcome = seed_catalogue(&repo, seed).await.expect("seed ran");
        assert_eq!(outcome, SeedOutcome::Skipped);
    }

    #[tokio::test]
    async fn empty_store_receives_every_record() {
        let mut repo = MockCatalogueRepository::new();
        repo.expect_is_empty().times(1).returning(|| Ok(true));
        repo.expect_create_service()
            .times(12)
            .returning(|draft| Ok(ServiceOffering::from_draft(1, draft)));
        repo.expect_create_team_member()
            .times(4)
            .returning(|draft| Ok(TeamMember::from_draft(1, draft)));
        repo.expect_create_faq()
            .times(5)
            .returning(|draft| Ok(Faq::from_draft(1, draft)));
        repo.expect_create_blog_post()
            .times(3)
            .returning(|draft| Ok(BlogPost::from_draft(1, draft)));

        let seed = CatalogueSeed::bundled().expect("fixture parses");
        let outcome = seed_catalogue(&repo, seed).await.expect("seed ran");
        assert_eq!(
            outcome,
            SeedOutcome::Seeded {
                services: 12,
                team_members: 4,
                faqs: 5,
                blog_posts: 3,
            }
        );
    }
}
