//! Marketing reference data: service offerings, blog posts, team members
//! and FAQs.
//!
//! These records are read-mostly. They are created by the startup seed and
//! served verbatim; drafts are validated once before they reach a store.

use std::cmp::Reverse;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Validation errors returned by catalogue draft validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogueValidationError {
    EmptyField { field: &'static str },
    InvalidSlug { field: &'static str },
    NegativeOrder { value: i32 },
}

impl fmt::Display for CatalogueValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyField { field } => write!(f, "{field} must not be empty"),
            Self::InvalidSlug { field } => write!(
                f,
                "{field} must contain lowercase ASCII letters, digits, and hyphens"
            ),
            Self::NegativeOrder { value } => {
                write!(f, "faq.order must not be negative (got {value})")
            }
        }
    }
}

impl std::error::Error for CatalogueValidationError {}

fn non_empty(value: &str, field: &'static str) -> Result<(), CatalogueValidationError> {
    if value.trim().is_empty() {
        return Err(CatalogueValidationError::EmptyField { field });
    }
    Ok(())
}

fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && !value.starts_with('-')
        && !value.ends_with('-')
        && value
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

/// Input payload for a service offering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct ServiceOfferingDraft {
    pub category: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub estimated_time: String,
}

impl ServiceOfferingDraft {
    /// Check every field is present.
    pub fn validate(&self) -> Result<(), CatalogueValidationError> {
        non_empty(&self.category, "service.category")?;
        non_empty(&self.name, "service.name")?;
        non_empty(&self.description, "service.description")?;
        non_empty(&self.price, "service.price")?;
        non_empty(&self.estimated_time, "service.estimatedTime")
    }
}

/// A repair service the shop advertises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceOffering {
    pub id: i64,
    pub category: String,
    pub name: String,
    pub description: String,
    pub price: String,
    pub estimated_time: String,
}

impl ServiceOffering {
    /// Attach a store-assigned id to a draft.
    #[must_use]
    pub fn from_draft(id: i64, draft: ServiceOfferingDraft) -> Self {
        Self {
            id,
            category: draft.category,
            name: draft.name,
            description: draft.description,
            price: draft.price,
            estimated_time: draft.estimated_time,
        }
    }
}

/// Input payload for a blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct BlogPostDraft {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub category: String,
    #[serde(default)]
    pub image_url: Option<String>,
    pub published_at: DateTime<Utc>,
}

impl BlogPostDraft {
    /// Check required fields and the slug shape.
    pub fn validate(&self) -> Result<(), CatalogueValidationError> {
        non_empty(&self.title, "blogPost.title")?;
        if !is_valid_slug(&self.slug) {
            return Err(CatalogueValidationError::InvalidSlug {
                field: "blogPost.slug",
            });
        }
        non_empty(&self.content, "blogPost.content")?;
        non_empty(&self.excerpt, "blogPost.excerpt")?;
        non_empty(&self.category, "blogPost.category")
    }
}

/// A published article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    pub id: i64,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub excerpt: String,
    pub category: String,
    pub image_url: Option<String>,
    pub published_at: DateTime<Utc>,
}

impl BlogPost {
    /// Attach a store-assigned id to a draft.
    #[must_use]
    pub fn from_draft(id: i64, draft: BlogPostDraft) -> Self {
        Self {
            id,
            title: draft.title,
            slug: draft.slug,
            content: draft.content,
            excerpt: draft.excerpt,
            category: draft.category,
            image_url: draft.image_url,
            published_at: draft.published_at,
        }
    }
}

/// Input payload for a team member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct TeamMemberDraft {
    pub name: String,
    pub position: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl TeamMemberDraft {
    /// Check name and position are present.
    pub fn validate(&self) -> Result<(), CatalogueValidationError> {
        non_empty(&self.name, "teamMember.name")?;
        non_empty(&self.position, "teamMember.position")
    }
}

/// A member of staff shown on the about page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub id: i64,
    pub name: String,
    pub position: String,
    pub bio: Option<String>,
    pub image_url: Option<String>,
}

impl TeamMember {
    /// Attach a store-assigned id to a draft.
    #[must_use]
    pub fn from_draft(id: i64, draft: TeamMemberDraft) -> Self {
        Self {
            id,
            name: draft.name,
            position: draft.position,
            bio: draft.bio,
            image_url: draft.image_url,
        }
    }
}

/// Input payload for an FAQ entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(deny_unknown_fields)]
pub struct FaqDraft {
    pub question: String,
    pub answer: String,
    pub order: i32,
}

impl FaqDraft {
    /// Check text is present and the display order is non-negative.
    pub fn validate(&self) -> Result<(), CatalogueValidationError> {
        non_empty(&self.question, "faq.question")?;
        non_empty(&self.answer, "faq.answer")?;
        if self.order < 0 {
            return Err(CatalogueValidationError::NegativeOrder { value: self.order });
        }
        Ok(())
    }
}

/// A frequently asked question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Faq {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub order: i32,
}

impl Faq {
    /// Attach a store-assigned id to a draft.
    #[must_use]
    pub fn from_draft(id: i64, draft: FaqDraft) -> Self {
        Self {
            id,
            question: draft.question,
            answer: draft.answer,
            order: draft.order,
        }
    }
}

/// Sort blog posts newest first, ties by id.
pub fn sort_blog_posts(posts: &mut [BlogPost]) {
    posts.sort_by_key(|post| (Reverse(post.published_at), post.id));
}

/// Sort FAQs by display order, ties by id.
pub fn sort_faqs(faqs: &mut [Faq]) {
    faqs.sort_by_key(|faq| (faq.order, faq.id));
}
