//! Contact-form messages.

use chrono::{DateTime, Utc};

use super::EmailAddress;
use super::validation::{FieldViolation, required_text};

const NAME_MAX: usize = 100;
const SUBJECT_MAX: usize = 200;
const MESSAGE_MAX: usize = 5_000;

/// Unvalidated contact form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

/// Validated contact form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactSubmission {
    pub name: String,
    pub email: EmailAddress,
    pub subject: String,
    pub message: String,
}

impl ContactSubmission {
    /// Validate a contact form.
    pub fn new(draft: ContactDraft) -> Result<Self, FieldViolation> {
        Ok(Self {
            name: required_text("name", &draft.name, NAME_MAX)?,
            email: EmailAddress::parse("email", &draft.email)?,
            subject: required_text("subject", &draft.subject, SUBJECT_MAX)?,
            message: required_text("message", &draft.message, MESSAGE_MAX)?,
        })
    }
}

/// A stored contact message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactMessage {
    pub id: i64,
    pub name: String,
    pub email: EmailAddress,
    pub subject: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl ContactMessage {
    /// Attach a store-assigned id and receipt time.
    #[must_use]
    pub fn from_submission(id: i64, submission: ContactSubmission, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: submission.name,
            email: submission.email,
            subject: submission.subject,
            message: submission.message,
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn rejects_blank_subject() {
        let err = ContactSubmission::new(ContactDraft {
            name: "Sam".to_owned(),
            email: "sam@x.com".to_owned(),
            subject: String::new(),
            message: "hello".to_owned(),
        })
        .expect_err("must reject");
        assert_eq!(err.field(), "subject");
    }

    #[rstest]
    fn accepts_complete_form() {
        let submission = ContactSubmission::new(ContactDraft {
            name: " Sam ".to_owned(),
            email: "sam@x.com".to_owned(),
            subject: "Quote".to_owned(),
            message: "How much for a screen?".to_owned(),
        })
        .expect("valid");
        assert_eq!(submission.name, "Sam");
    }
}
