//! Domain primitives, aggregates and services.
//!
//! Purpose: define the strongly typed repair-shop model used by the API and
//! persistence layers, and the services that enforce its rules. Types keep
//! their invariants behind constructors; serialisation contracts (serde)
//! are documented on each type.
//!
//! Public surface:
//! - Error (alias to `error::Error`): transport-agnostic error payload.
//! - Repair, RepairStatus, TrackingCode, ProgressEntry: the repair model.
//! - User, ServiceOffering, BlogPost, TeamMember, Faq, ContactMessage.
//! - RepairLifecycleService and friends: implementations of the driving
//!   ports in [`ports`].

pub mod catalogue;
pub mod catalogue_seed;
pub mod contact;
pub mod email;
pub mod error;
pub mod ports;
pub mod repair;
pub mod trace_id;
pub mod user;
pub mod validation;

mod catalogue_service;
mod contact_service;
mod repair_lifecycle_service;
mod user_service;

pub use self::catalogue::{
    BlogPost, BlogPostDraft, CatalogueValidationError, Faq, FaqDraft, ServiceOffering,
    ServiceOfferingDraft, TeamMember, TeamMemberDraft, sort_blog_posts, sort_faqs,
};
pub use self::catalogue_seed::{CatalogueSeed, SeedOutcome, seed_catalogue};
pub use self::catalogue_service::CatalogueService;
pub use self::contact::{ContactDraft, ContactMessage, ContactSubmission};
pub use self::contact_service::ContactService;
pub use self::email::EmailAddress;
pub use self::error::{Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER};
pub use self::repair::{
    INTAKE_NOTE, IllegalTransition, NewRepair, ParseRepairStatusError, ProgressEntry, Repair,
    RepairDraft, RepairId, RepairIntake, RepairIntakeDraft, RepairStatus, RepairValidationError,
    SeedEntry, StatusChange, TRACKING_CODE_ALPHABET, TRACKING_CODE_PREFIX,
    TRACKING_CODE_SUFFIX_LEN, TrackingCode, TrackingCodeError, default_status_note,
    order_history,
};
pub use self::repair_lifecycle_service::{MAX_TRACKING_CODE_ATTEMPTS, RepairLifecycleService};
pub use self::trace_id::TraceId;
pub use self::user::{
    NewUser, PasswordHash, Registration, RegistrationDraft, User, UserId, Username,
};
pub use self::user_service::UserService;
pub use self::validation::{FieldViolation, ViolationCode};
