//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory**: process-local store used for development and tests
//! - **persistence**: PostgreSQL-backed repositories using Diesel ORM
//! - **tracking_codes**: random tracking-code source
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod memory;
pub mod persistence;
pub mod tracking_codes;
