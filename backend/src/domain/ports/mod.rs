//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driven ports (repositories, the tracking-code generator) are implemented
//! by outbound adapters and expose typed error enums. Driving ports are the
//! use-cases inbound adapters call; they speak [`crate::domain::Error`].

mod macros;
pub(crate) use macros::define_port_error;

mod catalogue_query;
mod catalogue_repository;
mod contact_command;
mod contact_message_repository;
mod repair_command;
mod repair_query;
mod repair_repository;
mod tracking_code_generator;
mod user_accounts;
mod user_repository;

#[cfg(test)]
pub use catalogue_query::MockCatalogueQuery;
pub use catalogue_query::CatalogueQuery;
#[cfg(test)]
pub use catalogue_repository::MockCatalogueRepository;
pub use catalogue_repository::{CatalogueRepository, CatalogueRepositoryError};
#[cfg(test)]
pub use contact_command::MockContactCommand;
pub use contact_command::ContactCommand;
#[cfg(test)]
pub use contact_message_repository::MockContactMessageRepository;
pub use contact_message_repository::{ContactMessageRepository, ContactMessageRepositoryError};
#[cfg(test)]
pub use repair_command::MockRepairCommand;
pub use repair_command::{CreateRepairRequest, RepairCommand, UpdateRepairStatusRequest};
#[cfg(test)]
pub use repair_query::MockRepairQuery;
pub use repair_query::{RepairQuery, TrackedRepair};
#[cfg(test)]
pub use repair_repository::MockRepairRepository;
pub use repair_repository::{RepairRepository, RepairRepositoryError};
#[cfg(test)]
pub use tracking_code_generator::MockTrackingCodeGenerator;
pub use tracking_code_generator::TrackingCodeGenerator;
#[cfg(test)]
pub use user_accounts::MockUserAccounts;
pub use user_accounts::UserAccounts;
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserRepository, UserRepositoryError};
