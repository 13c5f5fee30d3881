//! FastFix backend library: repair booking, tracking and shop catalogue.
//!
//! Layout follows ports and adapters: [`domain`] holds the model, services
//! and ports; [`inbound`] exposes them over HTTP; [`outbound`] implements
//! the repository ports in memory and on PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
