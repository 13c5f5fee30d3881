//! Request middleware.
//!
//! Purpose: define middleware components for request lifecycle concerns such
//! as trace identifier propagation.

pub mod trace;

pub use trace::Trace;
