//! Infrastructure layer for external integrations.
//!
//! Concrete implementations of the contracts the application layer relies on.
//!
//! # Modules
//!
//! - [`auth_api`] - HTTP client of the remote authentication service
//! - [`store`] - Key/value session storage (Redis and in-memory implementations)

pub mod auth_api;
pub mod store;
