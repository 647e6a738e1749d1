//! Client of the remote authentication service.
//!
//! Provides an [`AuthApi`] trait with the [`HttpAuthApi`] implementation.

mod http_auth_api;
mod service;

pub use http_auth_api::HttpAuthApi;
pub use service::{AuthApi, AuthApiError};

#[cfg(test)]
pub use service::MockAuthApi;
