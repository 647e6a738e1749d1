//! Remote authentication API trait and error types.

use async_trait::async_trait;

use crate::domain::entities::{SessionProfile, SignInRequest};

/// Errors returned by the remote authentication service client.
///
/// Callers do not surface the variant to the user; it exists for logs.
#[derive(Debug, thiserror::Error)]
pub enum AuthApiError {
    #[error("auth service unreachable: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("auth service rejected sign-in with status {status}")]
    Rejected { status: u16 },
    #[error("auth service returned a malformed payload: {0}")]
    MalformedPayload(#[from] serde_json::Error),
}

/// Client of the remote authentication service.
///
/// # Implementations
///
/// - [`crate::infrastructure::auth_api::HttpAuthApi`] - reqwest-based client
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchanges credentials for a session profile.
    ///
    /// # Errors
    ///
    /// - [`AuthApiError::Transport`] on connection failures and timeouts
    /// - [`AuthApiError::Rejected`] on any non-success status
    /// - [`AuthApiError::MalformedPayload`] if the body does not carry a complete profile
    async fn sign_in(&self, request: &SignInRequest) -> Result<SessionProfile, AuthApiError>;
}
