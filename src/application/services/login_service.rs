//! Login submission: validate, authenticate, persist.

use std::sync::Arc;
use tracing::{error, info, warn};

use super::in_flight::InFlight;
use super::session_manager::SessionManager;
use crate::domain::entities::{Credentials, FieldErrors, SessionProfile, SignInRequest};
use crate::infrastructure::auth_api::AuthApi;

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct LoginOutcome {
    /// Newly issued session id, to be handed to the browser.
    pub session_id: String,
    pub profile: SessionProfile,
}

/// Why a login did not succeed.
#[derive(Debug, thiserror::Error)]
pub enum LoginError {
    /// The form failed validation; the auth service was not contacted.
    #[error("invalid login form")]
    Invalid(FieldErrors),

    /// A sign-in for the same identifier is still pending.
    #[error("login already in progress")]
    InProgress,

    /// Authentication or session persistence failed. The cause is logged, not surfaced.
    #[error("login failed")]
    Failed,
}

/// Orchestrates a login submission.
///
/// # Flow
///
/// 1. Validate [`Credentials`]
/// 2. Claim the in-flight slot for the identifier
/// 3. Call the remote auth service
/// 4. Replace any previous session with a new one holding the returned profile
pub struct LoginService {
    auth_api: Arc<dyn AuthApi>,
    sessions: Arc<SessionManager>,
    in_flight: Arc<InFlight>,
}

impl LoginService {
    pub fn new(auth_api: Arc<dyn AuthApi>, sessions: Arc<SessionManager>) -> Self {
        Self {
            auth_api,
            sessions,
            in_flight: InFlight::new(),
        }
    }

    /// Submits credentials.
    ///
    /// # Arguments
    ///
    /// - `credentials` - the posted form
    /// - `previous_session` - session id currently held by the browser, cleared on success
    ///
    /// # Errors
    ///
    /// - [`LoginError::Invalid`] if validation fails
    /// - [`LoginError::InProgress`] if the identifier already has a pending submission
    /// - [`LoginError::Failed`] for any remote or storage failure
    pub async fn submit(
        &self,
        credentials: Credentials,
        previous_session: Option<&str>,
    ) -> Result<LoginOutcome, LoginError> {
        credentials.check().map_err(LoginError::Invalid)?;

        let Some(_guard) = self.in_flight.try_begin(&credentials.identifier) else {
            warn!(identifier = %credentials.identifier, "duplicate login submission");
            return Err(LoginError::InProgress);
        };

        let request = SignInRequest::from(&credentials);
        drop(credentials);

        let profile = match self.auth_api.sign_in(&request).await {
            Ok(profile) => profile,
            Err(e) => {
                error!(account = %request.account, "login failed: {}", e);
                return Err(LoginError::Failed);
            }
        };

        if let Some(previous) = previous_session
            && let Err(e) = self.sessions.clear(previous).await
        {
            warn!("failed to clear previous session: {}", e);
        }

        let session_id = SessionManager::new_session_id();
        if let Err(e) = self.sessions.write(&session_id, &profile).await {
            error!(account = %request.account, "failed to persist session: {}", e);
            return Err(LoginError::Failed);
        }

        info!(account = %profile.account, "login succeeded");

        Ok(LoginOutcome {
            session_id,
            profile,
        })
    }

    pub fn sessions(&self) -> &Arc<SessionManager> {
        &self.sessions
    }
}
