//! Shared application state injected into handlers.

use std::sync::Arc;

use crate::application::services::{LoginService, SessionManager};

/// State shared by every handler.
#[derive(Clone)]
pub struct AppState {
    pub login_service: Arc<LoginService>,
    pub sessions: Arc<SessionManager>,
    /// Whether cookies carry the `Secure` attribute.
    pub cookie_secure: bool,
}

impl AppState {
    pub fn new(login_service: Arc<LoginService>, cookie_secure: bool) -> Self {
        let sessions = login_service.sessions().clone();
        Self {
            login_service,
            sessions,
            cookie_secure,
        }
    }
}
