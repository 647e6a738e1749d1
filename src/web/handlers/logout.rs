//! Logout handler.

use axum::{extract::State, response::Redirect};
use axum_extra::extract::cookie::CookieJar;

use crate::state::AppState;
use crate::web::cookies::{self, Flash};

/// Clears the current session and returns to the login page.
///
/// # Endpoint
///
/// `POST /logout`
///
/// Always redirects; a store failure is logged and the cookie is still dropped.
pub async fn logout_handler(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Redirect) {
    if let Some(session_id) = cookies::session_id(&jar) {
        match state.sessions.clear(&session_id).await {
            Ok(()) => tracing::info!("session cleared"),
            Err(e) => tracing::error!("failed to clear session on logout: {}", e),
        }
    }

    let jar = cookies::without_session(jar);
    let jar = cookies::with_flash(jar, Flash::SignedOut, state.cookie_secure);

    (jar, Redirect::to("/login"))
}
