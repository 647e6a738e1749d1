//! Cookie-based session middleware for pages that need a signed-in user.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;

use crate::domain::entities::SessionProfile;
use crate::error::AppError;
use crate::state::AppState;
use crate::web::cookies;

/// Session resolved by [`layer`], available to handlers as an extension.
#[derive(Debug, Clone)]
pub struct CurrentSession {
    pub profile: SessionProfile,
}

/// Resolves the `sid` cookie into a [`CurrentSession`].
///
/// # Authentication Flow
///
/// 1. Extract the `sid` cookie
/// 2. Load the profile via [`crate::application::services::SessionManager::read`]
/// 3. On success, insert [`CurrentSession`] and continue to the handler
/// 4. On a missing cookie or an unknown/incomplete session, redirect to `/login`
///
/// Store failures answer with `500` instead of redirecting, so an outage is
/// not mistaken for a signed-out user.
///
/// # Example
///
/// ```rust,ignore
/// let protected = Router::new()
///     .route("/", get(home_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), web_auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    jar: CookieJar,
    mut req: Request,
    next: Next,
) -> Response {
    let Some(session_id) = cookies::session_id(&jar) else {
        return Redirect::to("/login").into_response();
    };

    match st.sessions.read(&session_id).await {
        Ok(Some(profile)) => {
            req.extensions_mut().insert(CurrentSession { profile });
            next.run(req).await
        }
        Ok(None) => Redirect::to("/login").into_response(),
        Err(e) => AppError::from(e).into_response(),
    }
}
