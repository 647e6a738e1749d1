//! Page route configuration.

use crate::api::middleware::rate_limit;
use crate::state::AppState;
use crate::web::handlers::{home_handler, login_page, login_submit, logout_handler};
use crate::web::middleware::web_auth;
use axum::{
    Router, middleware,
    routing::{get, post},
};
use tower_governor::key_extractor::KeyExtractor;

/// Pages requiring a session.
///
/// Protected via [`crate::web::middleware::web_auth`].
///
/// # Endpoints
///
/// - `GET /` - Application root
pub fn protected_routes(state: AppState) -> Router<AppState> {
    Router::new()
        .route("/", get(home_handler))
        .route_layer(middleware::from_fn_with_state(state, web_auth::layer))
}

/// Pages without a session requirement.
///
/// # Endpoints
///
/// - `GET  /login`  - Login page
/// - `POST /login`  - Login form submission
/// - `POST /logout` - End the session
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login_submit))
        .route("/logout", post(logout_handler))
}

/// Same routes as [`public_routes`], with `POST /login` behind
/// [`rate_limit::login_layer`].
///
/// The limiter keys clients with `key_extractor`, so the served app needs
/// connect info (and forwarding headers when behind a proxy).
pub fn rate_limited_public_routes<K>(key_extractor: K) -> Router<AppState>
where
    K: KeyExtractor + Send + Sync + 'static,
    K::Key: Send + Sync,
{
    let submit = post(login_submit).layer(rate_limit::login_layer(key_extractor));

    Router::new()
        .route("/login", get(login_page).merge(submit))
        .route("/logout", post(logout_handler))
}

/// All page routes without rate limiting, ready to serve.
pub fn router(state: AppState) -> Router {
    Router::new()
        .merge(protected_routes(state.clone()))
        .merge(public_routes())
        .with_state(state)
}
