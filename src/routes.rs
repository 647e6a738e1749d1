//! Top-level router configuration combining pages and JSON routes.
//!
//! # Route Structure
//!
//! - `GET  /`        - Application root (session required)
//! - `GET  /login`   - Login page
//! - `POST /login`   - Login form submission (strict rate limit)
//! - `POST /logout`  - End the session
//! - `GET  /health`  - Session store health (public)
//! - `/static/*`     - Stylesheet
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-client token buckets on page routes
//! - **Session** - Cookie session on protected pages
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::{rate_limit, tracing};
use crate::state::AppState;
use crate::web;
use axum::Router;
use tower::Layer;
use tower_governor::key_extractor::{KeyExtractor, PeerIpKeyExtractor, SmartIpKeyExtractor};
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads the client IP from
///   `X-Forwarded-For` / `X-Real-IP` / `Forwarded` instead of the peer socket
///   address; enable only behind a trusted reverse proxy
pub fn app_router(state: AppState, behind_proxy: bool) -> NormalizePath<Router> {
    let pages = if behind_proxy {
        page_routes(state.clone(), SmartIpKeyExtractor)
    } else {
        page_routes(state.clone(), PeerIpKeyExtractor)
    };

    let router = Router::new()
        .merge(pages)
        .merge(api::routes::public_routes())
        .nest_service("/static", ServeDir::new("static"))
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

fn page_routes<K>(state: AppState, key_extractor: K) -> Router<AppState>
where
    K: KeyExtractor + Send + Sync + 'static,
    K::Key: Send + Sync,
{
    Router::new()
        .merge(web::routes::protected_routes(state))
        .merge(web::routes::rate_limited_public_routes(
            key_extractor.clone(),
        ))
        .layer(rate_limit::layer(key_extractor))
}
