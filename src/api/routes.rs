//! JSON route configuration.

use crate::api::handlers::health_handler;
use crate::state::AppState;
use axum::{Router, routing::get};

/// Public JSON routes.
///
/// # Endpoints
///
/// - `GET /health` - Session store health report
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/health", get(health_handler))
}
