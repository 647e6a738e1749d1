//! HTTP server initialization and runtime setup.
//!
//! Handles session store setup, the auth API client, and the Axum server lifecycle.

use crate::application::services::{LoginService, SessionManager};
use crate::config::Config;
use crate::infrastructure::auth_api::HttpAuthApi;
use crate::infrastructure::store::{KeyValueStore, MemoryStore, RedisStore};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Session store (Redis, or MemoryStore fallback)
/// - Auth API client
/// - Axum HTTP server with graceful shutdown on Ctrl-C
///
/// # Errors
///
/// Returns an error if:
/// - The auth API URL cannot be used
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = connect_store(&config).await;

    let auth_api = HttpAuthApi::new(&config.auth_api_url, config.auth_api_timeout())
        .context("Failed to build auth API client")?;
    tracing::info!("Auth API sign-in endpoint: {}", auth_api.sign_in_url());

    let sessions = Arc::new(SessionManager::new(
        store,
        config.session_secret.clone(),
        config.session_ttl_seconds,
    ));
    let login_service = Arc::new(LoginService::new(Arc::new(auth_api), sessions));

    let state = AppState::new(login_service, config.cookie_secure);

    let app = app_router(state, config.behind_proxy);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    Ok(())
}

/// Connects to Redis when configured, falling back to [`MemoryStore`].
async fn connect_store(config: &Config) -> Arc<dyn KeyValueStore> {
    if let Some(redis_url) = &config.redis_url {
        match RedisStore::connect(redis_url).await {
            Ok(redis) => {
                tracing::info!("Session store enabled (Redis)");
                return Arc::new(redis);
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using MemoryStore.", e);
            }
        }
    } else {
        tracing::info!("Session store: MemoryStore (Redis not configured)");
    }

    Arc::new(MemoryStore::new())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
