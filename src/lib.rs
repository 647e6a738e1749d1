//! # Login Portal
//!
//! A server-rendered login page that signs users in against a remote
//! authentication service and keeps their session profile in Redis.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Credentials and the session profile
//! - **Application Layer** ([`application`]) - Login orchestration and session management
//! - **Infrastructure Layer** ([`infrastructure`]) - Auth API client and key/value stores
//! - **API Layer** ([`api`]) - Health endpoint and shared HTTP middleware
//! - **Web Layer** ([`web`]) - Login and home pages
//!
//! ## Login Flow
//!
//! 1. `POST /login` validates `identifier` and `password`; errors render inline
//! 2. Valid credentials go to `POST {AUTH_API_URL}/auth/sign-in` as `account`/`password`
//! 3. On success every profile field is written to the session store and the
//!    browser is redirected to `/`
//! 4. On failure the page re-renders with a single generic notice
//!
//! ## Quick Start
//!
//! ```bash
//! export AUTH_API_URL="https://api.example.com"
//! export SESSION_SECRET="change-me"
//! export REDIS_URL="redis://localhost:6379"  # Optional
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{LoginError, LoginService, SessionManager};
    pub use crate::domain::entities::{Credentials, SessionKey, SessionProfile, SignInRequest};
    pub use crate::error::AppError;
    pub use crate::infrastructure::auth_api::{AuthApi, AuthApiError};
    pub use crate::infrastructure::store::{KeyValueStore, MemoryStore};
    pub use crate::state::AppState;
}
