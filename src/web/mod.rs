//! Server-rendered pages.
//!
//! Uses Askama templates for rendering and cookies for session tracking.
//!
//! # Modules
//!
//! - [`handlers`] - Page handlers
//! - [`middleware`] - Session resolution for protected pages
//! - [`routes`] - Page route configuration
//! - [`cookies`] - Session and flash cookie helpers
//! - [`notice`] - User-facing notifications

pub mod cookies;
pub mod handlers;
pub mod middleware;
pub mod notice;
pub mod routes;
