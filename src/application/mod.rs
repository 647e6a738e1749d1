//! Application layer services implementing the login flow.
//!
//! Services coordinate the domain model with the infrastructure contracts and
//! give HTTP handlers a small API.
//!
//! # Available Services
//!
//! - [`services::login_service::LoginService`] - Form submission and sign-in
//! - [`services::session_manager::SessionManager`] - Session read/write/clear
//! - [`services::in_flight::InFlight`] - Guard against duplicate pending submissions

pub mod services;
