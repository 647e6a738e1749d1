//! Business logic services for the application layer.

pub mod in_flight;
pub mod login_service;
pub mod session_manager;

pub use in_flight::{InFlight, InFlightGuard};
pub use login_service::{LoginError, LoginOutcome, LoginService};
pub use session_manager::SessionManager;
