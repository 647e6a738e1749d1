//! Request processing middleware shared by all routes.

pub mod rate_limit;
pub mod tracing;
