//! Core domain entities of the login flow.
//!
//! Entities are plain data structures; orchestration lives in
//! [`crate::application::services`].
//!
//! # Entity Types
//!
//! - [`Credentials`] - Login form input with its validation rules
//! - [`SignInRequest`] - Wire body sent to the remote auth service
//! - [`SessionProfile`] - User attributes returned after sign-in
//! - [`SessionKey`] - Storage key of a single profile field

pub mod credentials;
pub mod session_profile;

pub use credentials::{Credentials, FieldErrors, SignInRequest};
pub use session_profile::{SessionKey, SessionProfile, SignInResponse, grade_text};
