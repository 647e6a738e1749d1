//! Domain layer: the data model of the login flow.
//!
//! Has no dependencies on infrastructure or presentation layers. Storage and
//! remote-API contracts live in [`crate::infrastructure`] behind traits.
//!
//! # Login Flow
//!
//! 1. The login form is parsed into [`entities::Credentials`] and validated
//! 2. Valid credentials are mapped to [`entities::SignInRequest`]
//! 3. The remote service answers with a [`entities::SessionProfile`]
//! 4. Each profile field is persisted under its [`entities::SessionKey`]

pub mod entities;
