//! Login form input and its wire representation.

use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::fmt;
use validator::{Validate, ValidationError, ValidationErrors};

/// Credentials submitted from the login form.
///
/// Both fields are required. A value made only of whitespace is treated the
/// same as an empty one.
#[derive(Clone, Default, Deserialize, Validate)]
pub struct Credentials {
    #[validate(custom(function = "identifier_present"))]
    #[serde(default)]
    pub identifier: String,

    #[validate(custom(function = "password_present"))]
    #[serde(default)]
    pub password: String,
}

impl Credentials {
    pub fn new(identifier: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            password: password.into(),
        }
    }

    /// Validates the credentials and collects the first message per field.
    ///
    /// # Errors
    ///
    /// Returns the per-field error map when any field fails validation.
    pub fn check(&self) -> Result<(), FieldErrors> {
        self.validate().map_err(|errors| FieldErrors::from(&errors))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("identifier", &self.identifier)
            .field("password", &"***")
            .finish()
    }
}

fn identifier_present(value: &str) -> Result<(), ValidationError> {
    not_blank(value, "Please enter your ID.")
}

fn password_present(value: &str) -> Result<(), ValidationError> {
    not_blank(value, "Please enter your password.")
}

fn not_blank(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message(Cow::Borrowed(message)));
    }
    Ok(())
}

/// Body of `POST /auth/sign-in` on the remote authentication service.
///
/// The login identifier travels as `account`.
#[derive(Serialize)]
pub struct SignInRequest {
    pub account: String,
    pub password: String,
}

impl From<&Credentials> for SignInRequest {
    fn from(credentials: &Credentials) -> Self {
        Self {
            account: credentials.identifier.clone(),
            password: credentials.password.clone(),
        }
    }
}

impl fmt::Debug for SignInRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignInRequest")
            .field("account", &self.account)
            .field("password", &"***")
            .finish()
    }
}

/// Inline validation messages keyed by form field name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    /// Returns the message for `field`, if it failed validation.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }
}

impl From<&ValidationErrors> for FieldErrors {
    fn from(errors: &ValidationErrors) -> Self {
        let map = errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, list)| {
                let first = list.first()?;
                let message = first
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| first.code.to_string());
                Some((field.to_string(), message))
            })
            .collect();

        Self(map)
    }
}
