//! reqwest client for `POST /auth/sign-in`.

use super::service::{AuthApi, AuthApiError};
use crate::domain::entities::{SessionProfile, SignInRequest, SignInResponse};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// HTTP client of the remote authentication service.
///
/// The response body is decoded strictly: a success status whose body lacks a
/// required profile field is reported as [`AuthApiError::MalformedPayload`].
pub struct HttpAuthApi {
    client: reqwest::Client,
    sign_in_url: Url,
}

impl HttpAuthApi {
    /// Builds a client for the service rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns an error if `base_url` is not an absolute URL or the TLS backend
    /// cannot be initialised.
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let sign_in_url = sign_in_url(base_url)?;

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("login-portal/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            sign_in_url,
        })
    }

    pub fn sign_in_url(&self) -> &Url {
        &self.sign_in_url
    }
}

/// Resolves `auth/sign-in` against `base_url`, keeping any path prefix.
fn sign_in_url(base_url: &str) -> Result<Url, url::ParseError> {
    let mut base = Url::parse(base_url)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join("auth/sign-in")
}

#[async_trait]
impl AuthApi for HttpAuthApi {
    async fn sign_in(&self, request: &SignInRequest) -> Result<SessionProfile, AuthApiError> {
        let response = self
            .client
            .post(self.sign_in_url.clone())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthApiError::Rejected {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        let parsed: SignInResponse = serde_json::from_slice(&body)?;

        debug!(account = %parsed.data.account, "sign-in accepted by auth service");
        Ok(parsed.data)
    }
}
