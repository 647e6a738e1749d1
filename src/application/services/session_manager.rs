//! Session manager owning the persisted session profile.

use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::entities::{SessionKey, SessionProfile};
use crate::infrastructure::store::{KeyValueStore, StoreResult};

type HmacSha256 = Hmac<Sha256>;

const SESSION_ID_CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
const SESSION_ID_LEN: usize = 48;

/// Reads, writes and clears session profiles in a [`KeyValueStore`].
///
/// Each profile field lives under its own key:
///
/// ```text
/// session:{digest}:{field}
/// ```
///
/// `digest` is the HMAC-SHA256 of the session id keyed by the server secret,
/// so the cookie value itself never appears in the store.
pub struct SessionManager {
    store: Arc<dyn KeyValueStore>,
    signing_secret: String,
    ttl_seconds: u64,
}

impl SessionManager {
    /// Creates a session manager.
    ///
    /// # Arguments
    ///
    /// - `store` - backing key/value store
    /// - `signing_secret` - HMAC key for session digests
    /// - `ttl_seconds` - expiry applied to every written key
    pub fn new(store: Arc<dyn KeyValueStore>, signing_secret: String, ttl_seconds: u64) -> Self {
        Self {
            store,
            signing_secret,
            ttl_seconds,
        }
    }

    /// Generates a fresh random session id.
    pub fn new_session_id() -> String {
        let mut rng = rand::rng();

        (0..SESSION_ID_LEN)
            .map(|_| {
                let idx = rng.random_range(0..SESSION_ID_CHARSET.len());
                SESSION_ID_CHARSET[idx] as char
            })
            .collect()
    }

    fn digest(&self, session_id: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(session_id.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Returns the store key of `field` for `session_id`.
    pub fn storage_key(&self, session_id: &str, field: SessionKey) -> String {
        format!("session:{}:{}", self.digest(session_id), field.as_str())
    }

    /// Persists every field of `profile` under `session_id`.
    ///
    /// A field without a value (kakao account or a null descriptive
    /// attribute) deletes its key so a previous value does not survive. If any write fails the session is cleared before returning.
    ///
    /// # Errors
    ///
    /// Returns the first store error encountered.
    pub async fn write(&self, session_id: &str, profile: &SessionProfile) -> StoreResult<()> {
        for field in SessionKey::ALL {
            let key = self.storage_key(session_id, field);
            let result = match profile.value_of(field) {
                Some(value) => self.store.set(&key, &value, Some(self.ttl_seconds)).await,
                None => self.store.delete(&key).await,
            };

            if let Err(e) = result {
                warn!(field = field.as_str(), "session write failed: {}", e);
                if let Err(clear_err) = self.clear(session_id).await {
                    warn!("failed to clear partially written session: {}", clear_err);
                }
                return Err(e);
            }
        }

        debug!(account = %profile.account, "session written");
        Ok(())
    }

    /// Loads the profile stored under `session_id`.
    ///
    /// Returns `Ok(None)` if the session does not exist or is incomplete.
    ///
    /// # Errors
    ///
    /// Returns a store error if a read fails.
    pub async fn read(&self, session_id: &str) -> StoreResult<Option<SessionProfile>> {
        let mut stored = HashMap::with_capacity(SessionKey::ALL.len());
        for field in SessionKey::ALL {
            if let Some(value) = self.store.get(&self.storage_key(session_id, field)).await? {
                stored.insert(field, value);
            }
        }

        if stored.is_empty() {
            return Ok(None);
        }

        let profile = SessionProfile::from_stored(|field| stored.remove(&field));
        if profile.is_none() {
            debug!("discarding incomplete session");
        }
        Ok(profile)
    }

    /// Deletes every key of `session_id`.
    ///
    /// # Errors
    ///
    /// Returns the first store error encountered; remaining keys are still attempted.
    pub async fn clear(&self, session_id: &str) -> StoreResult<()> {
        let mut first_error = None;
        for field in SessionKey::ALL {
            if let Err(e) = self.store.delete(&self.storage_key(session_id, field)).await {
                first_error.get_or_insert(e);
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// Reports whether the backing store is reachable.
    pub async fn store_healthy(&self) -> bool {
        self.store.health_check().await
    }
}
