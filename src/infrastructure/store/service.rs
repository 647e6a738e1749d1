//! Key/value store trait and error types.

use async_trait::async_trait;

/// Errors that can occur during store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store connection error: {0}")]
    ConnectionError(String),
    #[error("Store operation error: {0}")]
    OperationError(String),
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// String-keyed durable storage for session data.
///
/// Unlike a cache, failures are reported to the caller: a session that was
/// only half written must not be treated as signed in.
///
/// # Implementations
///
/// - [`crate::infrastructure::store::RedisStore`] - Redis-backed store with TTL support
/// - [`crate::infrastructure::store::MemoryStore`] - In-process map for development and tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value stored under `key`.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(value))` if the key exists and has not expired
    /// - `Ok(None)` otherwise
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Writes `value` under `key`, replacing any previous value.
    ///
    /// # Arguments
    ///
    /// - `ttl_seconds` - Expiry of the entry; `None` keeps it until deleted
    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> StoreResult<()>;

    /// Removes `key`. Deleting a missing key is not an error.
    async fn delete(&self, key: &str) -> StoreResult<()>;

    /// Checks if the store backend is reachable.
    ///
    /// Used by the health endpoint.
    async fn health_check(&self) -> bool;
}
