//! Redis-backed session store.

use super::service::{KeyValueStore, StoreError, StoreResult};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info, warn};

/// Redis store for session keys.
///
/// Uses `ConnectionManager` for connection reuse and reconnects. Every key is
/// namespaced with `portal:` so the database can be shared.
pub struct RedisStore {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> StoreResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            StoreError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            StoreError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| StoreError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: "portal:".to_string(),
        })
    }

    fn build_key(&self, key: &str) -> String {
        format!("{}{}", self.key_prefix, key)
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();

        conn.get::<_, Option<String>>(&full_key).await.map_err(|e| {
            warn!("Redis GET error for {}: {}", full_key, e);
            StoreError::OperationError(e.to_string())
        })
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> StoreResult<()> {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();

        let result = match ttl_seconds {
            Some(ttl) => conn.set_ex::<_, _, ()>(&full_key, value, ttl).await,
            None => conn.set::<_, _, ()>(&full_key, value).await,
        };

        result.map_err(|e| {
            warn!("Redis SET error for {}: {}", full_key, e);
            StoreError::OperationError(e.to_string())
        })?;

        debug!("Store SET: {} (TTL: {:?}s)", full_key, ttl_seconds);
        Ok(())
    }

    async fn delete(&self, key: &str) -> StoreResult<()> {
        let full_key = self.build_key(key);
        let mut conn = self.client.clone();

        let deleted = conn.del::<_, i32>(&full_key).await.map_err(|e| {
            warn!("Redis DEL error for {}: {}", full_key, e);
            StoreError::OperationError(e.to_string())
        })?;

        if deleted > 0 {
            debug!("Store DEL: {}", full_key);
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
