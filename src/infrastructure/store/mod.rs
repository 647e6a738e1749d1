//! Session storage layer.
//!
//! Provides a [`KeyValueStore`] trait with two implementations:
//! - [`RedisStore`] - Production Redis-backed store
//! - [`MemoryStore`] - In-process store used without Redis and in tests

mod memory_store;
mod redis_store;
mod service;

pub use memory_store::MemoryStore;
pub use redis_store::RedisStore;
pub use service::{KeyValueStore, StoreError, StoreResult};

#[cfg(test)]
pub use service::MockKeyValueStore;
