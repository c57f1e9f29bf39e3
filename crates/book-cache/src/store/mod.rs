//! # Store Module
//!
//! The hash-command seam between the record cache and its backing store.
//!
//! - `RedisHashStore` - Redis via a reconnecting connection manager
//! - `InMemoryHashStore` - process-local maps, for tests and local runs

pub mod memory;
#[cfg(feature = "redis")]
pub mod redis_store;

use async_trait::async_trait;

use crate::error::Result;

pub use memory::InMemoryHashStore;
#[cfg(feature = "redis")]
pub use redis_store::{CacheConfig, RedisHashStore};

/// A store holding nested `key -> field -> value` maps
#[async_trait]
pub trait HashStore: Send + Sync {
    /// Read one field; `None` when the field (or the key) is absent
    async fn hget(&self, key: &str, field: &str) -> Result<Option<Vec<u8>>>;

    /// Write one field, replacing any previous value
    async fn hset(&self, key: &str, field: &str, value: Vec<u8>) -> Result<()>;

    /// Remove one field; `true` when something was removed
    async fn hdel(&self, key: &str, field: &str) -> Result<bool>;
}
