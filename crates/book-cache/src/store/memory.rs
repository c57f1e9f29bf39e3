//! In-process `HashStore`.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::HashStore;
use crate::error::{CacheError, Result};

type Hashes = HashMap<String, HashMap<String, Vec<u8>>>;

/// Hash store backed by nested maps
///
/// Clones share the same data. `set_available(false)` makes every command
/// fail with `CacheError::Store`, standing in for an unreachable server.
#[derive(Debug, Clone)]
pub struct InMemoryHashStore {
    hashes: Arc<RwLock<Hashes>>,
    available: Arc<AtomicBool>,
}

impl Default for InMemoryHashStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryHashStore {
    pub fn new() -> Self {
        Self {
            hashes: Arc::new(RwLock::new(HashMap::new())),
            available: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Toggle simulated reachability
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    /// Write bytes directly, bypassing availability
    pub async fn insert_raw(&self, key: &str, field: &str, value: impl Into<Vec<u8>>) {
        self.hashes
            .write()
            .await
            .entry(key.to_string())
            .or_default()
            .insert(field.to_string(), value.into());
    }

    /// Number of fields stored under `key`
    pub async fn field_count(&self, key: &str) -> usize {
        self.hashes.read().await.get(key).map_or(0, HashMap::len)
    }

    fn ensure_available(&self) -> Result<()> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(CacheError::Store("in-memory store unavailable".to_string()))
        }
    }
}

#[async_trait]
impl HashStore for InMemoryHashStore {
    async fn hget(&self, key: &str, field: &str) -> Result<Option<Vec<u8>>> {
        self.ensure_available()?;
        let hashes = self.hashes.read().await;
        Ok(hashes.get(key).and_then(|fields| fields.get(field)).cloned())
    }

    async fn hset(&self, key: &str, field: &str, value: Vec<u8>) -> Result<()> {
        self.ensure_available()?;
        self.hashes
            .write()
            .await
            .entry(key.to_string())
            .or_default()
            .insert(field.to_string(), value);
        Ok(())
    }

    async fn hdel(&self, key: &str, field: &str) -> Result<bool> {
        self.ensure_available()?;
        let mut hashes = self.hashes.write().await;

        let Some(fields) = hashes.get_mut(key) else {
            return Ok(false);
        };
        let removed = fields.remove(field).is_some();
        // Redis drops a hash once its last field is gone
        if fields.is_empty() {
            hashes.remove(key);
        }
        Ok(removed)
    }
}
