//! # Record Cache Accessor
//!
//! Get / set / delete of JSON-encoded records stored as fields of a single
//! hash, one field per record ID.
//!
//! Two layers:
//!
//! - `fetch` / `put` / `evict` return `Result` with the typed error
//! - `get` / `set` / `delete` collapse that result to a `bool`, logging every
//!   failure except a miss exactly once
//!
//! Callers on the boolean layer should treat `false` from `get` as "not
//! cached" and read from the source of truth, and `false` from `set` or
//! `delete` as "cache possibly stale".

use std::fmt::Display;
use std::future::Future;
use std::marker::PhantomData;

use serde::{de::DeserializeOwned, Serialize};

use book_domain::Book;

use crate::error::{CacheError, Result};
use crate::store::HashStore;
#[cfg(feature = "redis")]
use crate::store::{CacheConfig, RedisHashStore};

/// Hash key holding cached books
pub const BOOKS_HASH_KEY: &str = "slim:books";

/// Record cache over one hash key of a `HashStore`
pub struct RecordCache<S, T> {
    store: S,
    hash_key: String,
    _record: PhantomData<fn() -> T>,
}

impl<S: Clone, T> Clone for RecordCache<S, T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            hash_key: self.hash_key.clone(),
            _record: PhantomData,
        }
    }
}

/// Cache of `Book` records
pub type BookCache<S> = RecordCache<S, Book>;

#[cfg(feature = "redis")]
impl<T> RecordCache<RedisHashStore, T>
where
    T: Serialize + DeserializeOwned,
{
    /// Redis-backed cache on `config.hash_key`; connects on first use
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Store` if `config.url` is invalid.
    pub fn open(config: &CacheConfig) -> Result<Self> {
        let store = RedisHashStore::open(config)?;
        Ok(Self::new(store, config.hash_key.as_str()))
    }
}

impl<S: HashStore> RecordCache<S, Book> {
    /// Book cache on the `slim:books` hash
    pub fn books(store: S) -> Self {
        Self::new(store, BOOKS_HASH_KEY)
    }
}

impl<S, T> RecordCache<S, T>
where
    S: HashStore,
    T: Serialize + DeserializeOwned,
{
    /// Cache over `store` using `hash_key` for every entry
    pub fn new(store: S, hash_key: impl Into<String>) -> Self {
        Self {
            store,
            hash_key: hash_key.into(),
            _record: PhantomData,
        }
    }

    /// Hash key the entries live under
    pub fn hash_key(&self) -> &str {
        &self.hash_key
    }

    // =========================================================================
    // TYPED OPERATIONS
    // =========================================================================

    /// Read a record; `Ok(None)` on a miss
    ///
    /// # Errors
    ///
    /// `CacheError::Store` if the command fails, `CacheError::Deserialization`
    /// if the stored bytes do not decode into `T`.
    pub async fn fetch(&self, id: impl Display) -> Result<Option<T>> {
        self.fetch_field(&id.to_string()).await
    }

    /// Write a record, replacing any previous value for `id`
    ///
    /// # Errors
    ///
    /// `CacheError::Serialization` if `data` cannot be encoded,
    /// `CacheError::Store` if the command fails.
    pub async fn put(&self, id: impl Display, data: &T) -> Result<()> {
        self.put_field(&id.to_string(), data).await
    }

    /// Remove a record; `Ok(true)` if one was present
    ///
    /// # Errors
    ///
    /// `CacheError::Store` if the command fails.
    pub async fn evict(&self, id: impl Display) -> Result<bool> {
        self.store.hdel(&self.hash_key, &id.to_string()).await
    }

    // =========================================================================
    // BOOLEAN OPERATIONS
    // =========================================================================

    /// Read a record into `out`
    ///
    /// `out` is only written when this returns `true`. A miss returns `false`
    /// without logging.
    pub async fn get(&self, id: impl Display, out: &mut T) -> bool {
        let field = id.to_string();
        match self.fetch_field(&field).await {
            Ok(Some(record)) => {
                *out = record;
                true
            }
            Ok(None) => false,
            Err(e) => {
                self.log_failure("get", &field, &e);
                false
            }
        }
    }

    /// Write a record; no expiry is set
    pub async fn set(&self, id: impl Display, data: &T) -> bool {
        let field = id.to_string();
        match self.put_field(&field, data).await {
            Ok(()) => true,
            Err(e) => {
                self.log_failure("set", &field, &e);
                false
            }
        }
    }

    /// Remove a record; `true` whether or not it existed
    pub async fn delete(&self, id: impl Display) -> bool {
        let field = id.to_string();
        match self.store.hdel(&self.hash_key, &field).await {
            Ok(_) => true,
            Err(e) => {
                self.log_failure("delete", &field, &e);
                false
            }
        }
    }

    // =========================================================================
    // CACHE-ASIDE
    // =========================================================================

    /// Serve from cache, falling back to `load` on a miss or a cache failure
    ///
    /// A record produced by `load` is written back with `set`. Cache failures
    /// are logged and never returned.
    ///
    /// # Errors
    ///
    /// Returns the loader's error unchanged.
    pub async fn get_or_load<F, Fut, E>(
        &self,
        id: impl Display,
        load: F,
    ) -> std::result::Result<Option<T>, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = std::result::Result<Option<T>, E>>,
    {
        let field = id.to_string();

        match self.fetch_field(&field).await {
            Ok(Some(record)) => {
                tracing::debug!(hash = %self.hash_key, field = %field, "Cache hit");
                return Ok(Some(record));
            }
            Ok(None) => {
                tracing::debug!(hash = %self.hash_key, field = %field, "Cache miss, loading");
            }
            Err(e) => self.log_failure("get", &field, &e),
        }

        let loaded = load().await?;

        if let Some(record) = &loaded {
            if let Err(e) = self.put_field(&field, record).await {
                self.log_failure("set", &field, &e);
            }
        }

        Ok(loaded)
    }

    // =========================================================================
    // INTERNALS
    // =========================================================================

    async fn fetch_field(&self, field: &str) -> Result<Option<T>> {
        let Some(bytes) = self.store.hget(&self.hash_key, field).await? else {
            return Ok(None);
        };

        serde_json::from_slice(&bytes)
            .map(Some)
            .map_err(|e| CacheError::Deserialization(e.to_string()))
    }

    async fn put_field(&self, field: &str, data: &T) -> Result<()> {
        let bytes =
            serde_json::to_vec(data).map_err(|e| CacheError::Serialization(e.to_string()))?;
        self.store.hset(&self.hash_key, field, bytes).await
    }

    fn log_failure(&self, op: &'static str, field: &str, err: &CacheError) {
        tracing::error!(
            hash = %self.hash_key,
            field = %field,
            op,
            kind = err.kind(),
            error = %err,
            "Record cache operation failed"
        );
    }
}
