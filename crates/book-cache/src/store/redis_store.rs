//! # Redis Hash Store
//!
//! `HashStore` over Redis HGET / HSET / HDEL.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::{ConnectionManager, ConnectionManagerConfig};
use redis::{AsyncCommands, Client};
use tokio::sync::OnceCell;

use super::HashStore;
use crate::accessor::BOOKS_HASH_KEY;
use crate::error::Result;

/// Redis cache configuration
#[derive(Debug, Clone)]
pub struct CacheConfig {
    pub url: String,
    /// Hash key holding one field per record
    pub hash_key: String,
    /// Per-attempt limit when establishing the connection
    pub connect_timeout: Duration,
    /// Reconnect attempts after the first one fails
    pub connect_retries: usize,
    /// Limit on a single command round trip
    pub response_timeout: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            url: "redis://127.0.0.1:6379".to_string(),
            hash_key: BOOKS_HASH_KEY.to_string(),
            connect_timeout: Duration::from_secs(2),
            connect_retries: 2,
            response_timeout: Duration::from_secs(2),
        }
    }
}

/// Redis-backed hash store
///
/// The connection is established by the first command, not by `open`, so an
/// unreachable server surfaces as a failed command. A failed attempt leaves
/// the store unconnected and the next command tries again. Every command
/// works on its own clone of the connection manager handle, dropped when the
/// command returns.
#[derive(Clone)]
pub struct RedisHashStore {
    client: Client,
    conn: Arc<OnceCell<ConnectionManager>>,
    connect_timeout: Duration,
    connect_retries: usize,
    response_timeout: Duration,
}

impl RedisHashStore {
    /// Create a store for `config.url` without connecting
    ///
    /// # Errors
    ///
    /// Returns `CacheError::Store` if the URL is invalid.
    pub fn open(config: &CacheConfig) -> Result<Self> {
        let client = Client::open(config.url.as_str())?;

        Ok(Self {
            client,
            conn: Arc::new(OnceCell::new()),
            connect_timeout: config.connect_timeout,
            connect_retries: config.connect_retries,
            response_timeout: config.response_timeout,
        })
    }

    async fn acquire(&self) -> Result<ConnectionManager> {
        let conn = self
            .conn
            .get_or_try_init(|| async {
                let manager_config = ConnectionManagerConfig::new()
                    .set_connection_timeout(self.connect_timeout)
                    .set_number_of_retries(self.connect_retries)
                    .set_response_timeout(self.response_timeout);

                let conn =
                    ConnectionManager::new_with_config(self.client.clone(), manager_config)
                        .await?;
                tracing::debug!("Redis hash store connected");
                Ok::<_, redis::RedisError>(conn)
            })
            .await?;

        Ok(conn.clone())
    }
}

#[async_trait]
impl HashStore for RedisHashStore {
    async fn hget(&self, key: &str, field: &str) -> Result<Option<Vec<u8>>> {
        let mut conn = self.acquire().await?;
        let value: Option<Vec<u8>> = conn.hget(key, field).await?;
        Ok(value)
    }

    async fn hset(&self, key: &str, field: &str, value: Vec<u8>) -> Result<()> {
        let mut conn = self.acquire().await?;
        conn.hset::<_, _, _, ()>(key, field, value).await?;
        Ok(())
    }

    async fn hdel(&self, key: &str, field: &str) -> Result<bool> {
        let mut conn = self.acquire().await?;
        let removed: i64 = conn.hdel(key, field).await?;
        Ok(removed > 0)
    }
}
