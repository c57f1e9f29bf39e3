//! # CLI Configuration
//!
//! Environment-based configuration for the `book-cache` binary.

use std::env;

use book_cache::{BOOKS_HASH_KEY, CacheConfig};

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Pretty,
    Json,
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Redis connection URL
    pub redis_url: String,

    /// Hash key holding the cached books
    pub hash_key: String,

    /// Logging level / filter directive
    pub log_level: String,

    pub log_format: LogFormat,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build configuration from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            redis_url: lookup("REDIS_URL")
                .unwrap_or_else(|| "redis://127.0.0.1:6379".to_string()),

            hash_key: lookup("BOOK_CACHE_KEY").unwrap_or_else(|| BOOKS_HASH_KEY.to_string()),

            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),

            log_format: match lookup("LOG_FORMAT").as_deref() {
                Some("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
        }
    }

    pub fn cache_config(&self) -> CacheConfig {
        CacheConfig {
            url: self.redis_url.clone(),
            hash_key: self.hash_key.clone(),
            ..CacheConfig::default()
        }
    }
}
