//! # Book Cache Library
//!
//! Record cache over a Redis hash: one field per record ID, JSON values, no
//! expiry.
//!
//! ```text
//!        caller
//!          │  get / set / delete  →  bool
//!          ▼
//! ┌────────────────────────┐
//! │      RecordCache       │  fetch / put / evict  →  Result
//! └────────────────────────┘
//!          │  HGET / HSET / HDEL
//!          ▼
//! ┌────────────────────────┐
//! │  HashStore (trait)     │  RedisHashStore | InMemoryHashStore
//! └────────────────────────┘
//! ```
//!
//! ## Features
//!
//! - `redis`: Enable the Redis-backed store (default)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use book_cache::{BookCache, CacheConfig};
//! use book_domain::Book;
//!
//! // Connects on the first command
//! let cache: BookCache<_> = BookCache::open(&CacheConfig::default())?;
//!
//! cache.set(42, &Book::new(42, "Go")).await;
//!
//! let mut book = Book::default();
//! if !cache.get(42, &mut book).await {
//!     // not cached: read from the database
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod accessor;
pub mod error;
pub mod store;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use accessor::{BOOKS_HASH_KEY, BookCache, RecordCache};
pub use error::{CacheError, Result};
pub use store::{HashStore, InMemoryHashStore};
#[cfg(feature = "redis")]
pub use store::{CacheConfig, RedisHashStore};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
