//! Cache layer error types

use thiserror::Error;

/// Cache layer errors
///
/// A miss is not an error: reads report absence as `Ok(None)`.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Store error: {0}")]
    Store(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl CacheError {
    /// Short label used as the `kind` field in log events
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Store(_) => "store",
            Self::Serialization(_) => "serialization",
            Self::Deserialization(_) => "deserialization",
        }
    }
}

#[cfg(feature = "redis")]
impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        Self::Store(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, CacheError>;
