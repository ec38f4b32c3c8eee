//! Cache error types.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Backing store unavailable")]
    Unavailable,

    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),
}

pub type CacheResult<T> = Result<T, CacheError>;
