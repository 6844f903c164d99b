//! Error types for session store operations.

/// Error type for session store operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The initial connection or liveness probe failed.
    #[error("Cache connection failed: {0}")]
    Connect(String),

    /// Session key is not present in the cache.
    #[error("Session not found: {0}")]
    NotFound(String),

    /// Command failed against the Redis backend.
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// Command failed against a non-Redis backend.
    #[error("Backend error: {0}")]
    Backend(String),

    /// Store configuration is unusable.
    #[error("Invalid store configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for session store operations.
pub type Result<T> = std::result::Result<T, Error>;
