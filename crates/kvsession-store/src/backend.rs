//! Cache backend trait.
//!
//! The session store is written against [`KvBackend`] rather than a concrete
//! client, so the Redis implementation and the in-memory implementation share
//! the same store logic, liveness loop and error handling.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

/// Minimal key-value cache surface the session store needs.
///
/// Implementations must be `Send + Sync` so one backend can be shared between
/// the caller-facing operations and the background liveness task.
#[async_trait]
pub trait KvBackend: Send + Sync + 'static {
    /// Lightweight reachability probe. Used only to drive the connectivity flag.
    async fn ping(&self) -> Result<()>;

    /// Store `value` under `key`, expiring after `ttl`.
    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<()>;

    /// Fetch the value for `key`.
    ///
    /// Returns `Ok(None)` when the key is absent; absence is not an error at
    /// this layer.
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Remove `key`, returning how many keys were removed.
    ///
    /// Removing an absent key succeeds with `0`.
    async fn del(&self, key: &str) -> Result<u64>;
}
