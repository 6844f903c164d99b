//! Redis implementation of [`KvBackend`].

use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, IntoConnectionInfo};
use tracing::{debug, trace};

use crate::backend::KvBackend;
use crate::config::ConnectionParams;
use crate::error::Result;

/// Redis backend over a multiplexed, auto-reconnecting connection.
///
/// The underlying [`ConnectionManager`] is cheap to clone; each command works
/// on its own clone so concurrent callers never serialize on a lock here.
#[derive(Clone)]
pub struct RedisBackend {
    manager: ConnectionManager,
}

impl RedisBackend {
    /// Open a connection to the cache described by `params`.
    ///
    /// This only establishes the connection; it does not probe liveness.
    pub async fn connect(params: &ConnectionParams) -> Result<Self> {
        let mut info = params.url().as_str().into_connection_info()?;
        info.redis.db = params.db;
        if let Some(password) = &params.password {
            info.redis.password = Some(password.clone());
        }

        debug!(address = %params.address, db = params.db, "Connecting to Redis");

        let client = redis::Client::open(info)?;
        let manager = ConnectionManager::new(client).await?;
        Ok(Self { manager })
    }
}

#[async_trait]
impl KvBackend for RedisBackend {
    async fn ping(&self) -> Result<()> {
        let mut conn = self.manager.clone();
        let reply: String = redis::cmd("PING").query_async(&mut conn).await?;
        trace!(reply = %reply, "Redis ping");
        Ok(())
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        let mut conn = self.manager.clone();
        let _: () = conn.set_ex(key, value, ttl.as_secs()).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        let mut conn = self.manager.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn del(&self, key: &str) -> Result<u64> {
        let mut conn = self.manager.clone();
        let removed: u64 = conn.del(key).await?;
        Ok(removed)
    }
}
