//! Configuration for the session store.

use std::fmt;
use std::time::Duration;

use crate::error::{Error, Result};

/// Default session lifetime: 24 hours from creation.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Longest session lifetime accepted (`i32::MAX` seconds, about 68 years).
pub const MAX_SESSION_TTL: Duration = Duration::from_secs(i32::MAX as u64);

/// Default interval between liveness probes.
pub const DEFAULT_PROBE_INTERVAL: Duration = Duration::from_secs(5);

/// Behavioral configuration for the session store.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Expiration applied to every session at creation. Never refreshed on read.
    pub session_ttl: Duration,

    /// Sleep between two liveness probes.
    pub probe_interval: Duration,

    /// Namespace prepended to every session id before it reaches the cache.
    /// Empty by default, so keys are the bare session id.
    pub key_prefix: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            session_ttl: DEFAULT_SESSION_TTL,
            probe_interval: DEFAULT_PROBE_INTERVAL,
            key_prefix: String::new(),
        }
    }
}

impl StoreConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the session TTL.
    pub fn with_session_ttl(mut self, ttl: Duration) -> Self {
        self.session_ttl = ttl;
        self
    }

    /// Set the liveness probe interval.
    pub fn with_probe_interval(mut self, interval: Duration) -> Self {
        self.probe_interval = interval;
        self
    }

    /// Set the key prefix.
    pub fn with_key_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.key_prefix = prefix.into();
        self
    }

    /// Reject values the cache cannot honor.
    ///
    /// Redis expirations have whole-second granularity, so the TTL must be at
    /// least one second. It may not exceed [`MAX_SESSION_TTL`].
    pub fn validate(&self) -> Result<()> {
        if self.session_ttl.as_secs() == 0 {
            return Err(Error::InvalidConfig(
                "session TTL must be at least one second".to_string(),
            ));
        }
        if self.session_ttl > MAX_SESSION_TTL {
            return Err(Error::InvalidConfig(format!(
                "session TTL must not exceed {} seconds",
                MAX_SESSION_TTL.as_secs()
            )));
        }
        if self.probe_interval.is_zero() {
            return Err(Error::InvalidConfig(
                "probe interval must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Cache key for a session id.
    pub(crate) fn key_for(&self, sid: &str) -> String {
        format!("{}{}", self.key_prefix, sid)
    }
}

/// Parameters for reaching the cache service.
#[derive(Clone)]
pub struct ConnectionParams {
    /// `host:port`, or a full `redis://` / `rediss://` URL.
    pub address: String,

    /// Access credential. `None` connects without AUTH.
    pub password: Option<String>,

    /// Logical database index.
    pub db: i64,
}

impl ConnectionParams {
    /// Parameters for `address` with no credential and database 0.
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            password: None,
            db: 0,
        }
    }

    /// Set the access credential.
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set the logical database index.
    pub fn with_db(mut self, db: i64) -> Self {
        self.db = db;
        self
    }

    /// Address normalized to a URL the Redis client accepts.
    pub(crate) fn url(&self) -> String {
        if self.address.contains("://") {
            self.address.clone()
        } else {
            format!("redis://{}", self.address)
        }
    }
}

impl fmt::Debug for ConnectionParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConnectionParams")
            .field("address", &self.address)
            .field("password", &self.password.as_ref().map(|_| "<redacted>"))
            .field("db", &self.db)
            .finish()
    }
}
