//! Session store over a [`KvBackend`].

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, trace};

use crate::backend::KvBackend;
use crate::config::{ConnectionParams, StoreConfig};
use crate::connectivity::{Connectivity, ConnectivityStatus};
use crate::error::{Error, Result};
use crate::liveness::spawn_probe_task;
use crate::redis_backend::RedisBackend;
use crate::session::Session;

/// State shared by all handles of one store.
struct StoreInner<B: KvBackend> {
    backend: Arc<B>,
    connectivity: Arc<Connectivity>,
    config: StoreConfig,
    cancel: CancellationToken,
    probe: Mutex<Option<JoinHandle<()>>>,
}

impl<B: KvBackend> Drop for StoreInner<B> {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// Session store with cache liveness tracking.
///
/// Handles are cheap to clone and share one backend, one connectivity flag
/// and one liveness task. The task stops on [`SessionStore::shutdown`] or
/// when the last handle is dropped.
///
/// While the flag is down, `create_session`, `login_for` and
/// `session_exists` return a negative result without contacting the cache.
/// `delete_session` is always attempted.
pub struct SessionStore<B: KvBackend = RedisBackend> {
    inner: Arc<StoreInner<B>>,
}

impl SessionStore<RedisBackend> {
    /// Connect to Redis and start tracking its liveness.
    ///
    /// Fails with [`Error::Connect`] if the connection cannot be opened or the
    /// first probe fails.
    pub async fn connect(params: &ConnectionParams, config: StoreConfig) -> Result<Self> {
        let backend = RedisBackend::connect(params).await.map_err(|e| {
            error!(address = %params.address, error = %e, "Failed to open session cache connection");
            Error::Connect(e.to_string())
        })?;
        Self::with_backend(backend, config).await
    }
}

impl<B: KvBackend> SessionStore<B> {
    /// Build a store over an existing backend.
    ///
    /// Probes the backend once; on success the connectivity flag starts up
    /// and the liveness task is spawned on the current tokio runtime.
    pub async fn with_backend(backend: B, config: StoreConfig) -> Result<Self> {
        config.validate()?;

        if let Err(e) = backend.ping().await {
            error!(error = %e, "Session cache liveness probe failed");
            return Err(Error::Connect(e.to_string()));
        }

        let backend = Arc::new(backend);
        let connectivity = Arc::new(Connectivity::connected());
        let cancel = CancellationToken::new();
        let probe = spawn_probe_task(
            Arc::clone(&backend),
            Arc::clone(&connectivity),
            config.probe_interval,
            cancel.clone(),
        );

        debug!(
            probe_interval_ms = config.probe_interval.as_millis() as u64,
            session_ttl_secs = config.session_ttl.as_secs(),
            "Session store ready"
        );

        Ok(Self {
            inner: Arc::new(StoreInner {
                backend,
                connectivity,
                config,
                cancel,
                probe: Mutex::new(Some(probe)),
            }),
        })
    }

    /// Get the store configuration.
    pub fn config(&self) -> &StoreConfig {
        &self.inner.config
    }

    /// Get the underlying backend.
    pub fn backend(&self) -> &B {
        &self.inner.backend
    }

    /// Whether the last liveness probe succeeded.
    pub fn is_connected(&self) -> bool {
        self.inner.connectivity.is_connected()
    }

    /// Current connectivity snapshot.
    pub fn status(&self) -> ConnectivityStatus {
        self.inner.connectivity.status()
    }

    /// Store a session with the configured TTL, then confirm it is readable.
    ///
    /// Returns `Ok(false)` without contacting the cache while it is
    /// unreachable. A failed write is returned as an error; after a
    /// successful write the result is whatever [`Self::session_exists`]
    /// reports.
    pub async fn create_session(&self, session: &Session) -> Result<bool> {
        if !self.cache_available("create_session") {
            return Ok(false);
        }

        let key = self.inner.config.key_for(&session.sid);
        if let Err(e) = self
            .inner
            .backend
            .set_ex(&key, &session.login, self.inner.config.session_ttl)
            .await
        {
            error!(sid = %session.sid, error = %e, "Set request could not be completed");
            return Err(e);
        }

        trace!(sid = %session.sid, "Session written, verifying");
        self.session_exists(&session.sid).await
    }

    /// Look up the login that owns `sid`.
    ///
    /// Returns `Ok(None)` without contacting the cache while it is
    /// unreachable, and [`Error::NotFound`] when the session is absent.
    pub async fn login_for(&self, sid: &str) -> Result<Option<String>> {
        if !self.cache_available("login_for") {
            return Ok(None);
        }

        let key = self.inner.config.key_for(sid);
        match self.inner.backend.get(&key).await {
            Ok(Some(login)) => Ok(Some(login)),
            Ok(None) => {
                error!(sid = %sid, "Cannot find session");
                Err(Error::NotFound(sid.to_string()))
            }
            Err(e) => {
                error!(sid = %sid, error = %e, "Get request could not be completed");
                Err(e)
            }
        }
    }

    /// Check whether `sid` is present in the cache.
    ///
    /// Absence is a normal `Ok(false)`. Returns `Ok(false)` without
    /// contacting the cache while it is unreachable.
    pub async fn session_exists(&self, sid: &str) -> Result<bool> {
        if !self.cache_available("session_exists") {
            return Ok(false);
        }

        let key = self.inner.config.key_for(sid);
        match self.inner.backend.get(&key).await {
            Ok(Some(_)) => Ok(true),
            Ok(None) => {
                error!(sid = %sid, "Session key not found");
                Ok(false)
            }
            Err(e) => {
                error!(sid = %sid, error = %e, "Get request could not be completed");
                Err(e)
            }
        }
    }

    /// Remove `sid` from the cache.
    ///
    /// Attempted regardless of tracked connectivity. Removing an absent
    /// session succeeds.
    pub async fn delete_session(&self, sid: &str) -> Result<bool> {
        let key = self.inner.config.key_for(sid);
        match self.inner.backend.del(&key).await {
            Ok(removed) => {
                debug!(sid = %sid, removed, "Session deleted");
                Ok(true)
            }
            Err(e) => {
                error!(sid = %sid, error = %e, "Delete request could not be completed");
                Err(e)
            }
        }
    }

    /// Stop the liveness task and wait for it to exit.
    ///
    /// The connectivity flag keeps its last value afterwards. Calling this
    /// more than once is harmless.
    pub async fn shutdown(&self) {
        self.inner.cancel.cancel();
        let probe = self.inner.probe.lock().take();
        if let Some(handle) = probe
            && let Err(e) = handle.await
        {
            error!(error = %e, "Liveness probe task failed");
        }
    }

    fn cache_available(&self, operation: &'static str) -> bool {
        let connected = self.inner.connectivity.is_connected();
        if !connected {
            error!(operation, "Session cache connection lost");
        }
        connected
    }
}

impl<B: KvBackend> Clone for SessionStore<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}
