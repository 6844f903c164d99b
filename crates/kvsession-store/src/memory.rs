//! In-process implementation of [`KvBackend`].
//!
//! Keeps entries in a `HashMap` with per-key expiry. Expired entries are
//! dropped when their key is read or deleted, and swept on every write.
//!
//! Three switches simulate the failure modes of a remote cache:
//! - `set_unreachable(true)`: every call, including `ping`, fails
//! - `set_failing(true)`: `ping` succeeds but commands fail
//! - `set_failing_reads(true)`: writes and deletes succeed but `get` fails
//!
//! Call counters let tests assert which operations actually reached the cache.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::backend::KvBackend;
use crate::error::{Error, Result};

#[derive(Debug)]
struct Entry {
    value: String,
    expires_at: Instant,
}

impl Entry {
    fn is_expired(&self) -> bool {
        Instant::now() >= self.expires_at
    }
}

/// In-memory cache backend.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    entries: Mutex<HashMap<String, Entry>>,
    unreachable: AtomicBool,
    failing: AtomicBool,
    failing_reads: AtomicBool,
    pings: AtomicUsize,
    commands: AtomicUsize,
}

impl MemoryBackend {
    /// Create an empty, reachable backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the backend unreachable (or reachable again).
    pub fn set_unreachable(&self, unreachable: bool) {
        self.unreachable.store(unreachable, Ordering::SeqCst);
    }

    /// Make commands fail while `ping` keeps succeeding.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Make `get` fail while writes and deletes keep succeeding.
    pub fn set_failing_reads(&self, failing: bool) {
        self.failing_reads.store(failing, Ordering::SeqCst);
    }

    /// Number of `ping` calls received.
    pub fn ping_count(&self) -> usize {
        self.pings.load(Ordering::SeqCst)
    }

    /// Number of `set_ex`/`get`/`del` calls received.
    pub fn command_count(&self) -> usize {
        self.commands.load(Ordering::SeqCst)
    }

    /// Number of live (unexpired) entries.
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .values()
            .filter(|entry| !entry.is_expired())
            .count()
    }

    /// Check if there are no live entries.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Remaining lifetime of `key`, if present and unexpired.
    pub fn ttl_of(&self, key: &str) -> Option<Duration> {
        let entries = self.entries.lock();
        entries
            .get(key)
            .filter(|entry| !entry.is_expired())
            .map(|entry| entry.expires_at.saturating_duration_since(Instant::now()))
    }

    fn check_reachable(&self) -> Result<()> {
        if self.unreachable.load(Ordering::SeqCst) {
            return Err(Error::Backend("connection refused".to_string()));
        }
        Ok(())
    }

    fn begin_command(&self) -> Result<()> {
        self.commands.fetch_add(1, Ordering::SeqCst);
        self.check_reachable()?;
        if self.failing.load(Ordering::SeqCst) {
            return Err(Error::Backend("command failed".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl KvBackend for MemoryBackend {
    async fn ping(&self) -> Result<()> {
        self.pings.fetch_add(1, Ordering::SeqCst);
        self.check_reachable()
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> Result<()> {
        self.begin_command()?;
        let now = Instant::now();
        let expires_at = now
            .checked_add(ttl)
            .ok_or_else(|| Error::Backend(format!("invalid expire time: {}s", ttl.as_secs())))?;

        let mut entries = self.entries.lock();
        entries.retain(|_, entry| entry.expires_at > now);
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at,
            },
        );
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.begin_command()?;
        if self.failing_reads.load(Ordering::SeqCst) {
            return Err(Error::Backend("read failed".to_string()));
        }
        let mut entries = self.entries.lock();
        if entries.get(key).is_some_and(Entry::is_expired) {
            entries.remove(key);
        }
        Ok(entries.get(key).map(|entry| entry.value.clone()))
    }

    async fn del(&self, key: &str) -> Result<u64> {
        self.begin_command()?;
        let removed = self.entries.lock().remove(key);
        Ok(match removed {
            Some(entry) if !entry.is_expired() => 1,
            _ => 0,
        })
    }
}
