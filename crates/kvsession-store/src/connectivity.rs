//! Connectivity state shared between the liveness task and store operations.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

/// Snapshot of the tracked cache connectivity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectivityStatus {
    /// Whether the most recent liveness probe succeeded.
    pub connected: bool,

    /// When the most recent probe completed. `None` until the loop's first
    /// probe; the construction probe is not recorded here.
    pub last_probe: Option<DateTime<Utc>>,

    /// Probes failed in a row since the last success.
    pub consecutive_failures: u32,
}

/// Connectivity flag guarded by a reader-writer lock.
///
/// Only the liveness task writes it; every store operation takes a read lock
/// once at entry.
#[derive(Debug)]
pub struct Connectivity {
    state: RwLock<ConnectivityStatus>,
}

impl Connectivity {
    /// State after a successful construction probe.
    pub(crate) fn connected() -> Self {
        Self {
            state: RwLock::new(ConnectivityStatus {
                connected: true,
                last_probe: None,
                consecutive_failures: 0,
            }),
        }
    }

    /// Whether the cache is currently considered reachable.
    pub fn is_connected(&self) -> bool {
        self.state.read().connected
    }

    /// Current snapshot.
    pub fn status(&self) -> ConnectivityStatus {
        *self.state.read()
    }

    /// Record a probe outcome. Returns the previous `connected` value.
    pub(crate) fn record_probe(&self, ok: bool) -> bool {
        let mut state = self.state.write();
        let was_connected = state.connected;
        state.connected = ok;
        state.last_probe = Some(Utc::now());
        state.consecutive_failures = if ok {
            0
        } else {
            state.consecutive_failures.saturating_add(1)
        };
        was_connected
    }
}
