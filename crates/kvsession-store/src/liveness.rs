//! Background liveness probe.
//!
//! Pings the cache, records the outcome in the shared [`Connectivity`] and
//! sleeps for the configured interval, until cancelled.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::backend::KvBackend;
use crate::connectivity::Connectivity;

/// Spawn the probe loop.
///
/// Probe failures only update the flag; the loop itself never stops on error.
/// It exits when `cancel` fires, including while a ping is in flight.
pub(crate) fn spawn_probe_task<B: KvBackend>(
    backend: Arc<B>,
    connectivity: Arc<Connectivity>,
    interval: Duration,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let outcome = tokio::select! {
                _ = cancel.cancelled() => break,
                outcome = backend.ping() => outcome,
            };

            let ok = outcome.is_ok();
            let was_connected = connectivity.record_probe(ok);

            match (was_connected, outcome) {
                (true, Err(e)) => warn!(error = %e, "Session cache became unreachable"),
                (false, Ok(())) => info!("Session cache reachable again"),
                (false, Err(e)) => debug!(error = %e, "Session cache still unreachable"),
                (true, Ok(())) => {}
            }

            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = tokio::time::sleep(interval) => {}
            }
        }

        debug!("Liveness probe stopped");
    })
}
