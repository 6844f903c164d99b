//! Watch command - follows the liveness probe and prints connectivity changes.

use std::time::Duration;

use anyhow::Result;
use clap::Args;
use kvsession_store::{ConnectivityStatus, KvBackend, SessionStore};
use serde::Serialize;
use tracing::info;

use super::Context;

/// How often the watcher samples the connectivity flag.
const SAMPLE_INTERVAL: Duration = Duration::from_millis(250);

/// Arguments for the watch command.
#[derive(Args, Debug)]
pub struct WatchArgs {
    /// Stop after this many seconds instead of waiting for Ctrl-C
    #[arg(long)]
    pub for_secs: Option<u64>,
}

#[derive(Debug, Serialize)]
struct TransitionOutput {
    connected: bool,
    consecutive_failures: u32,
    last_probe: Option<String>,
}

impl From<ConnectivityStatus> for TransitionOutput {
    fn from(status: ConnectivityStatus) -> Self {
        Self {
            connected: status.connected,
            consecutive_failures: status.consecutive_failures,
            last_probe: status.last_probe.map(|ts| ts.to_rfc3339()),
        }
    }
}

/// Run the watch command.
pub async fn run<B: KvBackend>(
    args: WatchArgs,
    store: &SessionStore<B>,
    ctx: &Context,
) -> Result<()> {
    let deadline = async {
        match args.for_secs {
            Some(secs) => tokio::time::sleep(Duration::from_secs(secs)).await,
            None => std::future::pending::<()>().await,
        }
    };
    tokio::pin!(deadline);

    let mut ticker = tokio::time::interval(SAMPLE_INTERVAL);
    let mut last: Option<bool> = None;

    info!(address = %ctx.address, "Watching session cache connectivity");

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = &mut deadline => break,
            _ = ticker.tick() => {
                let status = store.status();
                if last != Some(status.connected) {
                    last = Some(status.connected);
                    print_transition(status, ctx)?;
                }
            }
        }
    }

    Ok(())
}

fn print_transition(status: ConnectivityStatus, ctx: &Context) -> Result<()> {
    if ctx.json_output {
        let output = TransitionOutput::from(status);
        println!("{}", serde_json::to_string(&output)?);
    } else {
        let now = chrono::Utc::now().format("%H:%M:%S");
        let state = if status.connected {
            "connected"
        } else {
            "unreachable"
        };
        println!("{} {} {}", now, ctx.address, state);
    }
    Ok(())
}
