//! Status command - probes the cache and reports connectivity.

use anyhow::Result;
use clap::Args;
use console::{Style, style};
use kvsession_store::{KvBackend, SessionStore};
use serde::Serialize;

use super::Context;

/// Arguments for the status command.
#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Show store configuration as well
    #[arg(short, long)]
    pub detailed: bool,
}

/// Status response for JSON output.
#[derive(Debug, Serialize)]
struct StatusOutput {
    connected: bool,
    address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    session_ttl_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    probe_interval_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// Run the status command.
///
/// A store that failed to connect is reported, not treated as an error.
pub async fn run<B: KvBackend>(
    args: StatusArgs,
    store: kvsession_store::Result<SessionStore<B>>,
    ctx: &Context,
) -> Result<()> {
    let output = match &store {
        Ok(store) => StatusOutput {
            connected: store.is_connected(),
            address: ctx.address.clone(),
            session_ttl_secs: Some(store.config().session_ttl.as_secs()),
            probe_interval_secs: Some(store.config().probe_interval.as_secs()),
            error: None,
        },
        Err(e) => StatusOutput {
            connected: false,
            address: ctx.address.clone(),
            session_ttl_secs: None,
            probe_interval_secs: None,
            error: Some(e.to_string()),
        },
    };

    if ctx.json_output {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print_human(&args, &output, ctx);
    }

    if let Ok(store) = store {
        store.shutdown().await;
    }

    Ok(())
}

fn print_human(args: &StatusArgs, output: &StatusOutput, ctx: &Context) {
    let dim = Style::new().dim();

    println!();
    println!("{}", style("Session Cache Status").bold());
    println!("{}", dim.apply_to("─".repeat(40)));
    println!();

    if output.connected {
        println!(
            "  {} {}",
            dim.apply_to("Status:"),
            Style::new().green().apply_to("● connected")
        );
    } else {
        println!(
            "  {} {}",
            dim.apply_to("Status:"),
            Style::new().red().apply_to("● unreachable")
        );
    }
    println!("  {} {}", dim.apply_to("Address:"), output.address);

    if args.detailed
        && let (Some(ttl), Some(interval)) = (output.session_ttl_secs, output.probe_interval_secs)
    {
        println!("  {} {}s", dim.apply_to("Session TTL:"), ttl);
        println!("  {} {}s", dim.apply_to("Probe interval:"), interval);
    }

    if ctx.verbose
        && let Some(error) = &output.error
    {
        println!();
        println!("  {} {}", dim.apply_to("Error:"), error);
    }

    println!();
}
