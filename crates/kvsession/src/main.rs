//! kvsession - operator CLI for the session store
//!
//! Main entry point for the kvsession CLI.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};
use kvsession_store::{KvBackend, MemoryBackend, SessionStore};
use tracing::{debug, warn};

mod commands;
mod logging;

use commands::{Context, session, status, watch};

// ─────────────────────────────────────────────────────────────────────────────
// CLI Structure
// ─────────────────────────────────────────────────────────────────────────────

/// kvsession - session store over a remote key-value cache
#[derive(Parser)]
#[command(name = "kvsession")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output as JSON (for scripting)
    #[arg(long, global = true)]
    pub json: bool,

    /// Config file to use instead of discovery
    #[arg(long, global = true, env = "KVSESSION_CONFIG")]
    pub config: Option<PathBuf>,

    /// Use an in-process cache instead of Redis (state is lost on exit)
    #[arg(long, global = true)]
    pub memory: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Probe the cache and report connectivity
    Status(status::StatusArgs),

    /// Create a session
    Create(session::CreateArgs),

    /// Print the login that owns a session
    Login(session::SidArgs),

    /// Check whether a session exists
    Exists(session::SidArgs),

    /// Delete a session
    Delete(session::SidArgs),

    /// Run the liveness probe and report connectivity changes
    Watch(watch::WatchArgs),
}

// ─────────────────────────────────────────────────────────────────────────────
// Main
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let loaded = match &cli.config {
        Some(path) => kvsession_config::load_explicit(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => kvsession_config::load_config(None)?,
    };

    logging::init(&loaded.config.logging(), cli.verbose);

    for warning in &loaded.warnings {
        warn!("{}", warning);
    }
    for path in loaded.loaded_from() {
        debug!(path = %path.display(), "Loaded config");
    }

    let resolved = kvsession_config::resolve(&loaded.config)?;
    if let Some(source) = &resolved.password_source {
        debug!(source = %source, "Resolved cache password");
    }

    let ctx = Context {
        address: if cli.memory {
            "memory".to_string()
        } else {
            resolved.params.address.clone()
        },
        json_output: cli.json,
        verbose: cli.verbose,
    };

    if cli.memory {
        let store = SessionStore::with_backend(MemoryBackend::new(), resolved.store).await;
        dispatch(cli.command, store, &ctx).await
    } else {
        let store = SessionStore::connect(&resolved.params, resolved.store).await;
        dispatch(cli.command, store, &ctx).await
    }
}

/// Route a command to its handler.
///
/// `status` reports a failed connection itself; every other command needs a
/// working store.
async fn dispatch<B: KvBackend>(
    command: Commands,
    store: kvsession_store::Result<SessionStore<B>>,
    ctx: &Context,
) -> Result<()> {
    match command {
        Commands::Status(args) => status::run(args, store, ctx).await,
        Commands::Create(args) => {
            let store = store.context(CONNECT_CONTEXT)?;
            let result = session::create(args, &store, ctx).await;
            finish(store, result).await
        }
        Commands::Login(args) => {
            let store = store.context(CONNECT_CONTEXT)?;
            let result = session::login(args, &store, ctx).await;
            finish(store, result).await
        }
        Commands::Exists(args) => {
            let store = store.context(CONNECT_CONTEXT)?;
            let result = session::exists(args, &store, ctx).await;
            finish(store, result).await
        }
        Commands::Delete(args) => {
            let store = store.context(CONNECT_CONTEXT)?;
            let result = session::delete(args, &store, ctx).await;
            finish(store, result).await
        }
        Commands::Watch(args) => {
            let store = store.context(CONNECT_CONTEXT)?;
            let result = watch::run(args, &store, ctx).await;
            finish(store, result).await
        }
    }
}

const CONNECT_CONTEXT: &str = "connecting to session cache";

/// Stop the liveness task before handing back the command result.
async fn finish<B: KvBackend>(store: SessionStore<B>, result: Result<()>) -> Result<()> {
    store.shutdown().await;
    result
}
