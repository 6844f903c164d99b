//! Tracing subscriber setup.

use kvsession_config::{LogFormat, LoggingConfig};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

/// Crates whose events the default filter shows at the configured level.
const CRATES: [&str; 3] = ["kvsession", "kvsession_config", "kvsession_store"];

/// Filter directive used when `RUST_LOG` is unset.
fn default_directive(level: &str) -> String {
    let mut directive = CRATES
        .iter()
        .map(|krate| format!("{}={}", krate, level))
        .collect::<Vec<_>>()
        .join(",");
    directive.push_str(",warn");
    directive
}

/// Install the global subscriber. Events go to stderr so command output on
/// stdout stays machine-readable.
pub fn init(config: &LoggingConfig, verbose: bool) {
    let level = if verbose { "debug" } else { config.level.as_str() };
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_directive(level)))
        .unwrap_or_else(|_| EnvFilter::new(default_directive("info")));

    let registry = tracing_subscriber::registry().with(filter);

    match config.format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Pretty => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_target(true)
                    .with_writer(std::io::stderr),
            )
            .init(),
    }
}
