//! CLI command handlers.

pub mod session;
pub mod status;
pub mod watch;

/// Shared context for all commands.
#[derive(Debug, Clone)]
pub struct Context {
    /// Cache address the store was built for (`memory` for the in-process cache).
    pub address: String,
    /// Output as JSON for scripting.
    pub json_output: bool,
    /// Verbose output enabled.
    pub verbose: bool,
}
