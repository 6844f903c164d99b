//! Configuration system for the kvsession store.
//!
//! Provides TOML-based configuration with:
//! - `[redis]` connection settings and liveness probe interval
//! - `[session]` TTL and key prefix
//! - `[logging]` level and output format
//! - Config file layering (user config dir + project-local overrides)
//! - Credential resolution (environment variable, then config file)
//!
//! [`resolve`] turns a loaded config into the parameters the session store
//! is built from.

pub mod discovery;
pub mod error;
pub mod resolver;
pub mod secrets;
pub mod types;

pub use discovery::{
    ConfigSource, LoadedConfig, load_config, load_config_file, load_config_with_options,
    load_explicit, xdg_config_dir, xdg_config_path,
};
pub use error::{ConfigError, Result};
pub use resolver::{ResolvedStore, resolve, resolve_with};
pub use secrets::{PASSWORD_ENV, ResolvedSecret, SecretSource};
pub use types::*;
