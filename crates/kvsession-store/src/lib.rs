//! Session store backed by a remote key-value cache.
//!
//! This crate maps session ids to user logins in an external cache with:
//! - A fixed per-session TTL applied at creation
//! - A background liveness probe that tracks whether the cache is reachable
//! - Pluggable backends (Redis, in-memory) behind the [`KvBackend`] trait
//!
//! While the cache is marked unreachable, every operation except
//! [`SessionStore::delete_session`] short-circuits with a negative result
//! instead of issuing a command.
//!
//! # Example
//!
//! ```rust,ignore
//! use kvsession_store::{ConnectionParams, Session, SessionStore, StoreConfig};
//!
//! let params = ConnectionParams::new("127.0.0.1:6379").with_db(2);
//! let store = SessionStore::connect(&params, StoreConfig::default()).await?;
//!
//! store.create_session(&Session::new("abc", "alice")).await?;
//! assert_eq!(store.login_for("abc").await?, Some("alice".to_string()));
//! ```

mod backend;
mod config;
mod connectivity;
mod error;
mod liveness;
mod memory;
mod redis_backend;
mod session;
mod store;

pub use backend::KvBackend;
pub use config::{
    ConnectionParams, DEFAULT_PROBE_INTERVAL, DEFAULT_SESSION_TTL, MAX_SESSION_TTL, StoreConfig,
};
pub use connectivity::{Connectivity, ConnectivityStatus};
pub use error::{Error, Result};
pub use memory::MemoryBackend;
pub use redis_backend::RedisBackend;
pub use session::Session;
pub use store::SessionStore;
