//! Session value type.

/// A session: an opaque id mapped to the login of the user who owns it.
///
/// The store never persists this as a structured record; it becomes a single
/// `sid -> login` entry in the cache.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque session identifier, used as the cache key.
    pub sid: String,

    /// User identity, stored as the cache value.
    pub login: String,
}

impl Session {
    /// Create a new session.
    pub fn new(sid: impl Into<String>, login: impl Into<String>) -> Self {
        Self {
            sid: sid.into(),
            login: login.into(),
        }
    }
}
