//! Configuration types mapping to the TOML schema.
//!
//! ```toml
//! [redis]       # cache connection and liveness probe
//! [session]     # TTL and key prefix
//! [logging]     # level and output format
//! ```

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────────────────────────────────────
// Top-level Config
// ─────────────────────────────────────────────────────────────────────────────

/// Root configuration structure.
///
/// All sections are optional so partial configs (e.g. a project-local file
/// that only overrides `[redis]`) can be loaded and merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KvSessionConfig {
    /// Cache connection configuration.
    pub redis: Option<RedisConfig>,

    /// Session behavior configuration.
    pub session: Option<SessionConfig>,

    /// Log output configuration.
    pub logging: Option<LoggingConfig>,
}

impl KvSessionConfig {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a TOML string.
    pub fn from_toml(toml_str: &str) -> crate::Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> crate::Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Merge another config on top of this one (other takes priority).
    ///
    /// Sections are replaced whole, not field by field.
    pub fn merge(&mut self, other: KvSessionConfig) {
        if other.redis.is_some() {
            self.redis = other.redis;
        }

        if other.session.is_some() {
            self.session = other.session;
        }

        if other.logging.is_some() {
            self.logging = other.logging;
        }
    }

    /// The `[redis]` section, or defaults.
    pub fn redis(&self) -> RedisConfig {
        self.redis.clone().unwrap_or_default()
    }

    /// The `[session]` section, or defaults.
    pub fn session(&self) -> SessionConfig {
        self.session.clone().unwrap_or_default()
    }

    /// The `[logging]` section, or defaults.
    pub fn logging(&self) -> LoggingConfig {
        self.logging.clone().unwrap_or_default()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Redis Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Cache connection configuration.
///
/// ```toml
/// [redis]
/// address = "127.0.0.1:6379"
/// db = 0
/// probe_interval_secs = 5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
    /// `host:port` or a `redis://` URL.
    pub address: String,
    /// Access credential. Prefer the `KVSESSION_REDIS_PASSWORD` env var.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Logical database index.
    pub db: i64,
    /// Seconds between two liveness probes.
    pub probe_interval_secs: u64,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:6379".to_string(),
            password: None,
            db: 0,
            probe_interval_secs: 5,
        }
    }
}

impl RedisConfig {
    /// Whether a non-empty password is stored in the config file itself.
    pub fn has_plaintext_password(&self) -> bool {
        self.password.as_deref().is_some_and(|p| !p.is_empty())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Session Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Session behavior configuration.
///
/// ```toml
/// [session]
/// ttl_secs = 86400
/// key_prefix = ""
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Lifetime of a session from creation, in seconds.
    pub ttl_secs: u64,
    /// Namespace prepended to session ids in the cache.
    pub key_prefix: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            ttl_secs: 24 * 60 * 60,
            key_prefix: String::new(),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Logging Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

/// Log output configuration.
///
/// ```toml
/// [logging]
/// level = "info"
/// format = "json"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level for kvsession crates when `RUST_LOG` is unset.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config() {
        let config = KvSessionConfig::new();
        assert!(config.redis.is_none());
        assert!(config.session.is_none());
        assert!(config.logging.is_none());
        assert_eq!(config.redis().address, "127.0.0.1:6379");
        assert_eq!(config.session().ttl_secs, 86_400);
    }

    #[test]
    fn test_parse_full() {
        let toml = r#"
[redis]
address = "cache.internal:6380"
password = "secret"
db = 3
probe_interval_secs = 10

[session]
ttl_secs = 3600
key_prefix = "sess:"

[logging]
level = "debug"
format = "json"
"#;
        let config = KvSessionConfig::from_toml(toml).unwrap();

        let redis = config.redis();
        assert_eq!(redis.address, "cache.internal:6380");
        assert_eq!(redis.password.as_deref(), Some("secret"));
        assert_eq!(redis.db, 3);
        assert_eq!(redis.probe_interval_secs, 10);

        let session = config.session();
        assert_eq!(session.ttl_secs, 3600);
        assert_eq!(session.key_prefix, "sess:");

        let logging = config.logging();
        assert_eq!(logging.level, "debug");
        assert_eq!(logging.format, LogFormat::Json);
    }

    #[test]
    fn test_partial_section_uses_field_defaults() {
        let toml = r#"
[redis]
db = 2
"#;
        let config = KvSessionConfig::from_toml(toml).unwrap();
        let redis = config.redis();
        assert_eq!(redis.db, 2);
        assert_eq!(redis.address, "127.0.0.1:6379");
        assert_eq!(redis.probe_interval_secs, 5);
    }

    #[test]
    fn test_merge_replaces_sections() {
        let mut base = KvSessionConfig::from_toml(
            r#"
[redis]
address = "base:6379"

[session]
ttl_secs = 60
"#,
        )
        .unwrap();
        let overlay = KvSessionConfig::from_toml(
            r#"
[redis]
address = "overlay:6379"
"#,
        )
        .unwrap();

        base.merge(overlay);

        assert_eq!(base.redis().address, "overlay:6379");
        assert_eq!(base.session().ttl_secs, 60);
    }

    #[test]
    fn test_toml_roundtrip_omits_missing_password() {
        let mut config = KvSessionConfig::new();
        config.redis = Some(RedisConfig::default());

        let rendered = config.to_toml().unwrap();
        assert!(!rendered.contains("password"));
        assert_eq!(KvSessionConfig::from_toml(&rendered).unwrap(), config);
    }

    #[test]
    fn test_plaintext_password_detection() {
        let mut redis = RedisConfig::default();
        assert!(!redis.has_plaintext_password());
        redis.password = Some(String::new());
        assert!(!redis.has_plaintext_password());
        redis.password = Some("secret".to_string());
        assert!(redis.has_plaintext_password());
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        let toml = r#"
[logging]
format = "xml"
"#;
        assert!(KvSessionConfig::from_toml(toml).is_err());
    }
}
