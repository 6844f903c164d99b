//! Cache credential resolution.
//!
//! Resolution order:
//! 1. Environment variable (`KVSESSION_REDIS_PASSWORD`)
//! 2. Config file (with warning at load time)

/// Environment variable holding the cache password.
pub const PASSWORD_ENV: &str = "KVSESSION_REDIS_PASSWORD";

/// Result of credential resolution with provenance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedSecret {
    /// The secret value.
    pub value: String,
    /// Where the secret was found.
    pub source: SecretSource,
}

/// Where a secret was resolved from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretSource {
    /// Environment variable.
    EnvVar(String),
    /// Config file (plaintext, not recommended).
    ConfigFile,
}

impl std::fmt::Display for SecretSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SecretSource::EnvVar(var) => write!(f, "env var {}", var),
            SecretSource::ConfigFile => write!(f, "config file (plaintext)"),
        }
    }
}

/// Resolve the cache password from the process environment, then the config.
pub fn resolve_password(config_value: Option<&str>) -> Option<ResolvedSecret> {
    resolve_password_with(|var| std::env::var(var).ok(), config_value)
}

/// Resolve the cache password using `lookup` for environment access.
///
/// Empty values count as unset at every step.
pub fn resolve_password_with<F>(lookup: F, config_value: Option<&str>) -> Option<ResolvedSecret>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup(PASSWORD_ENV)
        && !value.is_empty()
    {
        return Some(ResolvedSecret {
            value,
            source: SecretSource::EnvVar(PASSWORD_ENV.to_string()),
        });
    }

    config_value
        .filter(|v| !v.is_empty())
        .map(|v| ResolvedSecret {
            value: v.to_string(),
            source: SecretSource::ConfigFile,
        })
}
