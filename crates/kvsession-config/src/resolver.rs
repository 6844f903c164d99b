//! Turns a loaded config into session store parameters.

use std::time::Duration;

use kvsession_store::{ConnectionParams, MAX_SESSION_TTL, StoreConfig};

use crate::secrets::{ResolvedSecret, SecretSource, resolve_password, resolve_password_with};
use crate::{ConfigError, KvSessionConfig, Result};

/// Everything needed to build a session store.
#[derive(Debug, Clone)]
pub struct ResolvedStore {
    /// How to reach the cache.
    pub params: ConnectionParams,
    /// Store behavior.
    pub store: StoreConfig,
    /// Where the password came from, if one was resolved.
    pub password_source: Option<SecretSource>,
}

/// Resolve store parameters, reading the password from the environment first.
pub fn resolve(config: &KvSessionConfig) -> Result<ResolvedStore> {
    let secret = resolve_password(config.redis().password.as_deref());
    build(config, secret)
}

/// Resolve store parameters with an explicit environment lookup.
pub fn resolve_with<F>(config: &KvSessionConfig, lookup: F) -> Result<ResolvedStore>
where
    F: Fn(&str) -> Option<String>,
{
    let secret = resolve_password_with(lookup, config.redis().password.as_deref());
    build(config, secret)
}

fn build(
    config: &KvSessionConfig,
    secret: Option<ResolvedSecret>,
) -> Result<ResolvedStore> {
    let redis = config.redis();
    let session = config.session();

    if redis.address.trim().is_empty() {
        return Err(ConfigError::MissingField {
            field: "address".to_string(),
            context: "[redis]".to_string(),
        });
    }
    if redis.probe_interval_secs == 0 {
        return Err(ConfigError::InvalidValue {
            field: "redis.probe_interval_secs".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    if session.ttl_secs == 0 {
        return Err(ConfigError::InvalidValue {
            field: "session.ttl_secs".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }
    if session.ttl_secs > MAX_SESSION_TTL.as_secs() {
        return Err(ConfigError::InvalidValue {
            field: "session.ttl_secs".to_string(),
            reason: format!("must not exceed {}", MAX_SESSION_TTL.as_secs()),
        });
    }

    let mut params = ConnectionParams::new(redis.address.trim()).with_db(redis.db);
    let password_source = secret.map(|secret| {
        params.password = Some(secret.value);
        secret.source
    });

    let store = StoreConfig::new()
        .with_session_ttl(Duration::from_secs(session.ttl_secs))
        .with_probe_interval(Duration::from_secs(redis.probe_interval_secs))
        .with_key_prefix(session.key_prefix);

    Ok(ResolvedStore {
        params,
        store,
        password_source,
    })
}
