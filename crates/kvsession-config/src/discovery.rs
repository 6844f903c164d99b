//! Config file discovery and layered merging.
//!
//! Resolution order (later overrides earlier):
//! 1. `~/.config/kvsession/config.toml` (user config)
//! 2. `./kvsession.toml` (project-local)
//! 3. An explicit file passed by the caller replaces discovery entirely

use std::path::{Path, PathBuf};

use crate::{ConfigError, KvSessionConfig, Result};

/// Default config filename for project-local config.
const PROJECT_CONFIG_FILE: &str = "kvsession.toml";

/// Default config filename within the user config directory.
const USER_CONFIG_FILE: &str = "config.toml";

/// Application name for config directory resolution.
const APP_NAME: &str = "kvsession";

/// Environment variable to override the user config directory.
const CONFIG_DIR_ENV: &str = "KVSESSION_CONFIG_DIR";

/// Tracks where each config layer was loaded from.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the config file.
    pub path: PathBuf,
    /// Whether the file was found and loaded.
    pub loaded: bool,
}

/// Result of config discovery and loading.
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// The merged configuration.
    pub config: KvSessionConfig,
    /// Sources that were checked, in order of precedence (lowest first).
    pub sources: Vec<ConfigSource>,
    /// Warnings generated during loading (e.g., plaintext passwords).
    pub warnings: Vec<String>,
}

impl LoadedConfig {
    /// Get paths of sources that were actually loaded.
    pub fn loaded_from(&self) -> Vec<&Path> {
        self.sources
            .iter()
            .filter(|s| s.loaded)
            .map(|s| s.path.as_path())
            .collect()
    }
}

/// Load configuration by discovering and merging all config layers.
pub fn load_config(project_dir: Option<&Path>) -> Result<LoadedConfig> {
    load_config_with_options(project_dir, None)
}

/// Load configuration with explicit control over the user config directory.
///
/// `config_dir` overrides both `KVSESSION_CONFIG_DIR` and the platform default.
pub fn load_config_with_options(
    project_dir: Option<&Path>,
    config_dir: Option<&Path>,
) -> Result<LoadedConfig> {
    let mut config = KvSessionConfig::new();
    let mut sources = Vec::new();
    let mut warnings = Vec::new();

    // 1. User config: explicit override, then env var, then platform default
    let user_config_path = match config_dir {
        Some(dir) => Some(dir.join(USER_CONFIG_FILE)),
        None => xdg_config_path(),
    };
    if let Some(path) = user_config_path {
        sources.push(load_layer(&mut config, &path, &mut warnings));
    }

    // 2. Project-local config
    let project_path = project_dir
        .map(|d| d.join(PROJECT_CONFIG_FILE))
        .unwrap_or_else(|| PathBuf::from(PROJECT_CONFIG_FILE));
    sources.push(load_layer(&mut config, &project_path, &mut warnings));

    check_plaintext_password(&config, &mut warnings);

    Ok(LoadedConfig {
        config,
        sources,
        warnings,
    })
}

/// Load config from a specific file path (no discovery).
pub fn load_config_file(path: &Path) -> Result<KvSessionConfig> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.display().to_string(),
        source: e,
    })?;
    KvSessionConfig::from_toml(&contents)
}

/// Load exactly one explicit file, failing if it cannot be read or parsed.
pub fn load_explicit(path: &Path) -> Result<LoadedConfig> {
    let config = load_config_file(path)?;
    let mut warnings = Vec::new();
    check_plaintext_password(&config, &mut warnings);

    Ok(LoadedConfig {
        config,
        sources: vec![ConfigSource {
            path: path.to_path_buf(),
            loaded: true,
        }],
        warnings,
    })
}

/// Get the user config file path for kvsession.
pub fn xdg_config_path() -> Option<PathBuf> {
    xdg_config_dir().map(|d| d.join(USER_CONFIG_FILE))
}

/// Get the user config directory for kvsession.
///
/// Checks `KVSESSION_CONFIG_DIR` first, then falls back to the platform default.
pub fn xdg_config_dir() -> Option<PathBuf> {
    if let Ok(dir) = std::env::var(CONFIG_DIR_ENV)
        && !dir.is_empty()
    {
        return Some(PathBuf::from(dir));
    }
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

/// Try to load a config file and merge it into the existing config.
///
/// Missing files are skipped silently; unreadable or malformed files are
/// skipped with a warning.
fn load_layer(config: &mut KvSessionConfig, path: &Path, warnings: &mut Vec<String>) -> ConfigSource {
    if !path.is_file() {
        return ConfigSource {
            path: path.to_path_buf(),
            loaded: false,
        };
    }

    match load_config_file(path) {
        Ok(layer) => {
            config.merge(layer);
            ConfigSource {
                path: path.to_path_buf(),
                loaded: true,
            }
        }
        Err(e) => {
            warnings.push(format!("Failed to load {}: {}", path.display(), e));
            ConfigSource {
                path: path.to_path_buf(),
                loaded: false,
            }
        }
    }
}

fn check_plaintext_password(config: &KvSessionConfig, warnings: &mut Vec<String>) {
    if let Some(ref redis) = config.redis
        && redis.has_plaintext_password()
    {
        warnings.push(format!(
            "[redis] contains a plaintext password. \
             Consider setting {} instead.",
            crate::PASSWORD_ENV
        ));
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_xdg_config_path_shape() {
        if let Some(p) = xdg_config_path() {
            assert!(p.ends_with("config.toml"));
        }
    }

    #[test]
    fn test_load_config_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            r#"
[redis]
address = "cache:6379"
db = 1
"#,
        )
        .unwrap();

        let config = load_config_file(&path).unwrap();
        assert_eq!(config.redis().address, "cache:6379");
        assert_eq!(config.redis().db, 1);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let err = load_config_file(Path::new("/nonexistent/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadFile { .. }));
    }

    #[test]
    fn test_load_config_invalid_toml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "this is not valid toml {{{{").unwrap();

        let err = load_config_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_config_no_files() {
        let dir = TempDir::new().unwrap();
        let empty_config_dir = TempDir::new().unwrap();

        let loaded =
            load_config_with_options(Some(dir.path()), Some(empty_config_dir.path())).unwrap();
        assert!(loaded.config.redis.is_none());
        assert!(loaded.loaded_from().is_empty());
        assert_eq!(loaded.sources.len(), 2);
    }

    #[test]
    fn test_load_config_layered_merge() {
        let user_dir = TempDir::new().unwrap();
        let project_dir = TempDir::new().unwrap();

        fs::write(
            user_dir.path().join("config.toml"),
            r#"
[redis]
address = "user:6379"

[session]
ttl_secs = 600
"#,
        )
        .unwrap();
        fs::write(
            project_dir.path().join("kvsession.toml"),
            r#"
[redis]
address = "project:6379"
"#,
        )
        .unwrap();

        let loaded =
            load_config_with_options(Some(project_dir.path()), Some(user_dir.path())).unwrap();

        // Project-local overrides user config
        assert_eq!(loaded.config.redis().address, "project:6379");
        // User sections the project didn't override are preserved
        assert_eq!(loaded.config.session().ttl_secs, 600);
        assert_eq!(loaded.loaded_from().len(), 2);
    }

    #[test]
    fn test_plaintext_password_warning() {
        let project_dir = TempDir::new().unwrap();
        let empty_config_dir = TempDir::new().unwrap();
        fs::write(
            project_dir.path().join("kvsession.toml"),
            r#"
[redis]
password = "hunter2"
"#,
        )
        .unwrap();

        let loaded =
            load_config_with_options(Some(project_dir.path()), Some(empty_config_dir.path()))
                .unwrap();
        assert_eq!(loaded.warnings.len(), 1);
        assert!(loaded.warnings[0].contains("plaintext"));
        assert!(loaded.warnings[0].contains("KVSESSION_REDIS_PASSWORD"));
    }

    #[test]
    fn test_malformed_config_warns_but_continues() {
        let project_dir = TempDir::new().unwrap();
        let empty_config_dir = TempDir::new().unwrap();
        fs::write(project_dir.path().join("kvsession.toml"), "not valid toml {{{{").unwrap();

        let loaded =
            load_config_with_options(Some(project_dir.path()), Some(empty_config_dir.path()))
                .unwrap();
        assert!(loaded.loaded_from().is_empty());
        assert_eq!(loaded.warnings.len(), 1);
        assert!(loaded.warnings[0].contains("Failed to load"));
    }

    #[test]
    fn test_load_explicit() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        fs::write(&path, "[redis]\ndb = 7\n").unwrap();

        let loaded = load_explicit(&path).unwrap();
        assert_eq!(loaded.config.redis().db, 7);
        assert_eq!(loaded.loaded_from(), vec![path.as_path()]);

        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            load_explicit(&missing),
            Err(ConfigError::ReadFile { .. })
        ));
    }
}
