use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use validator::Validate;

use groundsearch_types::{AppConfig, ConfigError};

const CONFIG_DIR: &str = "groundsearch";
const CONFIG_FILE: &str = "config.json";

/// API key variables, first non-empty wins.
const API_KEY_VARS: [&str; 2] = ["GEMINI_API_KEY", "GOOGLE_API_KEY"];
const HOST_VAR: &str = "GROUNDSEARCH_HOST";
const PORT_VAR: &str = "GROUNDSEARCH_PORT";
const STATIC_DIR_VAR: &str = "GROUNDSEARCH_STATIC_DIR";

/// `<config_dir>/groundsearch/config.json`, if the platform has a config dir.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load configuration from the process environment.
///
/// An explicit `path` must exist. Without one, the default location is used
/// when present and built-in defaults otherwise.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    load_config_with_env(path, |name| std::env::var(name).ok())
}

/// Same as [`load_config`] with an injectable environment lookup.
pub fn load_config_with_env<F>(path: Option<&Path>, env: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match path {
        Some(path) => {
            if !path.exists() {
                return Err(ConfigError::NotFound { path: path.display().to_string() });
            }
            read_config_file(path)?
        },
        None => match default_config_path() {
            Some(path) if path.exists() => read_config_file(&path)?,
            _ => {
                debug!("No config file found, using defaults");
                AppConfig::default()
            },
        },
    };

    apply_env_overrides(&mut config, env)?;

    config
        .validate()
        .map_err(|e| ConfigError::ValidationError { message: e.to_string() })?;

    Ok(config)
}

fn read_config_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;
    let config = serde_json::from_str(&content).map_err(|e| ConfigError::from_json_error(&e))?;
    info!("Loaded config from {}", path.display());
    Ok(config)
}

/// Overlay environment variables onto `config`.
pub fn apply_env_overrides<F>(config: &mut AppConfig, env: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let non_empty = |name: &str| env(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

    if let Some(key) = API_KEY_VARS.iter().find_map(|name| non_empty(name)) {
        config.model.api_key = key;
    }

    if let Some(host) = non_empty(HOST_VAR) {
        config.server.host = host;
    }

    if let Some(port) = non_empty(PORT_VAR) {
        config.server.port = port.parse().map_err(|_| ConfigError::ValidationError {
            message: format!("{} must be a port number, got '{}'", PORT_VAR, port),
        })?;
    }

    if let Some(dir) = non_empty(STATIC_DIR_VAR) {
        if !Path::new(&dir).is_dir() {
            warn!("{} points to a missing directory: {}", STATIC_DIR_VAR, dir);
        }
        config.server.static_dir = Some(dir);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> =
            pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |name| map.get(name).cloned()
    }

    fn write_config(body: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(body.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_explicit_missing_path_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.json");
        let err = load_config_with_env(Some(&path), env_of(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound { .. }));
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let file = write_config(r#"{"server": {"port": 8080}, "model": {"temperature": 0.2}}"#);
        let config = load_config_with_env(Some(file.path()), env_of(&[])).unwrap();

        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.model.temperature, 0.2);
        assert_eq!(config.model.model, "gemini-2.0-flash-exp");
        assert_eq!(config.session.ttl_secs, 3600);
    }

    #[test]
    fn test_invalid_json_is_parse_error() {
        let file = write_config("{ not json");
        let err = load_config_with_env(Some(file.path()), env_of(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn test_out_of_range_value_fails_validation() {
        let file = write_config(r#"{"session": {"ttl_secs": 0}}"#);
        let err = load_config_with_env(Some(file.path()), env_of(&[])).unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }

    #[test]
    fn test_env_overrides_file() {
        let file = write_config(r#"{"server": {"host": "0.0.0.0", "port": 8080}}"#);
        let env = env_of(&[
            ("GOOGLE_API_KEY", "google-key"),
            ("GROUNDSEARCH_PORT", "9000"),
            ("GROUNDSEARCH_STATIC_DIR", "/srv/client"),
        ]);
        let config = load_config_with_env(Some(file.path()), env).unwrap();

        assert_eq!(config.model.api_key, "google-key");
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.server.static_dir.as_deref(), Some("/srv/client"));
    }

    #[test]
    fn test_gemini_key_takes_precedence() {
        let mut config = AppConfig::default();
        let env = env_of(&[("GEMINI_API_KEY", " gemini-key "), ("GOOGLE_API_KEY", "google-key")]);
        apply_env_overrides(&mut config, env).unwrap();
        assert_eq!(config.model.api_key, "gemini-key");
    }

    #[test]
    fn test_blank_key_is_ignored() {
        let mut config = AppConfig::default();
        let env = env_of(&[("GEMINI_API_KEY", "  "), ("GOOGLE_API_KEY", "google-key")]);
        apply_env_overrides(&mut config, env).unwrap();
        assert_eq!(config.model.api_key, "google-key");
    }

    #[test]
    fn test_bad_port_env_is_rejected() {
        let mut config = AppConfig::default();
        let err = apply_env_overrides(&mut config, env_of(&[("GROUNDSEARCH_PORT", "http")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::ValidationError { .. }));
    }
}
