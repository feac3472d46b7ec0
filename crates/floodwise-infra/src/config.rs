//! Configuration loader for Floodwise.
//!
//! Reads `floodwise.toml` from the data directory (`~/.floodwise/` in
//! production) or from an explicit path, and deserializes it into
//! [`AppConfig`].

use std::path::{Path, PathBuf};

use floodwise_types::config::AppConfig;
use floodwise_types::error::ConfigError;

/// File name of the configuration inside the data directory.
pub const CONFIG_FILE: &str = "floodwise.toml";

/// Environment variable overriding the model artifact path.
pub const MODEL_PATH_ENV: &str = "FLOODWISE_MODEL_PATH";

/// Load configuration from `{data_dir}/floodwise.toml`.
///
/// - If the file does not exist, returns [`AppConfig::default()`].
/// - If the file exists but fails to read or parse, logs a warning and returns the default.
pub async fn load_config(data_dir: &Path) -> AppConfig {
    let config_path = data_dir.join(CONFIG_FILE);

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No {CONFIG_FILE} found at {}, using defaults", config_path.display());
            return AppConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", config_path.display());
            return AppConfig::default();
        }
    };

    match toml::from_str::<AppConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!(
                "Failed to parse {}: {err}, using defaults",
                config_path.display()
            );
            AppConfig::default()
        }
    }
}

/// Load configuration from a path the user named explicitly.
///
/// Unlike [`load_config`], a missing or malformed file is an error.
pub async fn load_config_file(path: &Path) -> Result<AppConfig, ConfigError> {
    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;

    toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}

/// Resolve the model artifact path.
///
/// Priority:
/// 1. Explicit CLI flag
/// 2. `FLOODWISE_MODEL_PATH` environment variable (passed in as `env_override`)
/// 3. `model_path` from the configuration
pub fn resolve_model_path(
    config: &AppConfig,
    cli_override: Option<&Path>,
    env_override: Option<&str>,
) -> PathBuf {
    if let Some(path) = cli_override {
        return path.to_path_buf();
    }
    match env_override {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => config.model_path.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_config(tmp.path()).await;
        assert_eq!(config, AppConfig::default());
    }

    #[tokio::test]
    async fn load_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(
            tmp.path().join(CONFIG_FILE),
            r#"
model_path = "/srv/models/flood.json"
cache_model = true
port = 9090
"#,
        )
        .await
        .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config.model_path, PathBuf::from("/srv/models/flood.json"));
        assert!(config.cache_model);
        assert_eq!(config.port, 9090);
        assert_eq!(config.host, "127.0.0.1");
    }

    #[tokio::test]
    async fn load_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        tokio::fs::write(tmp.path().join(CONFIG_FILE), "port = \"not a number\"")
            .await
            .unwrap();

        let config = load_config(tmp.path()).await;
        assert_eq!(config, AppConfig::default());
    }

    #[tokio::test]
    async fn load_config_file_missing_is_error() {
        let tmp = TempDir::new().unwrap();
        let err = load_config_file(&tmp.path().join("nope.toml"))
            .await
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[tokio::test]
    async fn load_config_file_invalid_is_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("custom.toml");
        tokio::fs::write(&path, "this is not { valid toml !!!")
            .await
            .unwrap();
        let err = load_config_file(&path).await.unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn resolve_model_path_priority() {
        let config = AppConfig::default();
        let cli = PathBuf::from("/cli/model.json");

        assert_eq!(
            resolve_model_path(&config, Some(&cli), Some("/env/model.json")),
            cli
        );
        assert_eq!(
            resolve_model_path(&config, None, Some("/env/model.json")),
            PathBuf::from("/env/model.json")
        );
        assert_eq!(resolve_model_path(&config, None, Some("")), config.model_path);
        assert_eq!(resolve_model_path(&config, None, None), config.model_path);
    }
}
