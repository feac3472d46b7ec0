//! Application configuration types for Floodwise.
//!
//! `AppConfig` represents `floodwise.toml`, which controls where the model
//! artifact lives, whether it is cached, where the HTTP server binds and how
//! long idle wizard sessions are kept.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// Loaded from `~/.floodwise/floodwise.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to the JSON model artifact. Relative paths resolve against the
    /// working directory.
    #[serde(default = "default_model_path")]
    pub model_path: PathBuf,

    /// Keep the loaded model for the lifetime of the process instead of
    /// reloading it on every prediction.
    #[serde(default)]
    pub cache_model: bool,

    /// Address the HTTP server binds to.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port the HTTP server listens on.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Seconds a wizard session may sit idle before the server drops it.
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
}

fn default_model_path() -> PathBuf {
    PathBuf::from("models/flood_model.json")
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8580
}

fn default_session_ttl_secs() -> u64 {
    30 * 60
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            model_path: default_model_path(),
            cache_model: false,
            host: default_host(),
            port: default_port(),
            session_ttl_secs: default_session_ttl_secs(),
        }
    }
}
