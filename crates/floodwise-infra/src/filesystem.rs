//! Data directory resolution.

use std::path::PathBuf;

/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "FLOODWISE_DATA_DIR";

/// Resolve the Floodwise data directory.
///
/// Checks `FLOODWISE_DATA_DIR` first, then falls back to `~/.floodwise`.
pub fn resolve_data_dir() -> PathBuf {
    resolve_data_dir_from(std::env::var(DATA_DIR_ENV).ok())
}

fn resolve_data_dir_from(env_value: Option<String>) -> PathBuf {
    if let Some(dir) = env_value.filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }

    // Use home directory fallback: ~/.floodwise
    if let Some(home) = dirs::home_dir() {
        return home.join(".floodwise");
    }

    // Last resort: current directory
    PathBuf::from(".floodwise")
}
