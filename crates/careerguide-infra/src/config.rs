//! Application configuration loader for CareerGuide.
//!
//! Reads `config.toml` from the data directory (`~/.careerguide/` in
//! production) and deserializes it into [`AppConfig`]. Falls back to
//! sensible defaults when the file is missing or malformed.

use std::path::{Path, PathBuf};

use careerguide_types::config::AppConfig;

/// Resolve the data directory.
///
/// Priority:
/// 1. `CAREERGUIDE_DATA_DIR` environment variable
/// 2. `~/.careerguide/`
/// 3. `./.careerguide/` when no home directory can be determined
pub fn data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("CAREERGUIDE_DATA_DIR") {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .map(|home| home.join(".careerguide"))
        .unwrap_or_else(|| PathBuf::from(".careerguide"))
}

/// SQLite connection URL for the database file under `data_dir`.
///
/// `mode=rwc` creates the file on first open.
pub fn database_url(data_dir: &Path) -> String {
    format!("sqlite://{}/careerguide.db?mode=rwc", data_dir.display())
}

/// Load application configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`AppConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_app_config(data_dir: &Path) -> AppConfig {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
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
