//! Configuration loader for DumAI.
//!
//! Reads `config.toml` from the data directory (`~/.dumai/` in production)
//! and deserializes it into [`AppConfig`]. Falls back to defaults when the
//! file is missing or malformed, then applies environment overrides.

use std::path::{Path, PathBuf};

use dumai_types::config::AppConfig;

/// Environment variable holding the Groq API key.
pub const API_KEY_ENV: &str = "GROQ_API_KEY";
/// Environment variable overriding `llm.model`.
pub const MODEL_ENV: &str = "DUMAI_MODEL";
/// Environment variable overriding `llm.base_url`.
pub const BASE_URL_ENV: &str = "DUMAI_BASE_URL";
/// Environment variable overriding the data directory.
pub const DATA_DIR_ENV: &str = "DUMAI_DATA_DIR";

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `DUMAI_DATA_DIR` environment variable
/// 2. `~/.dumai`
/// 3. `.dumai` in the current directory
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(DATA_DIR_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".dumai");
    }

    PathBuf::from(".dumai")
}

/// Load configuration from `{data_dir}/config.toml` and the environment.
pub async fn load_config(data_dir: &Path) -> AppConfig {
    let config = load_config_file(data_dir).await;
    apply_env_overrides(config, |key| std::env::var(key).ok())
}

/// Load `{data_dir}/config.toml` without environment overrides.
///
/// - Missing file: [`AppConfig::default()`].
/// - Unreadable or unparsable file: logs a warning and returns the default.
pub async fn load_config_file(data_dir: &Path) -> AppConfig {
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

/// Apply `GROQ_API_KEY`, `DUMAI_MODEL` and `DUMAI_BASE_URL` on top of `config`.
///
/// Empty values are ignored. `lookup` is injected so tests never touch the
/// process environment.
pub fn apply_env_overrides(
    mut config: AppConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> AppConfig {
    let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(key) = non_empty(API_KEY_ENV) {
        config.llm.api_key = Some(key);
    }
    if let Some(model) = non_empty(MODEL_ENV) {
        tracing::debug!(%model, "Model overridden from environment");
        config.llm.model = model;
    }
    if let Some(base_url) = non_empty(BASE_URL_ENV) {
        config.llm.base_url = base_url;
    }
    config
}
