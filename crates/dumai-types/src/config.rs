//! Configuration types for DumAI.
//!
//! `AppConfig` represents the top-level `config.toml`. Every field has a
//! default, so an empty file (or no file at all) yields a working server
//! that only lacks an API key.

use serde::{Deserialize, Serialize};

/// Top-level configuration.
///
/// Loaded from `~/.dumai/config.toml`. All sections are optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub chat: ChatConfig,

    #[serde(default)]
    pub llm: LlmConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

/// Session orchestration policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    /// Title given to sessions before a real one can be derived.
    #[serde(default = "default_title")]
    pub default_title: String,

    /// Whether turns without any resolvable identity get a transient session.
    #[serde(default = "default_allow_anonymous")]
    pub allow_anonymous: bool,

    /// Upper bound on inbound message length, in characters.
    #[serde(default = "default_max_message_chars")]
    pub max_message_chars: usize,
}

fn default_title() -> String {
    "New Chat".to_string()
}

fn default_allow_anonymous() -> bool {
    true
}

fn default_max_message_chars() -> usize {
    4_000
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            default_title: default_title(),
            allow_anonymous: default_allow_anonymous(),
            max_message_chars: default_max_message_chars(),
        }
    }
}

/// Remote reply generator settings (Groq, OpenAI-compatible).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// API key. Usually supplied through `GROQ_API_KEY` instead of the file.
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_model() -> String {
    "llama3-70b-8192".to_string()
}

fn default_temperature() -> f32 {
    0.9
}

fn default_max_tokens() -> u32 {
    500
}

fn default_timeout_secs() -> u64 {
    60
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            api_key: None,
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_config_default_values() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.chat.default_title, "New Chat");
        assert!(config.chat.allow_anonymous);
        assert_eq!(config.llm.model, "llama3-70b-8192");
        assert!(config.llm.api_key.is_none());
    }

    #[test]
    fn test_app_config_deserialize_empty() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.chat.max_message_chars, 4_000);
        assert_eq!(config.llm.max_tokens, 500);
    }

    #[test]
    fn test_app_config_deserialize_partial_sections() {
        let toml_str = r#"
[server]
port = 8080

[chat]
allow_anonymous = false

[llm]
model = "llama-3.3-70b-versatile"
temperature = 0.5
"#;
        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.host, "0.0.0.0");
        assert!(!config.chat.allow_anonymous);
        assert_eq!(config.chat.default_title, "New Chat");
        assert_eq!(config.llm.model, "llama-3.3-70b-versatile");
        assert!((config.llm.temperature - 0.5).abs() < f32::EPSILON);
        assert_eq!(config.llm.base_url, "https://api.groq.com/openai/v1");
    }
}
