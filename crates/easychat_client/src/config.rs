//! Client config load/save for `~/.easychat/config.yaml` (api.*, ui.*).

use std::path::{Path, PathBuf};

use crate::i18n::Language;

/// Default chat-completions endpoint.
pub const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
/// Default model name.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
/// Default font size for both the chat area and the input box.
pub const DEFAULT_FONT_SIZE: u32 = 11;

/// API section (key, url, model).
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ApiSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

/// UI section (language, font sizes).
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct UiSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chat_font_size: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_font_size: Option<u32>,
}

/// Full config. Missing fields fall back to defaults through the accessors.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiSection,
    #[serde(default)]
    pub ui: UiSection,
}

impl Config {
    /// Configured API key, or `None` when missing or blank.
    pub fn api_key(&self) -> Option<&str> {
        self.api
            .key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
    }

    /// Endpoint URL, defaulting to the OpenAI chat-completions URL.
    pub fn api_url(&self) -> &str {
        self.api
            .url
            .as_deref()
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .unwrap_or(DEFAULT_API_URL)
    }

    /// Model name, defaulting to [`DEFAULT_MODEL`].
    pub fn model(&self) -> &str {
        self.api
            .model
            .as_deref()
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .unwrap_or(DEFAULT_MODEL)
    }

    /// Interface language. Defaults to Chinese (the stored `中文` value).
    pub fn language(&self) -> Language {
        self.ui
            .language
            .as_deref()
            .map(Language::from_config)
            .unwrap_or_default()
    }

    pub fn chat_font_size(&self) -> u32 {
        self.ui.chat_font_size.unwrap_or(DEFAULT_FONT_SIZE)
    }

    pub fn input_font_size(&self) -> u32 {
        self.ui.input_font_size.unwrap_or(DEFAULT_FONT_SIZE)
    }
}

/// Returns the default config file path: `~/.easychat/config.yaml` (platform-specific).
pub fn default_config_path() -> Option<PathBuf> {
    let home = home_dir()?;
    Some(home.join(".easychat").join("config.yaml"))
}

#[cfg(unix)]
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

#[cfg(windows)]
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("USERPROFILE").map(PathBuf::from)
}

#[cfg(not(any(unix, windows)))]
fn home_dir() -> Option<PathBuf> {
    None
}

/// Load config from a YAML file. Path is typically `~/.easychat/config.yaml`.
pub fn load(path: &Path) -> Result<Config, ConfigError> {
    let contents = std::fs::read_to_string(path)?;
    let config = serde_yaml::from_str(&contents)?;
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}

/// Save config to a YAML file. Creates parent directory if missing.
pub fn save(path: &Path, config: &Config) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        if !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let contents = serde_yaml::to_string(config)?;
    std::fs::write(path, contents)?;
    log::debug!("saved config to {}", path.display());
    Ok(())
}

/// Config load/save error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
