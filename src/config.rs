//! Configuration file loading.
//!
//! Settings come from `~/.config/peer-review/config.toml` (or `--config`),
//! then command-line flags override them.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::llm::GeminiClientConfig;
use crate::orchestrator::StaleResultPolicy;

const APP_DIR: &str = "peer-review";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_key: Option<String>,
    pub model: String,
    pub endpoint: String,
    pub temperature: f32,
    pub timeout_secs: u64,
    pub stale_results: StaleResultPolicy,
    pub log_level: String,
    pub log_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        let gemini = GeminiClientConfig::default();
        Self {
            api_key: None,
            model: gemini.model,
            endpoint: gemini.endpoint,
            temperature: gemini.temperature,
            timeout_secs: gemini.timeout_secs,
            stale_results: StaleResultPolicy::default(),
            log_level: "info".to_string(),
            log_file: None,
        }
    }
}

impl Config {
    /// `~/.config/peer-review/config.toml` on Linux, platform equivalent elsewhere
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
    }

    /// Load and parse a config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load an explicit path (which must exist), else the default path if
    /// present, else built-in defaults
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Where logs go; the terminal itself belongs to the UI
    pub fn log_path(&self) -> PathBuf {
        if let Some(path) = &self.log_file {
            return path.clone();
        }
        dirs::data_local_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join(APP_DIR)
            .join("peer-review.log")
    }

    pub fn gemini(&self) -> GeminiClientConfig {
        GeminiClientConfig {
            api_key: self.api_key.clone().unwrap_or_default(),
            model: self.model.clone(),
            endpoint: self.endpoint.clone(),
            temperature: self.temperature,
            timeout_secs: self.timeout_secs,
        }
    }
}
