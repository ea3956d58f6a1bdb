//! Configuration structures and loading logic.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::api::DEFAULT_ORIGIN;
use crate::error::{Error, Result};

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub account: AccountConfig,

    #[serde(default)]
    pub options: OptionsConfig,
}

/// Account credentials configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Pre-obtained authorization token.
    #[serde(default)]
    pub authorization_token: String,

    /// Browser user agent string.
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// Archiving options configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Base directory for downloads.
    #[serde(default)]
    pub download_directory: Option<PathBuf>,

    /// API origin.
    #[serde(default = "default_api_origin")]
    pub api_origin: String,

    /// Stop walking an endpoint at the first already-downloaded file.
    /// Assumes strictly reverse-chronological pagination; files the remote
    /// reordered past that point are silently missed, so this stays opt-in.
    #[serde(default)]
    pub quick_fetch: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            download_directory: None,
            api_origin: default_api_origin(),
            quick_fetch: false,
        }
    }
}

impl Default for AccountConfig {
    fn default() -> Self {
        Self {
            authorization_token: String::new(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/144.0.0.0 Safari/537.36".to_string()
}

fn default_api_origin() -> String {
    DEFAULT_ORIGIN.to_string()
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!(
                    "Configuration file not found: {}",
                    path.display()
                ))
            } else {
                Error::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Get the effective download directory.
    pub fn download_directory(&self) -> PathBuf {
        self.options
            .download_directory
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            account: AccountConfig::default(),
            options: OptionsConfig::default(),
        }
    }
}
