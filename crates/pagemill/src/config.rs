//! Configuration management for pagemill.
//!
//! This module provides configuration loading and validation using figment,
//! supporting TOML config files, environment variables, and defaults.

use std::path::PathBuf;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::lint::LintConfig;
use crate::matter::MatterStyle;

/// Default configuration file name.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Default config directory name.
const CONFIG_DIR_NAME: &str = "pagemill";

/// Default content root, relative to the working directory.
const DEFAULT_CONTENT_ROOT: &str = "content";

/// Application configuration.
///
/// Configuration is loaded from (in order of precedence, highest first):
/// 1. Environment variables, prefixed with `PAGEMILL_` and with `__`
///    separating section from key (`PAGEMILL_CONTENT__ROOT`, so keys like
///    `include_drafts` stay addressable)
/// 2. TOML config file at `~/.config/pagemill/config.toml`
/// 3. Default values
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Content tree configuration.
    pub content: ContentConfig,
    /// Lint configuration.
    pub lint: LintConfig,
    /// Authoring configuration for new documents.
    pub authoring: AuthoringConfig,
}

/// Content-tree-related configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Root directory of the content tree.
    /// Defaults to `content` in the working directory.
    pub root: Option<PathBuf>,
    /// File extensions treated as documents.
    pub extensions: Vec<String>,
    /// Include drafts in listings by default.
    pub include_drafts: bool,
}

/// Authoring-related configuration, applied by `pmill new`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthoringConfig {
    /// Front matter style used for new documents.
    pub default_style: MatterStyle,
    /// Author name stamped into new documents.
    pub author: Option<String>,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            root: None, // Resolved to ./content at runtime
            extensions: default_extensions(),
            include_drafts: false,
        }
    }
}

impl Default for AuthoringConfig {
    fn default() -> Self {
        Self {
            default_style: MatterStyle::Yaml,
            author: None,
        }
    }
}

/// Default document file extensions.
fn default_extensions() -> Vec<String> {
    vec!["md".to_string(), "markdown".to_string()]
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Configuration is loaded in this order (later sources override earlier):
    /// 1. Default values
    /// 2. TOML config file (if exists)
    /// 3. Environment variables (prefixed with `PAGEMILL_`, `__` between
    ///    section and key)
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load configuration with an optional custom config path.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration loading or parsing fails.
    pub fn load_from(config_path: Option<PathBuf>) -> Result<Self> {
        let config_file = config_path.unwrap_or_else(Self::default_config_path);

        let figment = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::file(&config_file))
            .merge(Env::prefixed("PAGEMILL_").split("__"));

        let config: Config = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default configuration file path.
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from(".config"))
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if any configuration values are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.content.extensions.is_empty() {
            return Err(Error::ConfigValidation {
                message: "content.extensions must not be empty".to_string(),
            });
        }

        for extension in &self.content.extensions {
            if extension.is_empty() || extension.contains('.') {
                return Err(Error::ConfigValidation {
                    message: format!("invalid extension: '{extension}'"),
                });
            }
        }

        Ok(())
    }

    /// Get the content root, resolving defaults if not set.
    #[must_use]
    pub fn content_root(&self) -> PathBuf {
        self.content
            .root
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_CONTENT_ROOT))
    }

    /// Get the front matter style used for new documents.
    #[must_use]
    pub fn matter_style(&self) -> MatterStyle {
        self.authoring.default_style
    }
}
