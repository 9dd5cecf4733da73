//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/reportscope/config.toml`
//!
//! This module follows the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/reportscope/` (~/.config/reportscope/)
//! - State/Logs: `$XDG_STATE_HOME/reportscope/` (~/.local/state/reportscope/)

use std::path::PathBuf;

use serde::Deserialize;

use crate::error::{Error, Result};

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default, Clone)]
pub struct Config {
    /// Index document location and fetch behavior
    #[serde(default)]
    pub index: IndexConfig,

    /// Where report content is addressed from
    #[serde(default)]
    pub origin: ContentOrigin,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Index fetch configuration
#[derive(Debug, Deserialize, Clone)]
pub struct IndexConfig {
    /// URL of the index JSON document
    #[serde(default = "default_index_url")]
    pub url: String,

    /// HTTP request timeout in seconds
    #[serde(default = "default_fetch_timeout")]
    pub timeout_secs: u64,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            url: default_index_url(),
            timeout_secs: default_fetch_timeout(),
        }
    }
}

fn default_index_url() -> String {
    "reports.json".to_string()
}

fn default_fetch_timeout() -> u64 {
    30
}

/// How a selected report is resolved to a location.
///
/// Two modes, chosen at startup rather than at build time: a local static
/// path (demo/dev) or a remote bucket-style base URL (production).
#[derive(Debug, Deserialize, Clone)]
pub struct ContentOrigin {
    /// Resolution mode
    #[serde(default)]
    pub mode: OriginMode,

    /// Base URL for remote mode (e.g. `https://reports.example.com`)
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Base path for local mode
    #[serde(default = "default_local_path")]
    pub local_path: String,
}

/// Content resolution strategy
#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OriginMode {
    /// Resolve under a local static path
    Local,
    /// Resolve under a remote bucket URL
    #[default]
    Remote,
}

impl Default for ContentOrigin {
    fn default() -> Self {
        Self {
            mode: OriginMode::default(),
            base_url: default_base_url(),
            local_path: default_local_path(),
        }
    }
}

fn default_base_url() -> String {
    "https://reports.example.com".to_string()
}

fn default_local_path() -> String {
    "demo-reports".to_string()
}

impl ContentOrigin {
    /// The base under which report content is addressed.
    pub fn base(&self) -> &str {
        match self.mode {
            OriginMode::Local => &self.local_path,
            OriginMode::Remote => &self.base_url,
        }
    }

    /// Join project, date, and report as successive path segments under the
    /// base. Remote locations are URLs, so segments are percent-encoded;
    /// local paths are passed through untouched.
    pub fn resolve(&self, project: &str, date: &str, report: &str) -> String {
        let base = self.base().trim_end_matches('/');
        match self.mode {
            OriginMode::Local => format!("{}/{}/{}/{}", base, project, date, report),
            OriginMode::Remote => format!(
                "{}/{}/{}/{}",
                base,
                urlencoding::encode(project),
                urlencoding::encode(date),
                urlencoding::encode(report)
            ),
        }
    }

    /// Validate configuration, returning an error message if unusable
    pub fn validate(&self) -> Result<()> {
        match self.mode {
            OriginMode::Remote if self.base_url.trim().is_empty() => Err(Error::Config(
                "origin.base_url is required in remote mode".to_string(),
            )),
            OriginMode::Local if self.local_path.trim().is_empty() => Err(Error::Config(
                "origin.local_path is required in local mode".to_string(),
            )),
            _ => Ok(()),
        }
    }
}

/// Logging configuration
#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.origin.validate()?;

        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/reportscope/config.toml` (~/.config/reportscope/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("reportscope").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/reportscope/` (~/.local/state/reportscope/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("reportscope")
    }

    /// Returns the log file path
    ///
    /// `$XDG_STATE_HOME/reportscope/reportscope.log`
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("reportscope.log")
    }
}
