//! Configuration loading.
//!
//! Loads configuration from `${WREN_HOME}/config.toml` with sensible defaults.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

pub mod paths {
    //! Path resolution for wren configuration and data directories.
    //!
    //! WREN_HOME resolution order:
    //! 1. WREN_HOME environment variable (if set)
    //! 2. ~/.config/wren (default)

    use std::path::PathBuf;

    /// Returns the wren home directory.
    ///
    /// Checks WREN_HOME env var first, falls back to ~/.config/wren
    pub fn wren_home() -> PathBuf {
        if let Ok(home) = std::env::var("WREN_HOME") {
            return PathBuf::from(home);
        }

        dirs::home_dir()
            .map(|h| h.join(".config").join("wren"))
            .expect("Could not determine home directory")
    }

    /// Returns the path to the config.toml file.
    pub fn config_path() -> PathBuf {
        wren_home().join("config.toml")
    }

    /// Returns the path to the credentials file (the single token slot).
    pub fn credentials_path() -> PathBuf {
        wren_home().join("credentials.json")
    }

    /// Returns the directory for log files.
    pub fn logs_dir() -> PathBuf {
        wren_home().join("logs")
    }
}

/// Default config file contents, written by `wren config init`.
const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Wren Configuration
# Terminal client for a Y microblog server.

# Base URL of the server.
base_url = "http://127.0.0.1:5000"

# Initial width of the right-hand side pane, in terminal columns.
# side_pane_width = 36
"#;

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Base URL of the Y server.
    pub base_url: String,

    /// Initial width of the side pane in terminal columns (optional).
    pub side_pane_width: Option<u16>,
}

impl Config {
    pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";

    /// Loads configuration from the default config path.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads configuration from a specific path.
    /// Returns defaults if the file doesn't exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {}", path.display()))?;
            toml::from_str(&contents)
                .with_context(|| format!("Failed to parse config from {}", path.display()))
        } else {
            Ok(Config::default())
        }
    }

    /// Returns the base URL with surrounding whitespace and trailing
    /// slashes stripped; falls back to the default when blank.
    pub fn effective_base_url(&self) -> &str {
        let trimmed = self.base_url.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            Self::DEFAULT_BASE_URL
        } else {
            trimmed
        }
    }

    /// Creates a default config file at the given path.
    /// Returns an error if the file already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {}", parent.display()))?;
        }

        fs::write(path, DEFAULT_CONFIG_TEMPLATE)
            .with_context(|| format!("Failed to write config to {}", path.display()))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: Self::DEFAULT_BASE_URL.to_string(),
            side_pane_width: None,
        }
    }
}
