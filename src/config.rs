use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::constants::{DEFAULT_LOG_FILE, DEFAULT_SERVER_URL, DEFAULT_TEMPERATURE};

const CONFIG_DIR: &str = ".pdfqa";
const CONFIG_FILE: &str = "config.yaml";

/// User settings, read from `~/.pdfqa/config.yaml`
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the Q&A server, without the `/api/...` suffix
    pub server_url: String,
    /// Initial slider position
    pub default_temperature: f64,
    /// Per-request timeout; `None` waits forever
    pub request_timeout_secs: Option<u64>,
    pub log_file: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            server_url: String::from(DEFAULT_SERVER_URL),
            default_temperature: DEFAULT_TEMPERATURE,
            request_timeout_secs: None,
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl Settings {
    /// Default location of the settings file
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(CONFIG_DIR)
            .join(CONFIG_FILE)
    }

    /// Load settings from `path`. A missing file yields defaults; a malformed one is an error.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("reading settings from {}", path.display()))?;
        if content.trim().is_empty() {
            return Ok(Settings::default());
        }

        serde_yaml::from_str(&content)
            .with_context(|| format!("parsing settings in {}", path.display()))
    }

    /// Server URL with any trailing slash removed
    pub fn base_url(&self) -> &str {
        self.server_url.trim_end_matches('/')
    }
}
