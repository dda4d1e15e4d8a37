use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use crate::config::Settings;

#[derive(Debug, Parser, Clone)]
#[command(
    name = "pdfqa-tui",
    version,
    about = "Terminal client for a PDF question-answering server"
)]
pub struct Cli {
    /// Base URL of the Q&A server (overrides the settings file)
    #[arg(long)]
    pub server: Option<String>,

    /// Initial temperature, 0.0 to 1.0
    #[arg(long)]
    pub temperature: Option<f64>,

    /// Request timeout in seconds (default: wait indefinitely)
    #[arg(long)]
    pub timeout: Option<u64>,

    /// Settings file (default: ~/.pdfqa/config.yaml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log file path
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Load the settings file and apply command-line overrides on top
    pub fn resolve_settings(&self) -> Result<Settings> {
        let path = self.config.clone().unwrap_or_else(Settings::default_path);
        let settings = Settings::load_from(&path)?;
        Ok(self.apply(settings))
    }

    fn apply(&self, mut settings: Settings) -> Settings {
        if let Some(server) = &self.server {
            settings.server_url = server.clone();
        }
        if let Some(temperature) = self.temperature {
            settings.default_temperature = temperature;
        }
        if let Some(timeout) = self.timeout {
            settings.request_timeout_secs = Some(timeout);
        }
        if let Some(log_file) = &self.log_file {
            settings.log_file = log_file.clone();
        }
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn flags_override_file_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "server_url: http://from-file:5000\ndefault_temperature: 0.4\n").unwrap();

        let cli = Cli::parse_from([
            "pdfqa-tui",
            "--config",
            path.to_str().unwrap(),
            "--server",
            "http://from-flag:9000",
        ]);
        let settings = cli.resolve_settings().unwrap();

        assert_eq!(settings.server_url, "http://from-flag:9000");
        assert_eq!(settings.default_temperature, 0.4);
        assert_eq!(settings.request_timeout_secs, None);
    }

    #[test]
    fn no_flags_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::parse_from([
            "pdfqa-tui",
            "--config",
            dir.path().join("none.yaml").to_str().unwrap(),
            "--timeout",
            "30",
        ]);
        let settings = cli.resolve_settings().unwrap();

        assert_eq!(settings.server_url, crate::constants::DEFAULT_SERVER_URL);
        assert_eq!(settings.request_timeout_secs, Some(30));
    }
}
