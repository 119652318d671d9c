//! Shell configuration, read from a RON file.
//!
//! Every field is optional in the file; missing ones take the defaults below.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use fider_core::SearchSettings;
use fider_engine::ClientSettings;
use fider_logging::shell_info;
use serde::{Deserialize, Serialize};

use super::logging::LogDestination;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    pub base_url: String,
    pub debounce_ms: u64,
    pub page_size: u32,
    pub page_step: u32,
    pub connect_timeout_ms: u64,
    pub request_timeout_ms: u64,
    pub max_response_bytes: u64,
    pub log_destination: LogDestination,
}

impl Default for ShellConfig {
    fn default() -> Self {
        let search = SearchSettings::default();
        let client = ClientSettings::default();
        Self {
            base_url: client.base_url,
            debounce_ms: search.debounce.as_millis() as u64,
            page_size: search.page_size,
            page_step: search.page_step,
            connect_timeout_ms: client.connect_timeout.as_millis() as u64,
            request_timeout_ms: client.request_timeout.as_millis() as u64,
            max_response_bytes: client.max_bytes,
            log_destination: LogDestination::Terminal,
        }
    }
}

impl ShellConfig {
    /// Loads `path`, or returns the defaults when no path is given or the file
    /// does not exist.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(err) => {
                return Err(err).with_context(|| format!("failed to read config {path:?}"));
            }
        };

        let config: Self = ron::from_str(&content)
            .with_context(|| format!("failed to parse config {path:?}"))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let pretty = ron::ser::PrettyConfig::new();
        let content =
            ron::ser::to_string_pretty(self, pretty).context("failed to serialize config")?;
        fs::write(path, content).with_context(|| format!("failed to write config {path:?}"))?;
        shell_info!("Wrote config to {:?}", path);
        Ok(())
    }

    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            debounce: Duration::from_millis(self.debounce_ms),
            page_size: self.page_size,
            page_step: self.page_step,
        }
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            base_url: self.base_url.clone(),
            connect_timeout: Duration::from_millis(self.connect_timeout_ms),
            request_timeout: Duration::from_millis(self.request_timeout_ms),
            max_bytes: self.max_response_bytes,
        }
    }

    fn validate(&self) -> Result<()> {
        anyhow::ensure!(self.page_size > 0, "page_size must be positive");
        anyhow::ensure!(self.page_step > 0, "page_step must be positive");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let config = ShellConfig::load(Some(temp.path().join("absent.ron").as_path())).unwrap();
        assert_eq!(config, ShellConfig::default());
        assert_eq!(ShellConfig::load(None).unwrap(), ShellConfig::default());
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("shell.ron");
        fs::write(&path, r#"(base_url: "https://feedback.example.com/", debounce_ms: 350)"#)
            .unwrap();

        let config = ShellConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.base_url, "https://feedback.example.com/");
        assert_eq!(config.search_settings().debounce, Duration::from_millis(350));
        assert_eq!(config.page_size, 30);
        assert_eq!(config.page_step, 10);
    }

    #[test]
    fn save_then_load_restores_config() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("shell.ron");
        let config = ShellConfig {
            page_step: 25,
            log_destination: LogDestination::Both,
            ..ShellConfig::default()
        };
        config.save(&path).unwrap();
        assert_eq!(ShellConfig::load(Some(path.as_path())).unwrap(), config);
    }

    #[test]
    fn malformed_or_invalid_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("shell.ron");
        fs::write(&path, "(base_url: ").unwrap();
        assert!(ShellConfig::load(Some(path.as_path())).is_err());

        fs::write(&path, "(page_size: 0)").unwrap();
        assert!(ShellConfig::load(Some(path.as_path())).is_err());
    }
}
