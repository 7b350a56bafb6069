use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

const API_URL_ENV: &str = "SYNCO_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncoConfig {
    /// Base URL of the tasks API, e.g. "http://127.0.0.1:8000/api/"
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Default log filter, overridden by `SYNCO_LOG`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_url() -> String {
    "http://127.0.0.1:8000/api/".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for SyncoConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            log_level: default_log_level(),
        }
    }
}

impl SyncoConfig {
    /// Directory holding config, session and log files.
    pub fn root_dir() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("synco"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::root_dir()?.join("config.toml"))
    }

    /// Load config from disk, then apply environment overrides.
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        let config = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config at {}", path.display()))?;
            Self::parse(&raw)
                .with_context(|| format!("Failed to parse config at {}", path.display()))?
        } else {
            Self::default()
        };

        Ok(config.with_env_overrides(std::env::var(API_URL_ENV).ok()))
    }

    fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    fn with_env_overrides(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.api_url = url;
        }
        self
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let raw = toml::to_string_pretty(self)?;
        std::fs::write(&path, raw)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let config = SyncoConfig::parse("").unwrap();
        assert_eq!(config, SyncoConfig::default());

        let config = SyncoConfig::parse(r#"api_url = "https://tasks.example.com/api/""#).unwrap();
        assert_eq!(config.api_url, "https://tasks.example.com/api/");
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn env_override_wins_unless_blank() {
        let config = SyncoConfig::default().with_env_overrides(Some("http://other/api".into()));
        assert_eq!(config.api_url, "http://other/api");

        let config = SyncoConfig::default().with_env_overrides(Some("  ".into()));
        assert_eq!(config.api_url, default_api_url());
    }
}
