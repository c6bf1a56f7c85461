use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const API_URL_ENV: &str = "GLOBETROTTER_API_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TripConfig {
    /// Base URL of the REST API including the `/api` prefix, e.g. "http://localhost:8000/api"
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Origin used when building share links, e.g. "http://localhost:5173"
    #[serde(default = "default_share_base_url")]
    pub share_base_url: String,
    /// `tracing` filter directive for the log file
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_api_url() -> String {
    "http://localhost:8000/api".to_string()
}

fn default_share_base_url() -> String {
    "http://localhost:5173".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for TripConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            share_base_url: default_share_base_url(),
            log_level: default_log_level(),
        }
    }
}

impl TripConfig {
    pub fn root_dir() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("Cannot determine config directory")?
            .join("globetrotter-tui"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::root_dir()?.join("config.toml"))
    }

    /// Load config from disk, then apply `.env` and environment overrides.
    /// Returns default config if the file doesn't exist.
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        let path = Self::config_path()?;
        let config = if path.exists() {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config at {}", path.display()))?;
            Self::parse(&raw)
                .with_context(|| format!("Failed to parse config at {}", path.display()))?
        } else {
            Self::default()
        };
        Ok(config.with_api_url_override(std::env::var(API_URL_ENV).ok()))
    }

    pub fn parse(raw: &str) -> Result<Self> {
        Ok(toml::from_str(raw)?)
    }

    pub fn with_api_url_override(mut self, api_url: Option<String>) -> Self {
        if let Some(url) = api_url.filter(|u| !u.trim().is_empty()) {
            self.api_url = url.trim().to_string();
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
    fn partial_file_keeps_defaults() {
        let cfg = TripConfig::parse(r#"api_url = "https://trips.example.com/api""#).unwrap();
        assert_eq!(cfg.api_url, "https://trips.example.com/api");
        assert_eq!(cfg.share_base_url, "http://localhost:5173");
        assert_eq!(cfg.log_level, "info");
    }

    #[test]
    fn env_override_wins_unless_blank() {
        let cfg = TripConfig::default().with_api_url_override(Some("http://10.0.0.2/api".into()));
        assert_eq!(cfg.api_url, "http://10.0.0.2/api");

        let cfg = TripConfig::default().with_api_url_override(Some("  ".into()));
        assert_eq!(cfg.api_url, "http://localhost:8000/api");
    }

    #[test]
    fn serialized_defaults_round_trip() {
        let raw = toml::to_string_pretty(&TripConfig::default()).unwrap();
        assert_eq!(TripConfig::parse(&raw).unwrap(), TripConfig::default());
    }
}
