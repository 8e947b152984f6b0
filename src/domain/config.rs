//! # Configuration
//!
//! Manages the loading and parsing of the application's configuration file (`config.yaml`).
//! Defines the structs for the Matrix login, the list store and the command prefix.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Main application configuration structure.
/// Matches the layout of `data/config.yaml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub services: ServicesConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub bot: BotConfig,
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        config.store.validate()?;
        Ok(config)
    }
}

/// Configuration for various connected services.
#[derive(Debug, Deserialize, Clone)]
pub struct ServicesConfig {
    pub matrix: MatrixConfig,
}

/// Specific configuration for the Matrix service.
#[derive(Debug, Deserialize, Clone)]
pub struct MatrixConfig {
    pub username: String,
    pub password: String,
    pub homeserver: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    Memory,
    #[default]
    File,
    Redis,
}

/// Where lists live and how long each call may take.
#[derive(Debug, Deserialize, Clone)]
pub struct StoreConfig {
    #[serde(default)]
    pub backend: StoreBackend,
    #[serde(default = "default_store_path")]
    pub path: String,
    #[serde(default = "default_redis_url")]
    pub url: String,
    #[serde(default = "default_key_prefix")]
    pub key_prefix: String,
    #[serde(default = "default_query_timeout")]
    pub query_timeout_secs: u64,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    #[serde(default = "default_ping_interval")]
    pub ping_interval_secs: u64,
    #[serde(default = "default_ping_timeout")]
    pub ping_timeout_secs: u64,
}

impl StoreConfig {
    /// Zero timeouts would fail every call, and a zero ping interval cannot drive a timer.
    pub fn validate(&self) -> Result<()> {
        for (name, secs) in [
            ("query_timeout_secs", self.query_timeout_secs),
            ("connect_timeout_secs", self.connect_timeout_secs),
            ("ping_interval_secs", self.ping_interval_secs),
            ("ping_timeout_secs", self.ping_timeout_secs),
        ] {
            if secs == 0 {
                anyhow::bail!("store.{name} must be at least 1");
            }
        }
        Ok(())
    }

    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn ping_interval(&self) -> Duration {
        Duration::from_secs(self.ping_interval_secs)
    }

    pub fn ping_timeout(&self) -> Duration {
        Duration::from_secs(self.ping_timeout_secs)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            path: default_store_path(),
            url: default_redis_url(),
            key_prefix: default_key_prefix(),
            query_timeout_secs: default_query_timeout(),
            connect_timeout_secs: default_connect_timeout(),
            ping_interval_secs: default_ping_interval(),
            ping_timeout_secs: default_ping_timeout(),
        }
    }
}

fn default_store_path() -> String {
    "data/lists.json".to_string()
}
fn default_redis_url() -> String {
    "redis://127.0.0.1/".to_string()
}
fn default_key_prefix() -> String {
    "listbot".to_string()
}
fn default_query_timeout() -> u64 {
    5
}
fn default_connect_timeout() -> u64 {
    10
}
fn default_ping_interval() -> u64 {
    20
}
fn default_ping_timeout() -> u64 {
    2
}

/// Command parsing settings.
#[derive(Debug, Deserialize, Clone)]
pub struct BotConfig {
    #[serde(default = "default_prefix")]
    pub prefix: char,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
        }
    }
}

fn default_prefix() -> char {
    '~'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = AppConfig::parse(
            "services:\n  matrix:\n    username: bot\n    password: pw\n    homeserver: https://example.org\n",
        )
        .unwrap();

        assert_eq!(config.store.backend, StoreBackend::File);
        assert_eq!(config.store.path, "data/lists.json");
        assert_eq!(config.store.query_timeout(), Duration::from_secs(5));
        assert_eq!(config.store.ping_interval(), Duration::from_secs(20));
        assert_eq!(config.store.ping_timeout(), Duration::from_secs(2));
        assert_eq!(config.bot.prefix, '~');
        assert!(config.services.matrix.display_name.is_none());
    }

    #[test]
    fn test_store_section_overrides() {
        let config = AppConfig::parse(concat!(
            "services:\n",
            "  matrix:\n",
            "    username: bot\n",
            "    password: pw\n",
            "    homeserver: https://example.org\n",
            "store:\n",
            "  backend: redis\n",
            "  url: redis://cache:6379/2\n",
            "  query_timeout_secs: 1\n",
            "bot:\n",
            "  prefix: \"!\"\n",
        ))
        .unwrap();

        assert_eq!(config.store.backend, StoreBackend::Redis);
        assert_eq!(config.store.url, "redis://cache:6379/2");
        assert_eq!(config.store.query_timeout(), Duration::from_secs(1));
        assert_eq!(config.store.key_prefix, "listbot");
        assert_eq!(config.bot.prefix, '!');
    }

    #[test]
    fn test_missing_matrix_section_fails() {
        assert!(AppConfig::parse("store:\n  backend: memory\n").is_err());
    }

    #[test]
    fn test_zero_durations_are_rejected() {
        let base = "services:\n  matrix:\n    username: bot\n    password: pw\n    homeserver: https://example.org\nstore:\n";
        for field in [
            "query_timeout_secs",
            "connect_timeout_secs",
            "ping_interval_secs",
            "ping_timeout_secs",
        ] {
            let err = AppConfig::parse(&format!("{base}  {field}: 0\n")).unwrap_err();
            assert!(err.to_string().contains(field), "{err}");
        }
    }
}
