//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `autoviz.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

use autoviz_adapter_ha_rest::HaConfig;
use autoviz_app::render::RenderMode;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server settings.
    pub server: ServerConfig,
    /// Home Assistant connection settings.
    pub home_assistant: HomeAssistantConfig,
    /// Diagram rendering settings.
    pub render: RenderConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// HTTP listener configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to (e.g. `0.0.0.0`).
    pub host: String,
    /// TCP port.
    pub port: u16,
}

/// Home Assistant connection configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct HomeAssistantConfig {
    /// Primary host (IP or hostname).
    pub primary_host: String,
    /// Fallback host, probed when the primary is unreachable.
    pub fallback_host: Option<String>,
    /// Home Assistant API port.
    pub port: u16,
    /// Long-lived access token.
    pub token: String,
    /// Path to `automations.yaml`; when unset, only the REST fallback is
    /// available.
    pub automations_yaml: Option<PathBuf>,
}

/// Diagram rendering configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Markup flavor served to the dashboard.
    pub mode: RenderMode,
    /// Seconds between automatic refreshes.
    pub refresh_interval_secs: u64,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `autoviz.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if
    /// the resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("autoviz.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("HA_TOKEN") {
            self.home_assistant.token = val;
        }
        if let Ok(val) = std::env::var("HA_IP_PRIMARY") {
            self.home_assistant.primary_host = val;
        }
        if let Ok(val) = std::env::var("HA_IP_FALLBACK") {
            self.home_assistant.fallback_host = Some(val);
        }
        if let Ok(val) = std::env::var("HA_PORT") {
            if let Ok(port) = val.parse() {
                self.home_assistant.port = port;
            }
        }
        if let Ok(val) = std::env::var("AUTOMATIONS_YAML_PATH") {
            self.home_assistant.automations_yaml = Some(PathBuf::from(val));
        }
        if let Ok(val) = std::env::var("AUTOVIZ_PORT") {
            if let Ok(port) = val.parse() {
                self.server.port = port;
            }
        }
        if let Ok(val) = std::env::var("AUTOVIZ_BIND") {
            if let Some((host, port)) = val.rsplit_once(':') {
                self.server.host = host.to_string();
                if let Ok(port) = port.parse() {
                    self.server.port = port;
                }
            }
        }
        if let Ok(val) = std::env::var("DEBUG") {
            if matches!(val.as_str(), "1" | "true" | "True") {
                self.logging.filter = "debug".to_string();
            }
        }
        if let Ok(val) = std::env::var("AUTOVIZ_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Validation("port must be non-zero".to_string()));
        }
        if self.render.refresh_interval_secs == 0 {
            return Err(ConfigError::Validation(
                "refresh interval must be non-zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Return the `host:port` bind address.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Interval between automatic refreshes.
    #[must_use]
    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.render.refresh_interval_secs)
    }

    /// Build the Home Assistant adapter configuration.
    #[must_use]
    pub fn ha_config(&self) -> HaConfig {
        let mut hosts = vec![self.home_assistant.primary_host.clone()];
        if let Some(fallback) = &self.home_assistant.fallback_host {
            hosts.push(fallback.clone());
        }
        HaConfig {
            hosts,
            port: self.home_assistant.port,
            token: self.home_assistant.token.clone(),
            automations_yaml: self.home_assistant.automations_yaml.clone(),
            ..HaConfig::default()
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5001,
        }
    }
}

impl Default for HomeAssistantConfig {
    fn default() -> Self {
        Self {
            primary_host: "homeassistant.local".to_string(),
            fallback_host: None,
            port: 8123,
            token: String::new(),
            automations_yaml: None,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mode: RenderMode::default(),
            refresh_interval_secs: 30,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "autovizd=info,autoviz=info,tower_http=debug".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_produce_sensible_defaults() {
        let config = Config::default();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 5001);
        assert_eq!(config.home_assistant.port, 8123);
        assert!(config.home_assistant.token.is_empty());
        assert_eq!(config.render.refresh_interval_secs, 30);
    }

    #[test]
    fn should_parse_minimal_toml() {
        let toml = "";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.port, 5001);
    }

    #[test]
    fn should_parse_full_toml() {
        let toml = "
            [server]
            host = '127.0.0.1'
            port = 9090

            [home_assistant]
            primary_host = '192.168.1.221'
            fallback_host = '192.168.1.225'
            port = 8124
            token = 'secret'
            automations_yaml = '/config/automations.yaml'

            [render]
            mode = 'flowchart'
            refresh_interval_secs = 10

            [logging]
            filter = 'debug'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 9090);
        assert_eq!(config.home_assistant.primary_host, "192.168.1.221");
        assert_eq!(
            config.home_assistant.fallback_host.as_deref(),
            Some("192.168.1.225")
        );
        assert_eq!(config.home_assistant.port, 8124);
        assert_eq!(config.home_assistant.token, "secret");
        assert_eq!(config.render.refresh_interval_secs, 10);
        assert_eq!(config.logging.filter, "debug");
    }

    #[test]
    fn should_parse_partial_toml_with_defaults() {
        let toml = "
            [home_assistant]
            token = 'secret'
        ";
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.home_assistant.token, "secret");
        assert_eq!(config.server.port, 5001);
        assert_eq!(config.render.refresh_interval_secs, 30);
    }

    #[test]
    fn should_return_default_when_file_not_found() {
        let config = Config::from_file("nonexistent.toml").unwrap();
        assert_eq!(config.server.port, 5001);
    }

    #[test]
    fn should_reject_zero_port() {
        let mut config = Config::default();
        config.server.port = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_reject_zero_refresh_interval() {
        let mut config = Config::default();
        config.render.refresh_interval_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn should_accept_defaults_as_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn should_format_bind_addr() {
        let mut config = Config::default();
        config.server.host = "127.0.0.1".to_string();
        config.server.port = 9090;
        assert_eq!(config.bind_addr(), "127.0.0.1:9090");
    }

    #[test]
    fn should_order_hosts_primary_first() {
        let mut config = Config::default();
        config.home_assistant.primary_host = "192.168.1.221".to_string();
        config.home_assistant.fallback_host = Some("192.168.1.225".to_string());
        let ha = config.ha_config();
        assert_eq!(ha.hosts, vec!["192.168.1.221", "192.168.1.225"]);
    }

    #[test]
    fn should_omit_fallback_host_when_unset() {
        let config = Config::default();
        let ha = config.ha_config();
        assert_eq!(ha.hosts, vec!["homeassistant.local"]);
    }

    #[test]
    fn should_report_parse_error_for_invalid_toml() {
        let result: Result<Config, _> = toml::from_str("invalid {{{");
        assert!(result.is_err());
    }
}
