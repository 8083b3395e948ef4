use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::probe::ProbeConfig;
use super::server::ServerConfig;
use super::store::StoreConfig;
use super::upstream::UpstreamConfig;

const LOCAL_CONFIG_PATH: &str = "resilient-dns.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/resilient-dns/config.toml";

/// Main configuration structure for Resilient DNS
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listening socket and answer shaping
    #[serde(default)]
    pub server: ServerConfig,

    /// Fallback resolver
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Persistent address store
    #[serde(default)]
    pub store: StoreConfig,

    /// Reachability probing
    #[serde(default)]
    pub probe: ProbeConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. resilient-dns.toml in current directory
    /// 3. /etc/resilient-dns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(found) = Self::get_config_path() {
            Self::from_file(&found)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    pub fn from_toml(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        Self::from_toml(&contents)
    }

    pub fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(upstream) = overrides.upstream {
            self.upstream.server = upstream;
        }
        if let Some(path) = overrides.store_path {
            self.store.path = path;
        }
        if let Some(timeout) = overrides.probe_timeout_ms {
            self.probe.timeout_ms = timeout;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        if self.server.listen_addr().parse::<SocketAddr>().is_err() {
            return Err(ConfigError::Validation(format!(
                "Invalid bind address: {}",
                self.server.bind_address
            )));
        }

        if self.upstream.socket_addr().is_none() {
            return Err(ConfigError::Validation(format!(
                "Invalid upstream server: {}",
                self.upstream.server
            )));
        }

        if self.upstream.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Upstream timeout cannot be 0".to_string(),
            ));
        }

        if self.probe.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Probe timeout cannot be 0".to_string(),
            ));
        }

        if self.probe.total_ports() == 0 {
            return Err(ConfigError::Validation(
                "No probe ports configured".to_string(),
            ));
        }

        if self.store.path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "Store path cannot be empty".to_string(),
            ));
        }

        if self.store.max_values_per_key == Some(0) {
            return Err(ConfigError::Validation(
                "max_values_per_key must be at least 1".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        [LOCAL_CONFIG_PATH, SYSTEM_CONFIG_PATH]
            .into_iter()
            .find(|p| std::path::Path::new(p).exists())
            .map(str::to_string)
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub bind_address: Option<String>,
    pub dns_port: Option<u16>,
    pub upstream: Option<String>,
    pub store_path: Option<String>,
    pub probe_timeout_ms: Option<u64>,
    pub log_level: Option<String>,
}
