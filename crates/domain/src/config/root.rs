use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::server::ServerConfig;
use super::upstream::UpstreamConfig;

/// Main configuration structure for the DoH relay
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// HTTP listener configuration (port, bind address)
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream UDP resolver configuration
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. doh-relay.toml in current directory
    /// 3. /etc/doh-relay/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if std::path::Path::new("doh-relay.toml").exists() {
            Self::from_file("doh-relay.toml")?
        } else if std::path::Path::new("/etc/doh-relay/config.toml").exists() {
            Self::from_file("/etc/doh-relay/config.toml")?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.http_port {
            self.server.http_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(host) = overrides.upstream_host {
            self.upstream.host = host;
        }
        if let Some(port) = overrides.upstream_port {
            self.upstream.port = port;
        }
        if let Some(secs) = overrides.timeout_secs {
            self.upstream.timeout_secs = secs;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.http_port == 0 {
            return Err(ConfigError::Validation(
                "HTTP port cannot be 0".to_string(),
            ));
        }

        if self.upstream.host.is_empty() {
            return Err(ConfigError::Validation(
                "Upstream host cannot be empty".to_string(),
            ));
        }

        if self.upstream.port == 0 {
            return Err(ConfigError::Validation(
                "Upstream port cannot be 0".to_string(),
            ));
        }

        if self.upstream.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "Query timeout cannot be 0".to_string(),
            ));
        }

        Ok(())
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub http_port: Option<u16>,
    pub bind_address: Option<String>,
    pub upstream_host: Option<String>,
    pub upstream_port: Option<u16>,
    pub timeout_secs: Option<u64>,
    pub log_level: Option<String>,
}
