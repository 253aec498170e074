pub mod config;
pub mod errors;

pub use config::{CliOverrides, Config, ConfigError, LoggingConfig, ServerConfig, UpstreamConfig};
pub use errors::RelayError;
