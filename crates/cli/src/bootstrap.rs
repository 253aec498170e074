use anyhow::Context;
use doh_relay_domain::{CliOverrides, Config, UpstreamConfig};
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

pub fn load_config(path: Option<&str>, overrides: CliOverrides) -> anyhow::Result<Config> {
    let config = Config::load(path, overrides)?;
    config.validate()?;
    Ok(config)
}

pub fn init_logging(config: &Config) {
    // RUST_LOG wins over the configured level when set
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

/// Resolve the configured upstream host to a socket address, once at startup.
pub async fn resolve_upstream(upstream: &UpstreamConfig) -> anyhow::Result<SocketAddr> {
    let target = format!("{}:{}", upstream.host, upstream.port);

    let addr = tokio::net::lookup_host(&target)
        .await
        .with_context(|| format!("failed to resolve upstream resolver '{}'", target))?
        .next()
        .with_context(|| format!("upstream resolver '{}' has no addresses", target));
    addr
}
