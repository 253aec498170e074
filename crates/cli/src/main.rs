use clap::Parser;
use doh_relay_api::AppState;
use doh_relay_domain::CliOverrides;
use doh_relay_infrastructure::DohRelay;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::info;

mod bootstrap;
mod server;

#[derive(Parser)]
#[command(name = "doh-relay")]
#[command(version)]
#[command(about = "DNS-over-HTTPS relay - forwards DoH queries to a UDP resolver")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// HTTP listen port
    #[arg(short = 'p', long)]
    port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Upstream resolver host (IP or hostname)
    #[arg(short = 'u', long)]
    upstream: Option<String>,

    /// Upstream resolver UDP port
    #[arg(long)]
    upstream_port: Option<u16>,

    /// Per-query timeout in seconds
    #[arg(short = 't', long)]
    timeout: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        http_port: cli.port,
        bind_address: cli.bind.clone(),
        upstream_host: cli.upstream.clone(),
        upstream_port: cli.upstream_port,
        timeout_secs: cli.timeout,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting doh-relay v{}", env!("CARGO_PKG_VERSION"));

    // The upstream is static for the process lifetime, so hostnames are
    // resolved once here rather than per request.
    let upstream_addr = bootstrap::resolve_upstream(&config.upstream).await?;

    info!(
        upstream = %upstream_addr,
        timeout_secs = config.upstream.timeout_secs,
        "Upstream resolver configured"
    );

    let relay = Arc::new(DohRelay::new(upstream_addr, config.upstream.timeout()));
    let state = AppState { relay };

    let bind_addr: SocketAddr =
        format!("{}:{}", config.server.bind_address, config.server.http_port).parse()?;

    server::start_web_server(bind_addr, state).await?;

    info!("Server shutdown complete");
    Ok(())
}
