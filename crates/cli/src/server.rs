use doh_relay_api::{create_routes, AppState};
use std::net::SocketAddr;
use tracing::info;

pub async fn start_web_server(bind_addr: SocketAddr, state: AppState) -> anyhow::Result<()> {
    info!(
        bind_address = %bind_addr,
        endpoint = format!("http://{}/dns-query", bind_addr),
        "Starting DoH endpoint"
    );

    let app = create_routes(state);
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;

    info!("DoH endpoint started successfully");

    axum::serve(listener, app).await?;

    Ok(())
}
