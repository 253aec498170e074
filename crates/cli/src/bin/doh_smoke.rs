//! Smoke-test client for the DoH endpoint.
//!
//! Builds an A-record query, POSTs it as `application/dns-message`, and
//! prints the parsed response. Exits 0 on success, 1 on any failure.

use clap::Parser;
use doh_relay_infrastructure::dns::wire;
use hickory_proto::op::Message;
use std::process::ExitCode;
use std::time::Duration;

const DNS_MESSAGE_CONTENT_TYPE: &str = "application/dns-message";

#[derive(Parser)]
#[command(name = "doh-smoke")]
#[command(version)]
#[command(about = "Send one DoH query and print the response")]
struct Cli {
    /// Domain to query (A record)
    #[arg(default_value = "example.com")]
    domain: String,

    /// DoH endpoint URL
    #[arg(long, default_value = "http://127.0.0.1/dns-query")]
    url: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 5)]
    timeout: u64,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match test_doh(&cli.domain, &cli.url, Duration::from_secs(cli.timeout)).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("DoH test error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn test_doh(domain: &str, url: &str, timeout: Duration) -> anyhow::Result<()> {
    let (_, query_bytes) = wire::build_query(domain)?;

    let client = reqwest::Client::builder().timeout(timeout).build()?;

    let response = client
        .post(url)
        .header("Content-Type", DNS_MESSAGE_CONTENT_TYPE)
        .header("Accept", DNS_MESSAGE_CONTENT_TYPE)
        .body(query_bytes)
        .send()
        .await?;

    let status = response.status();
    if !status.is_success() {
        anyhow::bail!("endpoint returned HTTP {}", status.as_u16());
    }

    let body = response.bytes().await?;
    let message = Message::from_vec(&body)?;

    println!("DoH test successful for {}", domain);
    println!("Response: {}", wire::summarize(&message));
    Ok(())
}
