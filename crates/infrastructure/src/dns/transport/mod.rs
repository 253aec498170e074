//! Transports carrying wire-format DNS messages to the upstream resolver.

use async_trait::async_trait;
use doh_relay_domain::RelayError;
use std::time::Duration;

mod udp;

pub use udp::UdpTransport;

/// A transport that performs one query/response exchange with a resolver.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    /// Send `message_bytes` and wait for the reply bytes, bounded by `timeout`.
    async fn send(&self, message_bytes: &[u8], timeout: Duration) -> Result<Vec<u8>, RelayError>;

    fn protocol_name(&self) -> &'static str;
}
