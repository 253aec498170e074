//! UDP transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is (no framing). One socket is bound per call and
//! dropped when the exchange completes; the relay does no pooling.

use super::DnsTransport;
use async_trait::async_trait;
use doh_relay_domain::RelayError;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::{debug, warn};

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// DNS over UDP transport
pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    fn timeout_error(&self, timeout: Duration) -> RelayError {
        RelayError::UpstreamTimeout {
            server: self.server_addr.to_string(),
            timeout_ms: timeout.as_millis() as u64,
        }
    }

    fn unreachable_error(&self, detail: impl ToString) -> RelayError {
        RelayError::UpstreamUnreachable {
            server: self.server_addr.to_string(),
            detail: detail.to_string(),
        }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(&self, message_bytes: &[u8], timeout: Duration) -> Result<Vec<u8>, RelayError> {
        // Bind to ephemeral port (0 = OS assigns)
        let bind_addr: SocketAddr = if self.server_addr.is_ipv4() {
            ([0, 0, 0, 0], 0).into()
        } else {
            (std::net::Ipv6Addr::UNSPECIFIED, 0).into()
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| self.unreachable_error(format!("failed to bind UDP socket: {}", e)))?;

        let bytes_sent =
            tokio::time::timeout(timeout, socket.send_to(message_bytes, self.server_addr))
                .await
                .map_err(|_| self.timeout_error(timeout))?
                .map_err(|e| self.unreachable_error(format!("send failed: {}", e)))?;

        debug!(
            server = %self.server_addr,
            bytes_sent = bytes_sent,
            "UDP query sent"
        );

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        let (bytes_received, from_addr) =
            tokio::time::timeout(timeout, socket.recv_from(&mut recv_buf))
                .await
                .map_err(|_| self.timeout_error(timeout))?
                .map_err(|e| self.unreachable_error(format!("receive failed: {}", e)))?;

        // Flag responses that did not come from the configured resolver
        if from_addr.ip() != self.server_addr.ip() {
            warn!(
                expected = %self.server_addr,
                received_from = %from_addr,
                "UDP response from unexpected source"
            );
        }

        recv_buf.truncate(bytes_received);

        debug!(
            server = %self.server_addr,
            bytes_received = bytes_received,
            "UDP response received"
        );

        Ok(recv_buf)
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}
