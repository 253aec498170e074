//! The decode → forward → encode relay pipeline.
//!
//! One `DohRelay` is built at startup from static configuration and shared
//! immutably across requests; it holds no mutable state, so concurrent
//! invocations need no coordination.

use super::transport::{DnsTransport, UdpTransport};
use super::wire;
use doh_relay_domain::RelayError;
use std::net::SocketAddr;
use std::time::Duration;
use tracing::debug;

pub struct DohRelay {
    transport: UdpTransport,
    upstream: SocketAddr,
    timeout: Duration,
}

impl DohRelay {
    pub fn new(upstream: SocketAddr, timeout: Duration) -> Self {
        Self {
            transport: UdpTransport::new(upstream),
            upstream,
            timeout,
        }
    }

    pub fn upstream(&self) -> SocketAddr {
        self.upstream
    }

    /// Relay one DNS query: parse the HTTP body as a wire-format message,
    /// perform a bounded UDP exchange with the upstream resolver, and return
    /// the re-encoded reply bytes.
    ///
    /// The query is re-serialized from the parse result rather than forwarded
    /// verbatim, so only well-formed bytes ever reach the resolver.
    pub async fn relay(&self, body: &[u8]) -> Result<Vec<u8>, RelayError> {
        let query = wire::decode_query(body)?;

        debug!(
            id = query.id(),
            upstream = %self.upstream,
            "Relaying DNS query"
        );

        let query_bytes =
            wire::encode(&query).map_err(|e| RelayError::MalformedQuery(e.to_string()))?;

        let reply_bytes = self.transport.send(&query_bytes, self.timeout).await?;

        let reply = wire::decode_reply(&reply_bytes)?;

        debug!(
            id = reply.id(),
            rcode = ?reply.response_code(),
            answers = reply.answer_count(),
            "Upstream reply received"
        );

        wire::encode(&reply).map_err(|e| RelayError::MalformedUpstreamReply(e.to_string()))
    }
}
