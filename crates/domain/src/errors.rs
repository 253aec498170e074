use thiserror::Error;

/// Failure kinds of the relay pipeline.
///
/// Every variant collapses to the same uniform HTTP 500 at the endpoint
/// boundary; the distinction exists for operator logs only.
#[derive(Error, Debug, Clone)]
pub enum RelayError {
    #[error("Malformed DNS query: {0}")]
    MalformedQuery(String),

    #[error("Upstream resolver {server} did not respond within {timeout_ms}ms")]
    UpstreamTimeout { server: String, timeout_ms: u64 },

    #[error("Upstream resolver {server} unreachable: {detail}")]
    UpstreamUnreachable { server: String, detail: String },

    #[error("Malformed upstream reply: {0}")]
    MalformedUpstreamReply(String),
}
