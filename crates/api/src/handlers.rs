//! The DoH endpoint handler (RFC 8484, POST wireformat only).

use crate::state::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use tracing::error;

/// Content type for DNS-over-HTTPS bodies (RFC 8484 §4.2.1)
const DNS_MESSAGE_CONTENT_TYPE: &str = "application/dns-message";

/// `POST /dns-query` — body is a wire-format DNS query.
///
/// On success: 200 with the wire-format reply and `application/dns-message`.
/// On any failure: 500 with an empty body. The failure detail is logged but
/// never exposed to the client, so resolver topology stays internal.
pub async fn dns_query(State(state): State<AppState>, body: Bytes) -> Response {
    match state.relay.relay(&body).await {
        Ok(reply_bytes) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, DNS_MESSAGE_CONTENT_TYPE)],
            reply_bytes,
        )
            .into_response(),
        Err(e) => {
            error!(error = %e, upstream = %state.relay.upstream(), "DoH relay failed");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
