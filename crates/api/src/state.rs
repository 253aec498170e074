use doh_relay_infrastructure::DohRelay;
use std::sync::Arc;

/// Shared handler state: one immutable relay, built once at startup.
#[derive(Clone)]
pub struct AppState {
    pub relay: Arc<DohRelay>,
}
