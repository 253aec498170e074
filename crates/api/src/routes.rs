use crate::handlers;
use crate::state::AppState;
use axum::{routing::post, Router};

pub fn create_routes(state: AppState) -> Router {
    Router::new()
        .route("/dns-query", post(handlers::dns_query))
        .with_state(state)
}
