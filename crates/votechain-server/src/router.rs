use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

use crate::handler;
use crate::state::AppState;

/// Build the axum router with all VoteChain endpoints.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/health", get(handler::health_handler))
        .route("/v1/info", get(handler::info_handler))
        .route("/v1/candidates", get(handler::candidates_handler))
        .route("/v1/login", post(handler::login_handler))
        .route("/v1/votes", post(handler::submit_vote_handler))
        .route("/v1/chain", get(handler::chain_handler))
        .route("/v1/chain/validity", get(handler::validity_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
