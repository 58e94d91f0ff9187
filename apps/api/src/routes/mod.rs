pub mod health;
pub mod usage;

use axum::{
    routing::{get, post},
    Router,
};

use crate::matching::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/match-fields", post(handlers::handle_match_fields))
        .route("/api/usage", get(usage::usage_handler))
        .with_state(state)
}
