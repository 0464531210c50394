pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/analyse", post(handlers::handle_analyse))
        .route(
            "/api/v1/analyse/upload",
            post(handlers::handle_analyse_upload),
        )
        .route("/api/v1/categories", get(handlers::handle_categories))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
