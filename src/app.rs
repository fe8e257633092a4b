use crate::handlers;
use crate::state::AppState;
use axum::{routing::{get, post}, Router};
use std::path::Path;
use tower_http::services::ServeDir;

pub fn router(state: AppState, public_dir: &Path) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        .route("/api/random-dog", get(handlers::random_dog))
        .route("/api/vote", post(handlers::vote))
        .route("/health", get(handlers::health))
        .fallback_service(ServeDir::new(public_dir))
        .with_state(state)
}
