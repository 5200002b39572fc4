pub mod handlers;

use crate::app_state::AppState;
use axum::routing::{get, post};
use axum::Router;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/p3/predict", post(handlers::predict))
        .route("/api/p3/history", get(handlers::history))
        .route("/api/p3/dataset/:id", get(handlers::get_dataset))
        .route("/api/p3/prediction/:id", get(handlers::get_prediction))
        .with_state(state)
}
