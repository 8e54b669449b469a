use axum::{
    routing::{get, post},
    Router,
};

use super::{health, predict, AppState};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .route("/schema", get(predict::get_schema))
        .route("/predict/single", post(predict::predict_single))
        .route("/predict/summed", post(predict::predict_summed))
        .route("/predict/comparative", post(predict::predict_comparative))
        .with_state(state)
}
