use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::{handlers, state::AppState};
use crate::services::health_router;

pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let body_limit = state.max_upload_bytes;
    let health = health_router(Arc::clone(&state.health));

    Router::new()
        // Page endpoints
        .route("/", get(handlers::index))
        .route("/predict/csv", post(handlers::predict_csv))
        .route("/predict/text", post(handlers::predict_text))
        // JSON API endpoints
        .route("/api/v1/predict", post(handlers::api_predict))
        .route("/api/v1/classes", get(handlers::api_classes))
        .with_state(state)
        // Health and metrics endpoints
        .merge(health)
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
