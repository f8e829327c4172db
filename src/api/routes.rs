use super::{handlers, ApiState};
use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

pub fn create_router(state: ApiState) -> Router {
    Router::new()
        // Dashboard page
        .route("/", get(handlers::dashboard_page))
        // Metrics routes
        .route("/api/metrics", get(handlers::get_metrics))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
