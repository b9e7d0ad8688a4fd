//! Route Configuration
//!
//! Configures all HTTP routes for the API.

use axum::{
    response::IntoResponse,
    routing::{get, patch},
    Router,
};

use super::handlers;
use crate::infrastructure::metrics;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/api/v1", api_routes())
        // Health check endpoints
        .route("/health", get(handlers::health::health_check))
        .route("/health/live", get(handlers::health::liveness))
        .route("/health/ready", get(handlers::health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> impl IntoResponse {
    let metrics = metrics::gather_metrics();
    (
        [(
            axum::http::header::CONTENT_TYPE,
            "text/plain; version=0.0.4; charset=utf-8",
        )],
        metrics,
    )
}

/// API v1 routes
fn api_routes() -> Router<AppState> {
    Router::new().nest("/branches", branch_routes())
}

/// Branch routes
fn branch_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(handlers::branch::list_branches).post(handlers::branch::create_branch),
        )
        .route("/{branch_id}", get(handlers::branch::get_branch))
        .route(
            "/{branch_id}/phone",
            patch(handlers::branch::update_branch_phone),
        )
        .route(
            "/{branch_id}/holidays",
            get(handlers::branch::get_branch_holidays)
                .post(handlers::branch::add_holidays)
                .delete(handlers::branch::remove_holidays),
        )
        .route(
            "/{branch_id}/holidays/check",
            get(handlers::branch::check_holiday),
        )
}
