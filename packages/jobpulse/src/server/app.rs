//! Application setup and router assembly.

use std::sync::Arc;

use axum::{
    extract::Extension,
    routing::{get, post},
    Router,
};
use sqlx::SqlitePool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::kernel::RefreshCoordinator;
use crate::server::routes::{
    export_jobs_handler, health_handler, list_jobs_handler, refresh_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: SqlitePool,
    pub coordinator: Arc<RefreshCoordinator>,
    /// Recency window (hours) behind the `is_new` flag
    pub new_job_window_hours: i64,
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/api/jobs", get(list_jobs_handler))
        .route("/api/jobs.csv", get(export_jobs_handler))
        .route("/api/refresh", post(refresh_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
