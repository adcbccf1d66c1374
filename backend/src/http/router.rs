//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Series and catalog
        .route("/series", get(handlers::get_series))
        .route("/series/bulk", post(handlers::bulk_upsert))
        .route("/sectors", get(handlers::get_sectors))
        .route("/latest", get(handlers::get_latest))
        // Chart views
        .route("/charts/openings", get(handlers::openings_chart))
        .route(
            "/charts/unemployment-by-industry",
            get(handlers::unemployment_chart),
        )
        .route("/charts/rate", get(handlers::rate_chart))
        // Analysis
        .route("/analysis", get(handlers::get_analysis))
        .route("/rate-overview", get(handlers::get_rate_overview))
        // AI pressure
        .route("/ai-pressure", get(handlers::get_ai_pressure))
        .route(
            "/ai-pressure/snapshots",
            get(handlers::get_pressure_snapshots),
        )
        // Refresh runs
        .route("/refresh", post(handlers::start_refresh))
        .route("/runs/{run_id}", get(handlers::get_run_status))
        .route("/runs/{run_id}/logs", get(handlers::stream_run_logs));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        // Bulk backfills can carry a decade of monthly records.
        .layer(DefaultBodyLimit::max(10 * 1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IngestConfig;
    use crate::db::repositories::LocalRepository;
    use std::sync::Arc;

    #[test]
    fn test_router_creation() {
        let repo =
            Arc::new(LocalRepository::new()) as Arc<dyn crate::db::repository::FullRepository>;
        let state = AppState::new(repo, IngestConfig::default());
        let _router = create_router(state);
    }
}
