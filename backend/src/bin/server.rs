//! LMI HTTP Server Binary
//!
//! This is the main entry point for the labor-market intelligence REST API
//! server. It initializes the repository, sets up the HTTP router, and
//! starts serving requests. When ingest is configured it also spawns the
//! periodic refresh loop.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin lmi-server --features "local-repo,http-server"
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 8080)
//! - `LMI_CONFIG`: Path to the TOML config file (default: lmi.toml if present)
//! - `BLS_API_KEY`: BLS registration key (optional, enables the v2 endpoint)
//! - `USAJOBS_AUTH_KEY` / `USAJOBS_USER_AGENT`: USAJOBS credentials
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;

use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use lmi_rust::config::IngestConfig;
use lmi_rust::db;
use lmi_rust::http::{create_router, AppState};
use lmi_rust::ingest;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting LMI HTTP Server");

    let config = IngestConfig::load()?;

    // Initialize global repository once and reuse it across the app
    db::init_repository()?;
    let repository = std::sync::Arc::clone(db::get_repository()?);
    info!("Repository initialized successfully");

    // Create application state
    let state = AppState::new(repository.clone(), config.clone());

    // Periodic background refresh, when enabled
    ingest::spawn_refresh_loop(repository, config, state.run_tracker.clone());

    // Create router with all endpoints
    let app = create_router(state);

    // Determine bind address
    let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(8080);
    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    // Start the server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
