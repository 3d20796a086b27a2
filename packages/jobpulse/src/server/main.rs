// Main entry point for the JobPulse API server

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use jobpulse_core::domains::jobs::models::Job;
use jobpulse_core::kernel::{default_sources, RefreshCoordinator};
use jobpulse_core::server::{build_app, AppState};
use jobpulse_core::Config;
use sqlx::sqlite::SqlitePoolOptions;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,jobpulse_core=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting JobPulse API");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    // Connect to database
    ensure_sqlite_dir(&config.database_url)?;
    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Idempotent schema setup
    Job::init_schema(&pool)
        .await
        .context("Failed to initialize schema")?;
    tracing::info!("Schema ready");

    // Build the refresh coordinator over the fixed source set
    let sources = default_sources(&config).context("Failed to build job sources")?;
    let coordinator = Arc::new(RefreshCoordinator::new(
        sources,
        Duration::from_secs(config.refresh_cooldown_secs),
    ));

    let app = build_app(AppState {
        db_pool: pool,
        coordinator,
        new_job_window_hours: config.new_job_window_hours,
    });

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Dashboard API: http://localhost:{}/api/jobs", config.port);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}

/// Create the parent directory for a file-backed SQLite URL so first boot
/// works from a clean checkout.
fn ensure_sqlite_dir(database_url: &str) -> Result<()> {
    let Some(path) = database_url.strip_prefix("sqlite:") else {
        return Ok(());
    };
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() || path.starts_with(':') {
        return Ok(());
    }
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
    }
    Ok(())
}
