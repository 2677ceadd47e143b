use axum_helpers::server::{CleanupCoordinator, close_postgres, create_production_app};
use core_config::tracing::{init_tracing, install_color_eyre};
use database::postgres::{connect_with_retry, run_migrations};
use migration::Migrator;
use std::time::Duration;
use tracing::info;

mod api;
mod app;
mod config;
mod openapi;
mod state;

use config::Config;
use state::AppState;

/// Time allowed for closing connections once the server has drained
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

#[tokio::main]
async fn main() -> eyre::Result<()> {
    // Install color-eyre first for colored error output (before any fallible operations)
    install_color_eyre();

    // Load configuration from environment variables
    let config = Config::from_env()?;

    // Initialize tracing with ErrorLayer for span trace capture
    init_tracing(&config.environment);

    observability::init_metrics()?;

    info!(attempts = config.connect_retries, "Connecting to PostgreSQL");
    let db = connect_with_retry(config.database.clone(), config.retry_policy()).await?;

    run_migrations::<Migrator>(&db, config.app.name).await?;

    let state = AppState { config, db };

    // /api/v1/* plus /ready and /metrics, all behind the middleware stack
    let app = app::build_app(
        api::routes(&state),
        api::ops_router(state.clone()),
        &state.config.http,
    );

    info!(
        name = state.config.app.name,
        version = state.config.app.version,
        environment = state.config.environment.as_str(),
        "Starting users API"
    );

    let AppState { config, db } = state;

    create_production_app(app, &config.server, SHUTDOWN_TIMEOUT, async move {
        info!("Shutting down: closing database connections");

        let mut cleanup = CleanupCoordinator::new();
        cleanup.add_task("postgres", close_postgres(db, "users"));
        cleanup.run().await;
    })
    .await
    .map_err(|e| eyre::eyre!("Server error: {}", e))?;

    info!("Users API shutdown complete");
    Ok(())
}
