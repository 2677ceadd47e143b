//! Server infrastructure: router assembly with API docs, health and
//! readiness probes, graceful shutdown.
//!
//! ```ignore
//! use axum_helpers::{http::{HttpConfig, with_middleware}, server::{create_router, create_production_app, health_router}};
//! use core_config::app_info;
//!
//! let api = Router::new().merge(health_router(app_info!())).nest("/users", users);
//! let app = with_middleware(create_router::<ApiDoc>(api), &HttpConfig::from_env()?);
//! create_production_app(app, &server_config, Duration::from_secs(30), async {}).await?;
//! ```

pub mod app;
pub mod cleanup;
pub mod health;
pub mod shutdown;

pub use app::{API_PREFIX, create_production_app, create_router};
pub use cleanup::{CleanupCoordinator, close_postgres};
pub use health::{
    HealthCheckFuture, HealthResponse, health_handler, health_router, run_health_checks,
};
pub use shutdown::{ShutdownCoordinator, shutdown_signal};
