//! # Axum Helpers
//!
//! Shared building blocks for the HTTP services in this workspace.
//!
//! - **[`server`]**: router assembly with OpenAPI docs, health probes, graceful shutdown
//! - **[`http`]**: middleware stack (CORS, security headers, timeout, panic recovery, tracing)
//! - **[`errors`]**: the `{error, message, details}` envelope and [`AppError`]
//! - **[`extractors`]**: validated JSON bodies, UUID path ids, pagination
//!
//! ```ignore
//! let api = Router::new()
//!     .merge(health_router(app_info!()))
//!     .nest("/users", users_router);
//! let app = with_middleware(create_router::<ApiDoc>(api), &HttpConfig::from_env()?);
//! create_production_app(app, &ServerConfig::from_env()?, Duration::from_secs(30), async {}).await?;
//! ```

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use server::{
    API_PREFIX, CleanupCoordinator, HealthCheckFuture, HealthResponse, ShutdownCoordinator,
    close_postgres, create_production_app, create_router, health_router,
    run_health_checks, shutdown_signal,
};

pub use http::{
    HttpConfig, create_cors_layer, create_permissive_cors_layer, handle_panic,
    panic_recovery_layer, request_timeout, security_headers, with_middleware,
};

pub use errors::{AppError, ErrorCode, ErrorResponse};

pub use extractors::{Pagination, PaginationQuery, UuidPath, ValidatedJson};
