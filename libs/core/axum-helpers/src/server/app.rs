use super::shutdown::ShutdownCoordinator;
use crate::errors::handlers::{method_not_allowed, not_found};
use axum::Router;
use core_config::server::ServerConfig;
use std::io;
use std::time::Duration;
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Versioned prefix every business route is nested under.
pub const API_PREFIX: &str = "/api/v1";

/// Assemble the documented API.
///
/// - `apis` is nested under [`API_PREFIX`]
/// - Swagger UI at `/swagger-ui`, the OpenAPI document at `/api-docs/openapi.json`
/// - unknown paths answer with the JSON 404 envelope, wrong methods with 405
///
/// Middleware is not applied here; routes merged afterwards (readiness,
/// metrics) should go through [`crate::http::with_middleware`] together
/// with this router.
pub fn create_router<T>(apis: Router) -> Router
where
    T: OpenApi + 'static,
{
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", T::openapi()))
        .nest(API_PREFIX, apis)
        .fallback(not_found)
        .method_not_allowed_fallback(method_not_allowed)
}

/// Serve `router`, then run `cleanup` once the server has drained.
///
/// On SIGINT/SIGTERM the listener stops accepting, in-flight requests are
/// allowed to finish, and `cleanup` (closing the pool, for example) gets at
/// most `shutdown_timeout` before the process moves on.
pub async fn create_production_app<F>(
    router: Router,
    server_config: &ServerConfig,
    shutdown_timeout: Duration,
    cleanup: F,
) -> io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let coordinator = ShutdownCoordinator::default();
    let signal_handle = coordinator.clone();

    let listener = tokio::net::TcpListener::bind(server_config.address()).await?;
    info!("Server starting on {}", listener.local_addr()?);

    let serve_result = axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(async move { signal_handle.wait_for_signal().await })
        .await
        .inspect_err(|e| {
            tracing::error!("Server encountered an error: {:?}", e);
        });

    info!("Running cleanup (timeout: {:?})", shutdown_timeout);
    match tokio::time::timeout(shutdown_timeout, cleanup).await {
        Ok(()) => info!("Cleanup completed"),
        Err(_) => tracing::warn!(
            "Cleanup exceeded timeout of {:?}, forcing shutdown",
            shutdown_timeout
        ),
    }

    serve_result
}
