use axum::{Router, routing::get};
use axum_helpers::health_router;

pub mod health;
pub mod users;

use crate::state::AppState;

/// Creates the API routes without the `/api/v1` prefix.
/// The prefix is added by the `create_router` helper.
///
/// Returns a stateless Router (all sub-routers have state already applied).
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .merge(health_router(state.config.app)) // /api/v1/health
        .nest("/users", users::router(state))
}

/// Operational routes served outside the API prefix.
///
/// - `/ready`: readiness with a real database ping
/// - `/metrics`: Prometheus exposition
pub fn ops_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
        .route("/metrics", get(observability::metrics_handler))
}
