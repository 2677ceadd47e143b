//! Assembly of the served router.

use axum::{Router, middleware};
use axum_helpers::{HttpConfig, create_router, with_middleware};
use observability::metrics_middleware;

use crate::openapi::ApiDoc;

/// Nest `api` under `/api/v1`, add docs and the operational routes, then
/// wrap everything in request metrics and the shared middleware stack.
pub fn build_app(api: Router, ops: Router, http: &HttpConfig) -> Router {
    let router = create_router::<ApiDoc>(api)
        .merge(ops)
        .layer(middleware::from_fn(metrics_middleware));

    with_middleware(router, http)
}
