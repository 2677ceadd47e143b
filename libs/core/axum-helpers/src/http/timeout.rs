//! Per-request deadline that answers with the standard error envelope.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::time::Duration;

use crate::errors::{ErrorCode, error_response};

/// `from_fn_with_state` middleware: a handler still running after `limit`
/// is dropped and the client gets `408 request_timeout`.
pub async fn request_timeout(
    State(limit): State<Duration>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    match tokio::time::timeout(limit, next.run(request)).await {
        Ok(response) => response,
        Err(_) => {
            tracing::warn!(%method, %uri, timeout_ms = limit.as_millis() as u64, "Request timed out");
            let code = ErrorCode::RequestTimeout;
            error_response(code.status(), code, code.default_message())
        }
    }
}
