//! Converts handler panics into the standard 500 envelope.

use std::any::Any;

use axum::response::{IntoResponse, Response};
use tower_http::catch_panic::CatchPanicLayer;

use crate::errors::{ErrorCode, error_response};

/// Response builder for [`CatchPanicLayer`]; logs the payload and returns
/// `500 internal_error` without leaking it.
pub fn handle_panic(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else {
        "non-string panic payload"
    };

    tracing::error!(panic = detail, "Request handler panicked");

    let code = ErrorCode::InternalError;
    error_response(code.status(), code, code.default_message()).into_response()
}

pub fn panic_recovery_layer() -> CatchPanicLayer<fn(Box<dyn Any + Send + 'static>) -> Response> {
    CatchPanicLayer::custom(handle_panic as fn(Box<dyn Any + Send + 'static>) -> Response)
}
