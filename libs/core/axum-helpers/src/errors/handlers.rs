use axum::response::Response;

use super::{ErrorCode, error_response};

/// Router fallback producing a JSON 404.
pub async fn not_found() -> Response {
    let code = ErrorCode::NotFound;
    error_response(code.status(), code, code.default_message())
}

pub async fn method_not_allowed() -> Response {
    let code = ErrorCode::MethodNotAllowed;
    error_response(code.status(), code, code.default_message())
}
