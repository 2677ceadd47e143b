//! Request metrics recorded around every routed request.

use axum::{
    body::Body,
    extract::MatchedPath,
    http::{Method, Request, Response, StatusCode},
    middleware::Next,
};
use metrics::{counter, histogram};
use std::time::Instant;

/// Path label for requests no route claimed (the JSON 404 fallback).
///
/// Raw URIs are never used as labels so unknown paths cannot grow the
/// series set.
pub const UNMATCHED_PATH: &str = "unmatched";

/// Low-cardinality labels shared by the HTTP series.
#[derive(Debug, Clone, PartialEq, Eq)]
struct RequestLabels {
    method: String,
    path: String,
}

impl RequestLabels {
    fn new(method: &Method, matched_path: Option<&MatchedPath>) -> Self {
        Self {
            method: method.as_str().to_string(),
            path: matched_path
                .map_or(UNMATCHED_PATH, MatchedPath::as_str)
                .to_string(),
        }
    }
}

fn status_class(status: StatusCode) -> &'static str {
    match status.as_u16() {
        200..=299 => "2xx",
        300..=399 => "3xx",
        400..=499 => "4xx",
        500..=599 => "5xx",
        _ => "other",
    }
}

/// `from_fn` middleware recording:
/// - `http_requests_total{method,path,status,status_class}`
/// - `http_request_duration_seconds{method,path}`
/// - `http_requests_errors_total{method,path,status}` for 4xx and 5xx
///
/// `path` is the route template (`/api/v1/users/{id}`), or
/// [`UNMATCHED_PATH`] when no route matched.
pub async fn metrics_middleware(
    matched_path: Option<MatchedPath>,
    request: Request<Body>,
    next: Next,
) -> Response<Body> {
    let labels = RequestLabels::new(request.method(), matched_path.as_ref());
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let code = status.as_u16().to_string();

    counter!(
        "http_requests_total",
        "method" => labels.method.clone(),
        "path" => labels.path.clone(),
        "status" => code.clone(),
        "status_class" => status_class(status)
    )
    .increment(1);

    histogram!(
        "http_request_duration_seconds",
        "method" => labels.method.clone(),
        "path" => labels.path.clone()
    )
    .record(started.elapsed().as_secs_f64());

    if status.is_client_error() || status.is_server_error() {
        counter!(
            "http_requests_errors_total",
            "method" => labels.method,
            "path" => labels.path,
            "status" => code
        )
        .increment(1);
    }

    response
}
