use axum::{Router, middleware};
use tower_http::trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnResponse, TraceLayer};
use tracing::Level;

use super::{HttpConfig, panic_recovery_layer, request_timeout, security_headers};

/// Wrap `router` in the shared middleware stack.
///
/// Outermost first: CORS, request tracing, security headers, request
/// timeout, panic recovery. Panics therefore surface in the trace span as
/// ordinary 500 responses.
pub fn with_middleware(router: Router, config: &HttpConfig) -> Router {
    router
        .layer(panic_recovery_layer())
        .layer(middleware::from_fn_with_state(
            config.request_timeout,
            request_timeout,
        ))
        .layer(middleware::from_fn(security_headers))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
        .layer(config.cors_layer())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::{Request, StatusCode}, routing::get};
    use http_body_util::BodyExt;
    use std::time::Duration;
    use tower::ServiceExt;

    async fn boom() -> &'static str {
        panic!("handler exploded")
    }

    async fn slow() -> &'static str {
        tokio::time::sleep(Duration::from_secs(5)).await;
        "late"
    }

    fn app(config: &HttpConfig) -> Router {
        let router = Router::new()
            .route("/ok", get(|| async { "ok" }))
            .route("/boom", get(boom))
            .route("/slow", get(slow));
        with_middleware(router, config)
    }

    #[tokio::test]
    async fn test_panic_becomes_internal_error_envelope() {
        let response = app(&HttpConfig::default())
            .oneshot(Request::get("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "internal_error");
        assert!(!body["message"].as_str().unwrap().contains("exploded"));
    }

    #[tokio::test]
    async fn test_service_keeps_serving_after_panic() {
        let app = app(&HttpConfig::default());

        let _ = app
            .clone()
            .oneshot(Request::get("/boom").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let response = app
            .oneshot(Request::get("/ok").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_security_headers_present() {
        let response = app(&HttpConfig::default())
            .oneshot(Request::get("/ok").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.headers()["x-content-type-options"], "nosniff");
        assert_eq!(response.headers()["x-frame-options"], "DENY");
    }

    #[tokio::test]
    async fn test_permissive_cors_allows_any_origin() {
        let response = app(&HttpConfig::default())
            .oneshot(
                Request::get("/ok")
                    .header("origin", "https://somewhere.example")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers()["access-control-allow-origin"], "*");
    }

    #[tokio::test]
    async fn test_restricted_cors_echoes_configured_origin() {
        let config = HttpConfig {
            cors_allowed_origin: Some("https://app.example.com".parse().unwrap()),
            ..HttpConfig::default()
        };

        let response = app(&config)
            .oneshot(
                Request::get("/ok")
                    .header("origin", "https://app.example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "https://app.example.com"
        );
    }

    #[tokio::test]
    async fn test_timeout_renders_error_envelope() {
        let config = HttpConfig {
            request_timeout: Duration::from_millis(10),
            ..HttpConfig::default()
        };

        let response = app(&config)
            .oneshot(Request::get("/slow").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
        assert_eq!(response.headers()["x-content-type-options"], "nosniff");
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["error"], "request_timeout");
        assert_eq!(body["message"], "The request took too long to complete");
    }

    #[tokio::test]
    async fn test_fast_handler_is_unaffected_by_timeout() {
        let config = HttpConfig {
            request_timeout: Duration::from_millis(500),
            ..HttpConfig::default()
        };

        let response = app(&config)
            .oneshot(Request::get("/ok").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }
}
