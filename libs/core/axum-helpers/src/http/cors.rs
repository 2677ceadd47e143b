use axum::http::{HeaderValue, Method, header};
use core_config::{ConfigError, FromEnv};
use std::time::Duration;
use tower_http::cors::CorsLayer;

/// Cross-cutting HTTP settings read at startup.
#[derive(Clone, Debug)]
pub struct HttpConfig {
    /// `CORS_ALLOWED_ORIGIN`; when unset any origin is allowed
    pub cors_allowed_origin: Option<HeaderValue>,
    pub request_timeout: Duration,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            cors_allowed_origin: None,
            request_timeout: Duration::from_secs(30),
        }
    }
}

impl FromEnv for HttpConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let cors_allowed_origin = match std::env::var("CORS_ALLOWED_ORIGIN") {
            Ok(raw) if !raw.trim().is_empty() => Some(raw.trim().parse::<HeaderValue>().map_err(
                |e| ConfigError::ParseError {
                    key: "CORS_ALLOWED_ORIGIN".to_string(),
                    details: e.to_string(),
                },
            )?),
            _ => None,
        };

        Ok(Self {
            cors_allowed_origin,
            ..Self::default()
        })
    }
}

impl HttpConfig {
    pub fn cors_layer(&self) -> CorsLayer {
        match &self.cors_allowed_origin {
            Some(origin) => create_cors_layer(origin.clone()),
            None => create_permissive_cors_layer(),
        }
    }
}

/// CORS restricted to a single origin, with the methods and headers the API uses.
pub fn create_cors_layer(allowed_origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(allowed_origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
        .max_age(Duration::from_secs(3600))
}

/// Allows any origin. Used when `CORS_ALLOWED_ORIGIN` is unset.
pub fn create_permissive_cors_layer() -> CorsLayer {
    CorsLayer::permissive()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_config_defaults_to_permissive() {
        temp_env::with_var_unset("CORS_ALLOWED_ORIGIN", || {
            let config = HttpConfig::from_env().unwrap();
            assert!(config.cors_allowed_origin.is_none());
            assert_eq!(config.request_timeout, Duration::from_secs(30));
        });
    }

    #[test]
    fn test_http_config_reads_origin() {
        temp_env::with_var("CORS_ALLOWED_ORIGIN", Some("https://app.example.com"), || {
            let config = HttpConfig::from_env().unwrap();
            assert_eq!(
                config.cors_allowed_origin,
                Some(HeaderValue::from_static("https://app.example.com"))
            );
        });
    }

    #[test]
    fn test_http_config_rejects_invalid_origin() {
        temp_env::with_var("CORS_ALLOWED_ORIGIN", Some("bad\norigin"), || {
            let err = HttpConfig::from_env().unwrap_err();
            assert!(err.to_string().contains("CORS_ALLOWED_ORIGIN"));
        });
    }
}
