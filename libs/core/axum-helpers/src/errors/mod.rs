pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;
use uuid::Error as UuidError;
use validator::ValidationErrors;

/// Error envelope returned by every failing endpoint.
///
/// ```json
/// {
///   "error": "validation_error",
///   "message": "Request validation failed",
///   "details": "email: email"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Machine-readable snake_case code
    pub error: String,
    /// Human-readable message
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    pub fn from_code(code: ErrorCode) -> Self {
        Self::new(code.as_str(), code.default_message())
    }
}

/// Application error type that renders as an [`ErrorResponse`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("UUID error: {0}")]
    UuidError(#[from] UuidError),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    /// Validation failure described as text; rendered as `details`.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A failure reported under a domain-specific code such as `user_exists`.
    #[error("{code}: {message}")]
    Domain {
        status: StatusCode,
        code: &'static str,
        message: String,
    },

    /// Logged with its message; clients only see the generic text.
    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn domain(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        AppError::Domain {
            status,
            code,
            message: message.into(),
        }
    }

    /// HTTP status this error renders with.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::JsonExtractorRejection(_)
            | AppError::ValidationError(_)
            | AppError::UuidError(_)
            | AppError::BadRequest(_)
            | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Domain { status, .. } => *status,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn to_error_response(&self) -> ErrorResponse {
        match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::info!(error = %e, "Rejected request body");
                ErrorResponse::new(ErrorCode::ValidationError.as_str(), "Invalid request body")
                    .with_details(e.body_text())
            }
            AppError::ValidationError(e) => {
                tracing::info!(error = %e, "Request failed validation");
                ErrorResponse::from_code(ErrorCode::ValidationError)
                    .with_details(describe_validation_errors(e))
            }
            AppError::UuidError(e) => {
                tracing::info!(error = %e, "Malformed UUID");
                ErrorResponse::new(ErrorCode::ValidationError.as_str(), "Invalid UUID format")
                    .with_details(e.to_string())
            }
            AppError::BadRequest(msg) => {
                ErrorResponse::new(ErrorCode::ValidationError.as_str(), msg.as_str())
            }
            AppError::InvalidInput(details) => {
                ErrorResponse::from_code(ErrorCode::ValidationError).with_details(details.as_str())
            }
            AppError::Domain { code, message, .. } => ErrorResponse::new(*code, message.as_str()),
            AppError::InternalServerError(msg) => {
                tracing::error!(error_code = ErrorCode::InternalError.as_str(), "Internal server error: {}", msg);
                ErrorResponse::from_code(ErrorCode::InternalError)
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status(), Json(self.to_error_response())).into_response()
    }
}

/// Flatten field errors into `field: message` pairs, sorted by field name.
pub fn describe_validation_errors(errors: &ValidationErrors) -> String {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|(a, _), (b, _)| a.cmp(b));

    fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| match &err.message {
                Some(message) => format!("{field}: {message}"),
                None => format!("{field}: {}", err.code),
            })
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Render an arbitrary status and code as the standard envelope.
pub fn error_response(status: StatusCode, code: ErrorCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorResponse::new(code.as_str(), message))).into_response()
}
