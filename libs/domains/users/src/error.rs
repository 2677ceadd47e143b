use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_helpers::{AppError, errors::describe_validation_errors};
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

pub const USER_NOT_FOUND: &str = "user_not_found";
pub const USER_EXISTS: &str = "user_exists";

#[derive(Debug, Error)]
pub enum UserError {
    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("User not found: {0}")]
    NotFound(Uuid),

    #[error("User with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type UserResult<T> = Result<T, UserError>;

impl UserError {
    /// Label used for the `outcome` of operation metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            UserError::Validation(_) => "validation",
            UserError::NotFound(_) => "not_found",
            UserError::DuplicateEmail(_) => "conflict",
            UserError::Internal(_) => "internal",
        }
    }

    /// Map a database error, turning a violated unique index into a duplicate.
    pub fn from_db(err: DbErr, email: &str) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                UserError::DuplicateEmail(email.to_string())
            }
            _ => UserError::from(err),
        }
    }
}

impl From<DbErr> for UserError {
    fn from(err: DbErr) -> Self {
        UserError::Internal(format!("Database error: {err}"))
    }
}

impl From<ValidationErrors> for UserError {
    fn from(errors: ValidationErrors) -> Self {
        UserError::Validation(describe_validation_errors(&errors))
    }
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::Validation(details) => AppError::InvalidInput(details),
            UserError::NotFound(_) => {
                AppError::domain(StatusCode::NOT_FOUND, USER_NOT_FOUND, "User not found")
            }
            UserError::DuplicateEmail(_) => AppError::domain(
                StatusCode::CONFLICT,
                USER_EXISTS,
                "User with this email already exists",
            ),
            UserError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for UserError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (UserError::Validation("name: length".into()), StatusCode::BAD_REQUEST),
            (UserError::NotFound(Uuid::nil()), StatusCode::NOT_FOUND),
            (UserError::DuplicateEmail("a@b.co".into()), StatusCode::CONFLICT),
            (UserError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, status) in cases {
            assert_eq!(AppError::from(err).status(), status);
        }
    }

    #[test]
    fn test_plain_db_error_is_internal() {
        let err = UserError::from_db(DbErr::Custom("connection reset".into()), "a@b.co");
        assert!(matches!(err, UserError::Internal(_)));
        assert_eq!(err.kind(), "internal");
    }
}
