//! Typed errors and HTTP mapping.

use crate::response::Envelope;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    Missing(&'static str),
    #[error("invalid value for {key}: {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Failures of the document store. Always surfaced to clients as upstream errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("connect: {0}")]
    Connect(String),
    #[error("query: {0}")]
    Query(#[from] sqlx::Error),
    #[error("unsupported store url scheme: {0}")]
    UnsupportedScheme(String),
    #[error("store lock poisoned")]
    Poisoned,
    #[error("duplicate value for unique field {0}")]
    Duplicate(&'static str),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Upstream(String),
    #[error("{0}")]
    Unexpected(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Upstream(_) | AppError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation_error",
            AppError::Unauthorized(_) => "unauthorized",
            AppError::NotFound(_) => "not_found",
            AppError::Upstream(_) => "upstream_error",
            AppError::Unexpected(_) => "unexpected_error",
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Duplicate(field) => AppError::Validation(format!("{} is already in use", field)),
            other => {
                tracing::error!(error = %other, "document store failure");
                AppError::Upstream("database operation failed".into())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Envelope::<()>::failure(self.code(), self.to_string());
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_follow_taxonomy() {
        assert_eq!(AppError::Validation("x".into()).status(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::Unauthorized("x".into()).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Upstream("x".into()).status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(AppError::Unexpected("x".into()).status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn store_errors_hide_details() {
        let err: AppError = StoreError::Connect("password authentication failed for user".into()).into();
        assert_eq!(err.code(), "upstream_error");
        assert!(!err.to_string().contains("password"));
    }

    #[test]
    fn duplicate_slug_is_a_validation_error() {
        let err: AppError = StoreError::Duplicate("seo.slug").into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "seo.slug is already in use");
    }
}
