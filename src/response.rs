//! Standard response envelope helpers.
//!
//! Every API body is `{ success, message, data?, error? }`. The HTTP status is
//! chosen separately by the caller.

use axum::{http::StatusCode, Json};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDetail>,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl<T> Envelope<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Envelope {
            success: true,
            message: message.into(),
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(code: &str, message: String) -> Self {
        Envelope {
            success: false,
            message: message.clone(),
            data: None,
            error: Some(ErrorDetail {
                code: code.to_string(),
                message,
            }),
        }
    }
}

pub fn success_ok<T: Serialize>(message: impl Into<String>, data: T) -> (StatusCode, Json<Envelope<T>>) {
    (StatusCode::OK, Json(Envelope::success(message, data)))
}

/// Success with `data: null`, used by delete.
pub fn success_empty(message: impl Into<String>) -> (StatusCode, Json<Envelope<serde_json::Value>>) {
    (
        StatusCode::OK,
        Json(Envelope::success(message, serde_json::Value::Null)),
    )
}
