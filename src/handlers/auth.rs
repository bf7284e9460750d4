//! Admin sign-in and session introspection.

use crate::auth::SessionUser;
use crate::error::AppError;
use crate::extractors::{AdminSession, JsonBody};
use crate::response::success_ok;
use crate::state::AppState;
use axum::extract::State;
use axum::response::IntoResponse;
use chrono::{DateTime, TimeZone, Utc};
use serde::Serialize;
use serde_json::Value;

fn str_field<'a>(body: &'a Value, name: &str) -> &'a str {
    body.get(name).and_then(Value::as_str).unwrap_or_default()
}

/// POST /auth: `{ username, password }` for a bearer session token.
pub async fn sign_in(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let session = state
        .gate
        .sign_in(str_field(&body, "username"), str_field(&body, "password"))?;
    Ok(success_ok("Signed in successfully", session))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SessionInfo {
    user: SessionUser,
    expires_at: Option<DateTime<Utc>>,
}

/// GET /auth/session: identity behind the presented token.
pub async fn current_session(AdminSession(claims): AdminSession) -> Result<impl IntoResponse, AppError> {
    Ok(success_ok(
        "Session is valid",
        SessionInfo {
            user: SessionUser::from(&claims),
            expires_at: Utc.timestamp_opt(claims.exp, 0).single(),
        },
    ))
}
