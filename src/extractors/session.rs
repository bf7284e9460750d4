//! Classify the caller from the `Authorization: Bearer <token>` header.

use crate::auth::SessionClaims;
use crate::error::AppError;
use crate::state::AppState;
use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

/// Session state of the current request. Never rejects; handlers decide
/// whether an admin session is required.
#[derive(Clone, Debug)]
pub enum Session {
    Anonymous,
    Admin(SessionClaims),
    /// A token was presented but failed verification.
    Invalid(String),
}

impl Session {
    pub fn require_admin(&self) -> Result<&SessionClaims, AppError> {
        match self {
            Session::Admin(claims) => Ok(claims),
            Session::Anonymous => Err(AppError::Unauthorized("authentication required".into())),
            Session::Invalid(reason) => Err(AppError::Unauthorized(reason.clone())),
        }
    }

    /// Pass when `public`, otherwise require an admin session.
    pub fn authorize(&self, public: bool) -> Result<(), AppError> {
        if public {
            return Ok(());
        }
        self.require_admin().map(|_| ())
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Session {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(AUTHORIZATION) else {
            return Ok(Session::Anonymous);
        };
        let token = value
            .to_str()
            .ok()
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(str::trim)
            .filter(|t| !t.is_empty());
        let Some(token) = token else {
            return Ok(Session::Invalid("malformed authorization header".into()));
        };
        Ok(match state.gate.verify(token) {
            Ok(claims) => Session::Admin(claims),
            Err(e) => {
                tracing::debug!(error = %e, "session rejected");
                Session::Invalid(e.client_message().to_string())
            }
        })
    }
}

/// An authenticated admin. Rejects with 401 before any body extractor runs,
/// so gated routes answer 401 regardless of the payload.
#[derive(Clone, Debug)]
pub struct AdminSession(pub SessionClaims);

#[async_trait]
impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let session = match Session::from_request_parts(parts, state).await {
            Ok(session) => session,
            Err(never) => match never {},
        };
        session.require_admin().cloned().map(AdminSession)
    }
}
