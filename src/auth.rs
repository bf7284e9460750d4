//! Admin sign-in against the single configured credential, and stateless
//! HS256 session tokens.

use crate::config::AuthConfig;
use crate::error::AppError;
use chrono::{DateTime, TimeZone, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The only identity a session can carry.
pub const ADMIN_SUBJECT: &str = "admin";
pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Error)]
pub enum SessionError {
    /// Wrong username, wrong password, missing fields or unconfigured credential alike.
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("session has expired")]
    TokenExpired,
    #[error("invalid session: {0}")]
    TokenInvalid(String),
    #[error("signing error: {0}")]
    Signing(String),
}

impl SessionError {
    /// Fixed message shown to clients; the detail stays in the logs.
    pub fn client_message(&self) -> &'static str {
        match self {
            SessionError::InvalidCredentials => "invalid credentials",
            SessionError::TokenExpired => "session has expired",
            SessionError::TokenInvalid(_) => "invalid session",
            SessionError::Signing(_) => "could not issue session",
        }
    }
}

impl From<SessionError> for AppError {
    fn from(err: SessionError) -> Self {
        match &err {
            SessionError::Signing(msg) => {
                tracing::error!(error = %msg, "failed to sign session token");
                AppError::Unexpected(err.client_message().into())
            }
            SessionError::TokenInvalid(detail) => {
                tracing::debug!(detail = %detail, "session rejected");
                AppError::Unauthorized(err.client_message().into())
            }
            SessionError::InvalidCredentials | SessionError::TokenExpired => {
                AppError::Unauthorized(err.client_message().into())
            }
        }
    }
}

/// Claims carried by every session token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionClaims {
    pub sub: String,
    pub name: String,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub role: String,
}

impl From<&SessionClaims> for SessionUser {
    fn from(c: &SessionClaims) -> Self {
        SessionUser {
            id: c.sub.clone(),
            name: c.name.clone(),
            role: c.role.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IssuedSession {
    pub token: String,
    pub token_type: &'static str,
    pub expires_at: DateTime<Utc>,
    pub user: SessionUser,
}

pub struct SessionGate {
    config: AuthConfig,
}

impl SessionGate {
    pub fn new(config: AuthConfig) -> Self {
        if config.admin_username.is_none() || config.admin_password.is_none() || config.secret.is_none() {
            tracing::warn!("admin credential or AUTH_SECRET not configured; sign-in is disabled");
        }
        SessionGate { config }
    }

    /// Exchange the admin credential for a signed session token.
    pub fn sign_in(&self, username: &str, password: &str) -> Result<IssuedSession, SessionError> {
        let (Some(expected_user), Some(expected_pass), Some(secret)) = (
            self.config.admin_username.as_deref(),
            self.config.admin_password.as_deref(),
            self.config.secret.as_deref(),
        ) else {
            return Err(SessionError::InvalidCredentials);
        };
        if username.is_empty() || username != expected_user || password != expected_pass {
            tracing::info!("rejected admin sign-in");
            return Err(SessionError::InvalidCredentials);
        }

        let now = Utc::now().timestamp();
        let exp = now.saturating_add(i64::try_from(self.config.session_ttl_secs).unwrap_or(i64::MAX));
        let claims = SessionClaims {
            sub: ADMIN_SUBJECT.into(),
            name: expected_user.into(),
            role: ADMIN_ROLE.into(),
            iat: now,
            exp,
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .map_err(|e| SessionError::Signing(e.to_string()))?;
        tracing::info!("admin signed in");

        Ok(IssuedSession {
            token,
            token_type: "Bearer",
            expires_at: Utc.timestamp_opt(exp, 0).single().unwrap_or_else(Utc::now),
            user: SessionUser::from(&claims),
        })
    }

    /// Verify signature, expiry and role of a presented token.
    pub fn verify(&self, token: &str) -> Result<SessionClaims, SessionError> {
        let secret = self
            .config
            .secret
            .as_deref()
            .ok_or_else(|| SessionError::TokenInvalid("sessions are not configured".into()))?;

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = jsonwebtoken::decode::<SessionClaims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            jsonwebtoken::errors::ErrorKind::ExpiredSignature => SessionError::TokenExpired,
            _ => SessionError::TokenInvalid(e.to_string()),
        })?;

        if claims.role != ADMIN_ROLE {
            return Err(SessionError::TokenInvalid("not an admin session".into()));
        }
        Ok(claims)
    }
}
