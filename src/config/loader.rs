//! Load settings from the process environment (after `.env`, if present).

use crate::config::types::*;
use crate::error::ConfigError;
use std::fmt::Display;
use std::str::FromStr;

impl Config {
    /// Read `.env` (if any) and then the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!("failed to read .env: {}", e);
            }
        }
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let database_url = var("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let database = DatabaseConfig {
            url: database_url,
            max_connections: parse_or(&var, "DATABASE_MAX_CONNECTIONS", 5)?,
        };

        let bind_addr = parse_or(&var, "BIND_ADDR", ([0, 0, 0, 0], 3000).into())?;
        let public_base_url = var("PUBLIC_BASE_URL")
            .unwrap_or_else(|| "http://localhost:3000".into())
            .trim_end_matches('/')
            .to_string();

        let auth = AuthConfig {
            admin_username: var("ADMIN_USERNAME"),
            admin_password: var("ADMIN_PASSWORD"),
            secret: var("AUTH_SECRET"),
            session_ttl_secs: parse_or(&var, "SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)?,
        };

        let assets = match var("ASSET_BUCKET") {
            Some(bucket) => {
                let region = var("ASSET_REGION").unwrap_or_else(|| "us-east-1".into());
                let endpoint = var("ASSET_ENDPOINT");
                let public_url = var("ASSET_PUBLIC_URL")
                    .unwrap_or_else(|| default_public_url(&bucket, &region, endpoint.as_deref()))
                    .trim_end_matches('/')
                    .to_string();
                Some(AssetConfig {
                    folder: var("ASSET_FOLDER").unwrap_or_else(|| DEFAULT_ASSET_FOLDER.into()),
                    access_key_id: var("ASSET_ACCESS_KEY_ID"),
                    secret_access_key: var("ASSET_SECRET_ACCESS_KEY"),
                    bucket,
                    region,
                    endpoint,
                    public_url,
                })
            }
            None => None,
        };

        let email = EmailConfig {
            api_url: var("EMAIL_API_URL").unwrap_or_else(|| DEFAULT_EMAIL_API_URL.into()),
            api_key: var("EMAIL_API_KEY"),
            from: var("EMAIL_FROM"),
            admin_recipient: var("ADMIN_EMAIL"),
        };

        Ok(Config {
            bind_addr,
            public_base_url,
            database,
            auth,
            assets,
            email,
            max_upload_bytes: parse_or(&var, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }
}

fn parse_or<T, F>(var: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
    F: Fn(&str) -> Option<String>,
{
    match var(key) {
        Some(raw) => raw.parse().map_err(|e: T::Err| ConfigError::Invalid {
            key,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

fn default_public_url(bucket: &str, region: &str, endpoint: Option<&str>) -> String {
    match endpoint {
        Some(ep) => format!("{}/{}", ep.trim_end_matches('/'), bucket),
        None => format!("https://{}.s3.{}.amazonaws.com", bucket, region),
    }
}
