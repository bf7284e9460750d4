//! Runtime settings, grouped by the collaborator that consumes them.

use std::net::SocketAddr;

pub const DEFAULT_SESSION_TTL_SECS: u64 = 30 * 24 * 60 * 60;
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
pub const DEFAULT_ASSET_FOLDER: &str = "storefront";
pub const DEFAULT_EMAIL_API_URL: &str = "https://api.resend.com/emails";

#[derive(Clone, Debug)]
pub struct Config {
    pub bind_addr: SocketAddr,
    /// Public URL of the storefront, used for links in outgoing mail.
    pub public_base_url: String,
    pub database: DatabaseConfig,
    pub auth: AuthConfig,
    /// `None` when no bucket is configured; uploads then fail with an upstream error.
    pub assets: Option<AssetConfig>,
    pub email: EmailConfig,
    pub max_upload_bytes: usize,
}

#[derive(Clone, Debug)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

/// Single static admin credential plus the JWT signing secret.
#[derive(Clone)]
pub struct AuthConfig {
    pub admin_username: Option<String>,
    pub admin_password: Option<String>,
    pub secret: Option<String>,
    pub session_ttl_secs: u64,
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("admin_username", &self.admin_username)
            .field("admin_password", &self.admin_password.as_ref().map(|_| "***"))
            .field("secret", &self.secret.as_ref().map(|_| "***"))
            .field("session_ttl_secs", &self.session_ttl_secs)
            .finish()
    }
}

#[derive(Clone, Debug)]
pub struct AssetConfig {
    pub bucket: String,
    pub region: String,
    /// Override for S3-compatible hosts (MinIO, R2, ...). Enables path-style addressing.
    pub endpoint: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub folder: String,
    pub public_url: String,
}

#[derive(Clone, Debug, Default)]
pub struct EmailConfig {
    pub api_url: String,
    pub api_key: Option<String>,
    pub from: Option<String>,
    pub admin_recipient: Option<String>,
}

impl EmailConfig {
    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some() && self.from.is_some()
    }
}
