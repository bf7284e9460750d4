//! Shared application state for all routes.

use crate::auth::SessionGate;
use crate::config::Config;
use crate::error::StoreError;
use crate::mail::Mailer;
use crate::persistence::{connector_for, Persistence};
use crate::upload::{AssetHost, S3AssetHost};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    /// Store handle, connected on first use.
    pub persistence: Arc<Persistence>,
    pub gate: Arc<SessionGate>,
    /// `None` when no asset host is configured.
    pub assets: Option<Arc<dyn AssetHost>>,
    pub mailer: Arc<Mailer>,
}

impl AppState {
    /// Wire collaborators from settings. Does not touch the store yet.
    pub async fn from_config(config: &Config) -> Result<Self, StoreError> {
        let connector = connector_for(&config.database)?;
        let assets: Option<Arc<dyn AssetHost>> = match &config.assets {
            Some(asset_config) => Some(Arc::new(S3AssetHost::from_config(asset_config).await)),
            None => {
                tracing::info!("ASSET_BUCKET not set; uploads are disabled");
                None
            }
        };
        Ok(AppState {
            persistence: Arc::new(Persistence::new(connector)),
            gate: Arc::new(SessionGate::new(config.auth.clone())),
            assets,
            mailer: Arc::new(Mailer::new(config.email.clone(), config.public_base_url.clone())),
        })
    }
}
