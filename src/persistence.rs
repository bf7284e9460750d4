//! Lazily established store handle shared by every request.
//!
//! The first caller starts connecting; callers arriving while that attempt is in
//! flight wait for it instead of opening their own. A failed attempt leaves the
//! cell empty, so the next call starts over.

use crate::config::DatabaseConfig;
use crate::error::{AppError, StoreError};
use crate::store::{ensure_collections, DocumentStore, MemoryDocumentStore, PgDocumentStore};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::OnceCell;

pub type StoreHandle = Arc<dyn DocumentStore>;

/// Opens a new store handle. Called at most once per successful initialization.
#[async_trait]
pub trait StoreConnector: Send + Sync {
    async fn connect(&self) -> Result<StoreHandle, StoreError>;
}

pub struct PgConnector {
    url: String,
    max_connections: u32,
}

impl PgConnector {
    pub fn new(url: impl Into<String>, max_connections: u32) -> Self {
        PgConnector {
            url: url.into(),
            max_connections,
        }
    }
}

#[async_trait]
impl StoreConnector for PgConnector {
    async fn connect(&self) -> Result<StoreHandle, StoreError> {
        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(self.max_connections)
            .connect(&self.url)
            .await
            .map_err(|e| StoreError::Connect(e.to_string()))?;
        ensure_collections(&pool).await?;
        Ok(Arc::new(PgDocumentStore::new(pool)))
    }
}

#[derive(Default)]
pub struct MemoryConnector;

#[async_trait]
impl StoreConnector for MemoryConnector {
    async fn connect(&self) -> Result<StoreHandle, StoreError> {
        Ok(Arc::new(MemoryDocumentStore::new()))
    }
}

/// Pick a connector from the connection string scheme.
pub fn connector_for(config: &DatabaseConfig) -> Result<Arc<dyn StoreConnector>, StoreError> {
    let scheme = config.url.split("://").next().unwrap_or_default();
    match scheme {
        "postgres" | "postgresql" => Ok(Arc::new(PgConnector::new(&config.url, config.max_connections))),
        "memory" => Ok(Arc::new(MemoryConnector)),
        other => Err(StoreError::UnsupportedScheme(other.to_string())),
    }
}

pub struct Persistence {
    connector: Arc<dyn StoreConnector>,
    handle: OnceCell<StoreHandle>,
}

impl Persistence {
    pub fn new(connector: Arc<dyn StoreConnector>) -> Self {
        Persistence {
            connector,
            handle: OnceCell::new(),
        }
    }

    /// Return the shared handle, connecting on first use.
    pub async fn handle(&self) -> Result<StoreHandle, AppError> {
        let handle = self
            .handle
            .get_or_try_init(|| async {
                tracing::info!("connecting to document store");
                let handle = self.connector.connect().await;
                match &handle {
                    Ok(_) => tracing::info!("document store connected"),
                    Err(e) => tracing::error!(error = %e, "document store connection failed"),
                }
                handle
            })
            .await?;
        Ok(Arc::clone(handle))
    }

    pub fn is_connected(&self) -> bool {
        self.handle.initialized()
    }
}
