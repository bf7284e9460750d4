//! Document-oriented persistence: one collection per entity, each document a
//! JSON object plus store-managed id and timestamps.

mod memory;
mod postgres;

pub use memory::MemoryDocumentStore;
pub use postgres::{ensure_collections, PgDocumentStore};

use crate::error::StoreError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};
use uuid::Uuid;

/// Named collections. Table names in PostgreSQL match [`Collection::name`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Collection {
    Products,
    Enquiries,
    Applications,
    Offers,
}

impl Collection {
    pub const ALL: [Collection; 4] = [
        Collection::Products,
        Collection::Enquiries,
        Collection::Applications,
        Collection::Offers,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Collection::Products => "products",
            Collection::Enquiries => "enquiries",
            Collection::Applications => "applications",
            Collection::Offers => "offers",
        }
    }
}

/// One persisted record. Serializes flat: `{ "_id", "createdAt", "updatedAt", ...fields }`.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Document {
    /// Look up a nested string field, e.g. `["seo", "slug"]`.
    pub fn str_at(&self, path: &[&str]) -> Option<&str> {
        let (first, rest) = path.split_first()?;
        let mut cur = self.fields.get(*first)?;
        for key in rest {
            cur = cur.get(*key)?;
        }
        cur.as_str()
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// All documents, newest first.
    async fn list(&self, collection: Collection) -> Result<Vec<Document>, StoreError>;

    async fn find_by_id(&self, collection: Collection, id: Uuid) -> Result<Option<Document>, StoreError>;

    /// First document whose string field at `path` equals `value`.
    async fn find_by_field(
        &self,
        collection: Collection,
        path: &[&str],
        value: &str,
    ) -> Result<Option<Document>, StoreError>;

    /// Insert with a store-generated id and timestamps.
    async fn insert(&self, collection: Collection, fields: Map<String, Value>) -> Result<Document, StoreError>;

    /// Replace the fields of an existing document. `None` when the id does not exist.
    async fn replace(
        &self,
        collection: Collection,
        id: Uuid,
        fields: Map<String, Value>,
    ) -> Result<Option<Document>, StoreError>;

    /// Returns whether a document was removed.
    async fn delete(&self, collection: Collection, id: Uuid) -> Result<bool, StoreError>;

    /// Cheap round-trip used by readiness checks.
    async fn ping(&self) -> Result<(), StoreError>;
}
