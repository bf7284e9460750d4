//! In-process document store for local runs and tests. Selected with `memory://`.

use super::{Collection, Document, DocumentStore};
use crate::error::StoreError;
use async_trait::async_trait;
use chrono::Utc;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::RwLock;
use uuid::Uuid;

/// Documents kept in insertion order per collection.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn slug_of(fields: &Map<String, Value>) -> Option<&str> {
    fields.get("seo")?.get("slug")?.as_str()
}

/// Mirrors the unique slug index of the PostgreSQL store.
fn check_unique(
    collection: Collection,
    docs: &[Document],
    fields: &Map<String, Value>,
    except: Option<Uuid>,
) -> Result<(), StoreError> {
    if collection != Collection::Products {
        return Ok(());
    }
    let Some(slug) = slug_of(fields) else {
        return Ok(());
    };
    let taken = docs
        .iter()
        .any(|d| Some(d.id) != except && slug_of(&d.fields) == Some(slug));
    if taken {
        return Err(StoreError::Duplicate("seo.slug"));
    }
    Ok(())
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn list(&self, collection: Collection) -> Result<Vec<Document>, StoreError> {
        let guard = self.collections.read().map_err(|_| StoreError::Poisoned)?;
        let mut docs = guard.get(&collection).cloned().unwrap_or_default();
        docs.reverse();
        Ok(docs)
    }

    async fn find_by_id(&self, collection: Collection, id: Uuid) -> Result<Option<Document>, StoreError> {
        let guard = self.collections.read().map_err(|_| StoreError::Poisoned)?;
        Ok(guard
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| d.id == id))
            .cloned())
    }

    async fn find_by_field(
        &self,
        collection: Collection,
        path: &[&str],
        value: &str,
    ) -> Result<Option<Document>, StoreError> {
        let guard = self.collections.read().map_err(|_| StoreError::Poisoned)?;
        Ok(guard
            .get(&collection)
            .and_then(|docs| docs.iter().find(|d| d.str_at(path) == Some(value)))
            .cloned())
    }

    async fn insert(&self, collection: Collection, fields: Map<String, Value>) -> Result<Document, StoreError> {
        let mut guard = self.collections.write().map_err(|_| StoreError::Poisoned)?;
        let docs = guard.entry(collection).or_default();
        check_unique(collection, docs, &fields, None)?;
        let now = Utc::now();
        let doc = Document {
            id: Uuid::new_v4(),
            created_at: now,
            updated_at: now,
            fields,
        };
        docs.push(doc.clone());
        Ok(doc)
    }

    async fn replace(
        &self,
        collection: Collection,
        id: Uuid,
        fields: Map<String, Value>,
    ) -> Result<Option<Document>, StoreError> {
        let mut guard = self.collections.write().map_err(|_| StoreError::Poisoned)?;
        let docs = guard.entry(collection).or_default();
        check_unique(collection, docs, &fields, Some(id))?;
        Ok(docs.iter_mut().find(|d| d.id == id).map(|doc| {
            doc.fields = fields;
            doc.updated_at = Utc::now();
            doc.clone()
        }))
    }

    async fn delete(&self, collection: Collection, id: Uuid) -> Result<bool, StoreError> {
        let mut guard = self.collections.write().map_err(|_| StoreError::Poisoned)?;
        let Some(docs) = guard.get_mut(&collection) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|d| d.id != id);
        Ok(docs.len() < before)
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
