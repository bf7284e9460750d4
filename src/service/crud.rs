//! Generic CRUD over the document store, parameterized by entity type.

use crate::error::AppError;
use crate::model::Resource;
use crate::service::RequestValidator;
use crate::store::{Document, DocumentStore};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Fields owned by the store; ignored when present in an update body.
const STORE_FIELDS: &[&str] = &["_id", "createdAt", "updatedAt"];

pub struct ResourceService;

impl ResourceService {
    pub async fn list<R: Resource>(store: &dyn DocumentStore) -> Result<Vec<Document>, AppError> {
        Ok(store.list(R::COLLECTION).await?)
    }

    /// Fetch one document by id. Ids that are not UUIDs cannot exist and are reported as not found.
    pub async fn read<R: Resource>(store: &dyn DocumentStore, id: &str) -> Result<Document, AppError> {
        let id = parse_id::<R>(id)?;
        store
            .find_by_id(R::COLLECTION, id)
            .await?
            .ok_or_else(|| not_found::<R>())
    }

    /// Fetch the first document whose string field at `path` equals `value`.
    pub async fn read_by_field<R: Resource>(
        store: &dyn DocumentStore,
        path: &[&str],
        value: &str,
    ) -> Result<Document, AppError> {
        store
            .find_by_field(R::COLLECTION, path, value)
            .await?
            .ok_or_else(|| not_found::<R>())
    }

    pub async fn create<R: Resource>(store: &dyn DocumentStore, body: Value) -> Result<Document, AppError> {
        let (_, fields) = RequestValidator::validate::<R>(body)?;
        Self::insert::<R>(store, fields).await
    }

    /// Persist an already validated field map.
    pub async fn insert<R: Resource>(
        store: &dyn DocumentStore,
        fields: Map<String, Value>,
    ) -> Result<Document, AppError> {
        let doc = store.insert(R::COLLECTION, fields).await?;
        tracing::info!(collection = R::COLLECTION.name(), id = %doc.id, "document created");
        Ok(doc)
    }

    /// Shallow-merge `body` over the stored document, re-validate the result and save it.
    pub async fn update<R: Resource>(store: &dyn DocumentStore, id: &str, body: Value) -> Result<Document, AppError> {
        let partial = match body {
            Value::Object(m) => m,
            _ => return Err(AppError::Validation("body must be a JSON object".into())),
        };
        let existing = Self::read::<R>(store, id).await?;
        let merged = merge(existing.fields, partial);
        let (_, fields) = RequestValidator::validate::<R>(Value::Object(merged))?;
        let doc = store
            .replace(R::COLLECTION, existing.id, fields)
            .await?
            .ok_or_else(|| not_found::<R>())?;
        tracing::info!(collection = R::COLLECTION.name(), id = %doc.id, "document updated");
        Ok(doc)
    }

    pub async fn delete<R: Resource>(store: &dyn DocumentStore, id: &str) -> Result<(), AppError> {
        let id = parse_id::<R>(id)?;
        if !store.delete(R::COLLECTION, id).await? {
            return Err(not_found::<R>());
        }
        tracing::info!(collection = R::COLLECTION.name(), %id, "document deleted");
        Ok(())
    }
}

fn merge(mut existing: Map<String, Value>, partial: Map<String, Value>) -> Map<String, Value> {
    for (k, v) in partial {
        if STORE_FIELDS.contains(&k.as_str()) {
            continue;
        }
        existing.insert(k, v);
    }
    existing
}

fn parse_id<R: Resource>(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| not_found::<R>())
}

pub(crate) fn not_found<R: Resource>() -> AppError {
    AppError::NotFound(format!("{} not found", R::LABEL))
}
