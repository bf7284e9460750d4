//! Enquiry handlers that need more than generic CRUD: the product reference
//! is checked on write and embedded on detail reads.

use crate::error::AppError;
use crate::extractors::{AdminSession, JsonBody, Session};
use crate::model::{Enquiry, Product, Resource};
use crate::response::success_ok;
use crate::service::{RequestValidator, ResourceService};
use crate::store::{Document, DocumentStore};
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use serde_json::Value;

/// Resolve the referenced product, reporting a dangling id as a validation error.
async fn referenced_product(store: &dyn DocumentStore, product_id: &str) -> Result<Document, AppError> {
    ResourceService::read::<Product>(store, product_id)
        .await
        .map_err(|e| match e {
            AppError::NotFound(_) => AppError::Validation(format!("product {} does not exist", product_id)),
            other => other,
        })
}

/// POST /enquiries: public contact form.
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    session.authorize(Enquiry::PUBLIC_CREATE)?;
    let (enquiry, fields) = RequestValidator::validate::<Enquiry>(body)?;
    let store = state.persistence.handle().await?;
    let product = referenced_product(store.as_ref(), &enquiry.product).await?;
    let doc = ResourceService::insert::<Enquiry>(store.as_ref(), fields).await?;

    let product_title = product.str_at(&["title"]).unwrap_or("a product");
    state.mailer.notify_enquiry(&doc, &enquiry, product_title).await;

    Ok(success_ok("Enquiry submitted successfully", doc))
}

/// GET /enquiries/:id: detail view with the product embedded as `productDetails`.
pub async fn read(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    session.authorize(Enquiry::PUBLIC_READ)?;
    let store = state.persistence.handle().await?;
    let doc = ResourceService::read::<Enquiry>(store.as_ref(), &id).await?;

    let product = match doc.str_at(&["product"]) {
        Some(product_id) => match ResourceService::read::<Product>(store.as_ref(), product_id).await {
            Ok(product) => Some(product),
            Err(AppError::NotFound(_)) => {
                tracing::warn!(enquiry = %doc.id, product = product_id, "enquiry references a missing product");
                None
            }
            Err(e) => return Err(e),
        },
        None => None,
    };

    let mut data = serde_json::to_value(&doc).map_err(|e| AppError::Unexpected(e.to_string()))?;
    if let Value::Object(map) = &mut data {
        let details = serde_json::to_value(product).map_err(|e| AppError::Unexpected(e.to_string()))?;
        map.insert("productDetails".into(), details);
    }
    Ok(success_ok("Enquiry fetched successfully", data))
}

/// PATCH /enquiries/:id: admin update; a changed product reference must resolve.
pub async fn update(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let store = state.persistence.handle().await?;
    if let Some(product_id) = body.get("product").and_then(Value::as_str) {
        // ensure the enquiry exists first so a missing id stays a 404
        ResourceService::read::<Enquiry>(store.as_ref(), &id).await?;
        referenced_product(store.as_ref(), product_id).await?;
    }
    let doc = ResourceService::update::<Enquiry>(store.as_ref(), &id, body).await?;
    Ok(success_ok("Enquiry updated successfully", doc))
}
