//! JSON body extractor whose rejection is rendered as an envelope.

use crate::error::AppError;
use async_trait::async_trait;
use axum::extract::{FromRequest, Request};
use axum::Json;
use serde_json::Value;

#[derive(Debug)]
pub struct JsonBody(pub Value);

#[async_trait]
impl<S> FromRequest<S> for JsonBody
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e| AppError::Validation(e.body_text()))?;
        Ok(JsonBody(value))
    }
}
