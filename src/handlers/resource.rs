//! Generic resource handlers: list, read, create, update, delete.
//!
//! Reads follow `Resource::PUBLIC_READ`. Create, update and delete here take an
//! `AdminSession`; public submission forms have their own create handlers.

use crate::error::AppError;
use crate::extractors::{AdminSession, JsonBody, Session};
use crate::model::Resource;
use crate::response::{success_empty, success_ok};
use crate::service::ResourceService;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

pub async fn list<R: Resource>(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    session.authorize(R::PUBLIC_READ)?;
    let store = state.persistence.handle().await?;
    let docs = ResourceService::list::<R>(store.as_ref()).await?;
    Ok(success_ok(format!("{} fetched successfully", R::PLURAL), docs))
}

pub async fn read<R: Resource>(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    session.authorize(R::PUBLIC_READ)?;
    let store = state.persistence.handle().await?;
    let doc = ResourceService::read::<R>(store.as_ref(), &id).await?;
    Ok(success_ok(format!("{} fetched successfully", R::LABEL), doc))
}

pub async fn create<R: Resource>(
    State(state): State<AppState>,
    _admin: AdminSession,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let store = state.persistence.handle().await?;
    let doc = ResourceService::create::<R>(store.as_ref(), body).await?;
    Ok(success_ok(format!("{} created successfully", R::LABEL), doc))
}

pub async fn update<R: Resource>(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<String>,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    let store = state.persistence.handle().await?;
    let doc = ResourceService::update::<R>(store.as_ref(), &id, body).await?;
    Ok(success_ok(format!("{} updated successfully", R::LABEL), doc))
}

pub async fn delete<R: Resource>(
    State(state): State<AppState>,
    _admin: AdminSession,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let store = state.persistence.handle().await?;
    ResourceService::delete::<R>(store.as_ref(), &id).await?;
    Ok(success_empty(format!("{} deleted successfully", R::LABEL)))
}
