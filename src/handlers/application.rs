use crate::error::AppError;
use crate::extractors::{JsonBody, Session};
use crate::model::{Application, Resource};
use crate::response::success_ok;
use crate::service::{RequestValidator, ResourceService};
use crate::state::AppState;
use axum::extract::State;
use axum::response::IntoResponse;

/// POST /applications: public job application form; notifies by mail.
pub async fn create(
    State(state): State<AppState>,
    session: Session,
    JsonBody(body): JsonBody,
) -> Result<impl IntoResponse, AppError> {
    session.authorize(Application::PUBLIC_CREATE)?;
    let (application, fields) = RequestValidator::validate::<Application>(body)?;
    let store = state.persistence.handle().await?;
    let doc = ResourceService::insert::<Application>(store.as_ref(), fields).await?;
    state.mailer.notify_application(&doc, &application).await;
    Ok(success_ok("Application submitted successfully", doc))
}
