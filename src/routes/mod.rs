//! Router assembly.

mod common;
mod resource;

pub use common::common_routes;
pub use resource::resource_routes;

use crate::error::AppError;
use crate::handlers::{auth, upload};
use crate::response::Envelope;
use crate::state::AppState;
use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use std::any::Any;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

/// POST /auth, GET /auth/session.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth", post(auth::sign_in))
        .route("/auth/session", get(auth::current_session))
}

/// POST /upload with its own body limit.
pub fn upload_routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/upload", post(upload::upload_file))
        .layer(DefaultBodyLimit::max(max_upload_bytes))
}

async fn not_found() -> AppError {
    AppError::NotFound("route not found".into())
}

fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!(panic = detail, "handler panicked");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(Envelope::<()>::failure("unexpected_error", "internal server error".into())),
    )
        .into_response()
}

/// Full application router.
pub fn app(state: AppState, max_upload_bytes: usize) -> Router {
    Router::new()
        .merge(common_routes())
        .merge(resource_routes())
        .merge(auth_routes())
        .merge(upload_routes(max_upload_bytes))
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
