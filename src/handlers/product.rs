use crate::error::AppError;
use crate::model::Product;
use crate::response::success_ok;
use crate::service::ResourceService;
use crate::state::AppState;
use axum::extract::{Path, State};
use axum::response::IntoResponse;

/// GET /products/details-by-slug/:slug: public product page lookup.
pub async fn read_by_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let store = state.persistence.handle().await?;
    let doc = ResourceService::read_by_field::<Product>(store.as_ref(), &["seo", "slug"], &slug).await?;
    Ok(success_ok("Product fetched successfully", doc))
}
