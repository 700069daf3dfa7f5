//! Handlers for medication endpoints.

use axum::extract::{Path, State};
use axum::Json;
use skydrop_core::error::CoreError;
use skydrop_store::models::Medication;
use uuid::Uuid;

use crate::error::AppResult;
use crate::state::AppState;

/// GET /medication/all
///
/// Every medication record created so far, in id order.
pub async fn list_all(State(state): State<AppState>) -> AppResult<Json<Vec<Medication>>> {
    let medications = state.store.list_medications().await;
    Ok(Json(medications))
}

/// GET /medication/image/{id}
///
/// Fetch a stored medication image by its opaque reference.
pub async fn get_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<axum::response::Response> {
    use axum::http::header;
    use axum::response::IntoResponse;

    let image = state.images.get(id).await.ok_or(CoreError::NotFound {
        entity: "Image",
        key: id.to_string(),
    })?;

    let content_type = image
        .content_type
        .unwrap_or_else(|| "application/octet-stream".to_string());
    Ok(([(header::CONTENT_TYPE, content_type)], image.bytes).into_response())
}
