//! Route definitions for medication endpoints, mounted at `/medication`.

use axum::routing::get;
use axum::Router;

use crate::handlers::medications;
use crate::state::AppState;

/// ```text
/// GET /all          -> list_all
/// GET /image/{id}   -> get_image
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/all", get(medications::list_all))
        .route("/image/{id}", get(medications::get_image))
}
