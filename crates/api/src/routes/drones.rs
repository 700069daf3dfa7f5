//! Route definitions for drone endpoints, mounted at `/drones`.

use axum::routing::{get, patch, post};
use axum::Router;

use crate::handlers::drones;
use crate::state::AppState;

/// ```text
/// POST  /register                              -> register
/// GET   /available                             -> available
/// GET   /{serial_number}/battery-level         -> battery_level
/// POST  /{serial_number}/load                  -> load
/// GET   /{serial_number}/loaded-medications    -> loaded_medications
/// PATCH /{serial_number}/state                 -> set_state
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/register", post(drones::register))
        .route("/available", get(drones::available))
        .route("/{serial_number}/battery-level", get(drones::battery_level))
        .route("/{serial_number}/load", post(drones::load))
        .route(
            "/{serial_number}/loaded-medications",
            get(drones::loaded_medications),
        )
        .route("/{serial_number}/state", patch(drones::set_state))
}
