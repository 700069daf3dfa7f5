//! Handlers for drone endpoints: registration, availability, battery
//! level, the loading workflow, loaded-medication listing, and state
//! transitions.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use serde::Deserialize;
use skydrop_core::drone::DroneState;
use skydrop_core::error::CoreError;
use skydrop_core::validation::{
    validate_medication, validate_registration, MedicationInput, RegistrationInput,
};
use skydrop_store::images::StoredImage;
use skydrop_store::models::{Drone, Medication};

use crate::error::{AppError, AppResult};
use crate::response::{BatteryResponse, MessageResponse};
use crate::state::AppState;

/// Request body for the state transition endpoint.
#[derive(Debug, Deserialize)]
pub struct SetStateRequest {
    pub state: Option<String>,
}

/// POST /drones/register
///
/// Validate and register a new drone.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegistrationInput>,
) -> AppResult<Json<MessageResponse>> {
    let registration = validate_registration(input)?;
    let drone = state.store.register_drone(registration).await?;
    Ok(Json(MessageResponse {
        message: format!("Drone '{}' registered successfully", drone.serial_number),
    }))
}

/// GET /drones/available
///
/// Drones ready to receive a load: `IDLE` with battery above the loading
/// threshold.
pub async fn available(State(state): State<AppState>) -> AppResult<Json<Vec<Drone>>> {
    let drones = state.store.list_available_drones().await;
    Ok(Json(drones))
}

/// GET /drones/{serial_number}/battery-level
pub async fn battery_level(
    State(state): State<AppState>,
    Path(serial_number): Path<String>,
) -> AppResult<Json<BatteryResponse>> {
    let drone = state.store.get_drone(&serial_number).await?;
    Ok(Json(BatteryResponse {
        battery_capacity: drone.battery_capacity,
    }))
}

/// POST /drones/{serial_number}/load
///
/// Load a medication onto a drone. Multipart form fields: `name`,
/// `weight`, `code`, and an optional `image` file. The whole check-then-act
/// sequence commits atomically in the store; the image is stashed in the
/// vault first and dropped again if the load is refused.
pub async fn load(
    State(state): State<AppState>,
    Path(serial_number): Path<String>,
    mut multipart: Multipart,
) -> AppResult<Json<MessageResponse>> {
    let mut input = MedicationInput::default();
    let mut image: Option<StoredImage> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "name" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                input.name = Some(text);
            }
            "weight" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                let weight: f64 = text.parse().map_err(|_| {
                    AppError::Core(CoreError::InvalidInput(format!(
                        "weight '{text}' is not a number"
                    )))
                })?;
                input.weight = Some(weight);
            }
            "code" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                input.code = Some(text);
            }
            "image" => {
                let filename = field.file_name().unwrap_or("medication.png").to_string();
                let content_type = field.content_type().map(|ct| ct.to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                image = Some(StoredImage {
                    filename,
                    content_type,
                    bytes: data.to_vec(),
                });
            }
            _ => {} // ignore unknown fields
        }
    }

    let medication = validate_medication(input)?;

    let image_ref = match image {
        Some(blob) => Some(state.images.put(blob).await),
        None => None,
    };

    let result = state
        .store
        .load_medication(&serial_number, medication, image_ref)
        .await;

    match result {
        Ok(record) => Ok(Json(MessageResponse {
            message: format!(
                "Medication '{}' loaded onto drone '{serial_number}'",
                record.name
            ),
        })),
        Err(err) => {
            // Refused load: drop the stashed image again.
            if let Some(id) = image_ref {
                state.images.remove(id).await;
            }
            Err(err.into())
        }
    }
}

/// GET /drones/{serial_number}/loaded-medications
pub async fn loaded_medications(
    State(state): State<AppState>,
    Path(serial_number): Path<String>,
) -> AppResult<Json<Vec<Medication>>> {
    let medications = state.store.list_medications_for_drone(&serial_number).await?;
    Ok(Json(medications))
}

/// PATCH /drones/{serial_number}/state
///
/// Explicit state transition, enforcing the transition table and the
/// battery gate for `LOADING`.
pub async fn set_state(
    State(state): State<AppState>,
    Path(serial_number): Path<String>,
    Json(input): Json<SetStateRequest>,
) -> AppResult<Json<Drone>> {
    let target = input
        .state
        .ok_or_else(|| CoreError::InvalidInput("missing required field 'state'".to_string()))?;
    let target: DroneState = target.parse::<DroneState>()?;
    let drone = state.store.set_drone_state(&serial_number, target).await?;
    Ok(Json(drone))
}
