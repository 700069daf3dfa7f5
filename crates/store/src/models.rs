//! Entity records and create DTOs.
//!
//! Records serialize with camelCase field names, matching the API's wire
//! format (`serialNumber`, `weightLimit`, `batteryCapacity`, ...).

use serde::Serialize;
use skydrop_core::drone::{DroneModel, DroneState};
use skydrop_core::types::{RecordId, Timestamp};
use uuid::Uuid;

/// A registered drone.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Drone {
    pub serial_number: String,
    pub model: DroneModel,
    pub weight_limit: f64,
    pub battery_capacity: f64,
    pub state: DroneState,
    pub registered_at: Timestamp,
}

/// A medication record, created at load time and immutable thereafter.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Medication {
    pub id: RecordId,
    pub name: String,
    pub weight: f64,
    pub code: String,
    /// Opaque reference into the image vault, if an image was uploaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<Uuid>,
    pub created_at: Timestamp,
}

/// An association row linking a loaded medication to its carrying drone.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DroneMedication {
    pub id: RecordId,
    pub drone_serial_number: String,
    pub medication_id: RecordId,
    pub loaded_at: Timestamp,
}
