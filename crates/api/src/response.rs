//! Shared response payload types for API handlers.

use serde::Serialize;

/// Standard `{ "message": ... }` confirmation envelope, returned by the
/// registration and loading endpoints.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Battery level payload for `GET /drones/{serial_number}/battery-level`.
#[derive(Debug, Serialize)]
pub struct BatteryResponse {
    #[serde(rename = "batteryCapacity")]
    pub battery_capacity: f64,
}
