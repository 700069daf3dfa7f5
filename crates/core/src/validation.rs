//! Field-level validation for incoming requests.
//!
//! Presence is explicit: required fields arrive as `Option` and absence is
//! reported per field. A numeric zero is a value, not a missing field;
//! out-of-range zeros are rejected by the range rules instead.

use serde::Deserialize;

use crate::drone::{check_loading_battery, DroneModel, DroneState};
use crate::error::CoreError;
use crate::medication;

/// Maximum serial number length.
pub const MAX_SERIAL_LEN: usize = 100;

/// Maximum drone weight limit in grams.
pub const MAX_WEIGHT_LIMIT: f64 = 500.0;

/// Raw registration payload as received on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationInput {
    pub serial_number: Option<String>,
    pub model: Option<String>,
    pub weight_limit: Option<f64>,
    pub battery_capacity: Option<f64>,
    pub state: Option<String>,
}

/// A fully validated registration, safe to hand to the store.
#[derive(Debug, Clone)]
pub struct DroneRegistration {
    pub serial_number: String,
    pub model: DroneModel,
    pub weight_limit: f64,
    pub battery_capacity: f64,
    pub state: DroneState,
}

/// Raw medication fields from a load request (multipart form).
#[derive(Debug, Clone, Default)]
pub struct MedicationInput {
    pub name: Option<String>,
    pub weight: Option<f64>,
    pub code: Option<String>,
}

/// A validated medication payload.
#[derive(Debug, Clone)]
pub struct ValidatedMedication {
    pub name: String,
    pub weight: f64,
    pub code: String,
}

fn require<T>(value: Option<T>, field: &str) -> Result<T, CoreError> {
    value.ok_or_else(|| CoreError::InvalidInput(format!("missing required field '{field}'")))
}

/// Validate a drone serial number: non-empty, at most 100 characters.
pub fn validate_serial_number(serial: &str) -> Result<(), CoreError> {
    if serial.is_empty() {
        return Err(CoreError::InvalidInput(
            "serial_number must not be empty".to_string(),
        ));
    }
    if serial.chars().count() > MAX_SERIAL_LEN {
        return Err(CoreError::InvalidInput(format!(
            "serial_number exceeds {MAX_SERIAL_LEN} characters"
        )));
    }
    Ok(())
}

/// Validate a drone weight limit: positive, at most 500g.
pub fn validate_weight_limit(weight_limit: f64) -> Result<(), CoreError> {
    if !weight_limit.is_finite() || weight_limit <= 0.0 {
        return Err(CoreError::InvalidInput(format!(
            "weight_limit must be a positive number of grams, got {weight_limit}"
        )));
    }
    if weight_limit > MAX_WEIGHT_LIMIT {
        return Err(CoreError::InvalidInput(format!(
            "weight_limit must not exceed {MAX_WEIGHT_LIMIT}g, got {weight_limit}"
        )));
    }
    Ok(())
}

/// Validate a battery capacity percentage: within [0, 100].
pub fn validate_battery_capacity(battery_capacity: f64) -> Result<(), CoreError> {
    if !battery_capacity.is_finite() || !(0.0..=100.0).contains(&battery_capacity) {
        return Err(CoreError::InvalidInput(format!(
            "battery_capacity must be within [0, 100], got {battery_capacity}"
        )));
    }
    Ok(())
}

/// Validate a full registration payload.
///
/// Checks presence of every required field, then each field's domain rule,
/// and finally the battery gate when the initial state is `LOADING`.
pub fn validate_registration(input: RegistrationInput) -> Result<DroneRegistration, CoreError> {
    let serial_number = require(input.serial_number, "serial_number")?;
    let model = require(input.model, "model")?;
    let weight_limit = require(input.weight_limit, "weight_limit")?;
    let battery_capacity = require(input.battery_capacity, "battery_capacity")?;
    let state = require(input.state, "state")?;

    validate_serial_number(&serial_number)?;
    let model: DroneModel = model.parse()?;
    validate_weight_limit(weight_limit)?;
    validate_battery_capacity(battery_capacity)?;
    let state: DroneState = state.parse()?;

    if state == DroneState::Loading {
        check_loading_battery(battery_capacity)?;
    }

    Ok(DroneRegistration {
        serial_number,
        model,
        weight_limit,
        battery_capacity,
        state,
    })
}

/// Validate the medication fields of a load request.
pub fn validate_medication(input: MedicationInput) -> Result<ValidatedMedication, CoreError> {
    let name = require(input.name, "name")?;
    let weight = require(input.weight, "weight")?;
    let code = require(input.code, "code")?;

    medication::validate_name(&name)?;
    medication::validate_weight(weight)?;
    medication::validate_code(&code)?;

    Ok(ValidatedMedication { name, weight, code })
}
