//! Drone model/state enums and the state machine rules.
//!
//! The only hard precondition in the fleet's lifecycle is the battery gate
//! on entering `LOADING`; the rest of the graph is an explicit transition
//! table enforced by [`validate_transition`].

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Minimum battery percentage required to enter the `LOADING` state.
pub const MIN_LOADING_BATTERY: f64 = 25.0;

/// Drone weight class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DroneModel {
    Lightweight,
    Middleweight,
    Cruiserweight,
    Heavyweight,
}

/// Drone lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DroneState {
    Idle,
    Loading,
    Loaded,
    Delivering,
    Delivered,
    Returning,
}

impl DroneState {
    /// Wire representation, matching the serde rename.
    pub fn as_str(&self) -> &'static str {
        match self {
            DroneState::Idle => "IDLE",
            DroneState::Loading => "LOADING",
            DroneState::Loaded => "LOADED",
            DroneState::Delivering => "DELIVERING",
            DroneState::Delivered => "DELIVERED",
            DroneState::Returning => "RETURNING",
        }
    }

    /// Whether `self -> to` is a legal edge in the transition graph.
    ///
    /// `LOADING` and `LOADED` may fall back to `IDLE` (aborted load);
    /// delivery states advance linearly and `RETURNING` closes the cycle.
    pub fn can_transition_to(&self, to: DroneState) -> bool {
        use DroneState::*;
        matches!(
            (*self, to),
            (Idle, Loading)
                | (Loading, Loaded)
                | (Loading, Idle)
                | (Loaded, Delivering)
                | (Loaded, Idle)
                | (Delivering, Delivered)
                | (Delivered, Returning)
                | (Returning, Idle)
        )
    }
}

impl std::str::FromStr for DroneModel {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Lightweight" => Ok(DroneModel::Lightweight),
            "Middleweight" => Ok(DroneModel::Middleweight),
            "Cruiserweight" => Ok(DroneModel::Cruiserweight),
            "Heavyweight" => Ok(DroneModel::Heavyweight),
            other => Err(CoreError::InvalidInput(format!(
                "unknown drone model '{other}'"
            ))),
        }
    }
}

impl std::str::FromStr for DroneState {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IDLE" => Ok(DroneState::Idle),
            "LOADING" => Ok(DroneState::Loading),
            "LOADED" => Ok(DroneState::Loaded),
            "DELIVERING" => Ok(DroneState::Delivering),
            "DELIVERED" => Ok(DroneState::Delivered),
            "RETURNING" => Ok(DroneState::Returning),
            other => Err(CoreError::InvalidInput(format!(
                "unknown drone state '{other}'"
            ))),
        }
    }
}

/// A drone is loadable only while sitting in `IDLE`.
pub fn is_loadable(state: DroneState) -> bool {
    state == DroneState::Idle
}

/// Check the battery gate for entering `LOADING`.
pub fn check_loading_battery(battery_capacity: f64) -> Result<(), CoreError> {
    if battery_capacity < MIN_LOADING_BATTERY {
        return Err(CoreError::PreconditionFailed(format!(
            "battery level below 25% (currently {battery_capacity}%)"
        )));
    }
    Ok(())
}

/// Validate a state transition against the table and its preconditions.
pub fn validate_transition(
    from: DroneState,
    to: DroneState,
    battery_capacity: f64,
) -> Result<(), CoreError> {
    if !from.can_transition_to(to) {
        return Err(CoreError::InvalidState(format!(
            "illegal transition {} -> {}",
            from.as_str(),
            to.as_str()
        )));
    }
    if to == DroneState::Loading {
        check_loading_battery(battery_capacity)?;
    }
    Ok(())
}
