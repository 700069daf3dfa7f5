//! The entity store and the loading workflow.
//!
//! All record sets live behind a single `RwLock`. Reads take the read
//! guard; every multi-step mutation (uniqueness check + insert, the whole
//! loading sequence, a state transition) runs under one write guard, so
//! check-then-act sequences are atomic with respect to each other. Two
//! concurrent loads against the same `IDLE` drone serialize, and whichever
//! runs second sees the drone already in `LOADING` and fails.

use std::collections::BTreeMap;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use skydrop_core::drone::{self, DroneState};
use skydrop_core::error::CoreError;
use skydrop_core::types::RecordId;
use skydrop_core::validation::{DroneRegistration, ValidatedMedication};

use crate::models::{Drone, DroneMedication, Medication};

#[derive(Default)]
struct Inner {
    /// Keyed by serial number; BTreeMap keeps listings deterministic.
    drones: BTreeMap<String, Drone>,
    medications: BTreeMap<RecordId, Medication>,
    loads: Vec<DroneMedication>,
    next_medication_id: RecordId,
    next_load_id: RecordId,
}

impl Inner {
    fn insert_medication(&mut self, med: ValidatedMedication, image: Option<Uuid>) -> Medication {
        self.next_medication_id += 1;
        let record = Medication {
            id: self.next_medication_id,
            name: med.name,
            weight: med.weight,
            code: med.code,
            image,
            created_at: Utc::now(),
        };
        self.medications.insert(record.id, record.clone());
        record
    }

    fn insert_load(&mut self, serial: &str, medication_id: RecordId) -> DroneMedication {
        self.next_load_id += 1;
        let row = DroneMedication {
            id: self.next_load_id,
            drone_serial_number: serial.to_string(),
            medication_id,
            loaded_at: Utc::now(),
        };
        self.loads.push(row.clone());
        row
    }
}

/// Process-lifetime storage for Drone, Medication, and DroneMedication
/// records, with unique-key and referential checks enforced on every write.
#[derive(Default)]
pub struct EntityStore {
    inner: RwLock<Inner>,
}

impl EntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new drone. Fails with `DuplicateKey` if the serial number
    /// is already registered.
    pub async fn register_drone(&self, reg: DroneRegistration) -> Result<Drone, CoreError> {
        let mut inner = self.inner.write().await;
        if inner.drones.contains_key(&reg.serial_number) {
            return Err(CoreError::DuplicateKey(reg.serial_number));
        }
        let record = Drone {
            serial_number: reg.serial_number.clone(),
            model: reg.model,
            weight_limit: reg.weight_limit,
            battery_capacity: reg.battery_capacity,
            state: reg.state,
            registered_at: Utc::now(),
        };
        inner.drones.insert(reg.serial_number, record.clone());
        tracing::debug!(serial = %record.serial_number, "drone registered");
        Ok(record)
    }

    /// Look up a drone by serial number.
    pub async fn get_drone(&self, serial: &str) -> Result<Drone, CoreError> {
        let inner = self.inner.read().await;
        inner
            .drones
            .get(serial)
            .cloned()
            .ok_or_else(|| CoreError::drone_not_found(serial))
    }

    /// List all drones, in serial-number order.
    pub async fn list_drones(&self) -> Vec<Drone> {
        let inner = self.inner.read().await;
        inner.drones.values().cloned().collect()
    }

    /// List drones satisfying `predicate`.
    pub async fn list_drones_where(&self, predicate: impl Fn(&Drone) -> bool) -> Vec<Drone> {
        let inner = self.inner.read().await;
        inner
            .drones
            .values()
            .filter(|d| predicate(d))
            .cloned()
            .collect()
    }

    /// Drones available for loading: `IDLE` with battery above the loading
    /// threshold.
    pub async fn list_available_drones(&self) -> Vec<Drone> {
        self.list_drones_where(|d| {
            drone::is_loadable(d.state) && d.battery_capacity > drone::MIN_LOADING_BATTERY
        })
        .await
    }

    /// Insert a medication record and assign it an id.
    pub async fn insert_medication(
        &self,
        med: ValidatedMedication,
        image: Option<Uuid>,
    ) -> Medication {
        let mut inner = self.inner.write().await;
        inner.insert_medication(med, image)
    }

    /// Insert a DroneMedication row. Both sides must exist.
    pub async fn associate(
        &self,
        serial: &str,
        medication_id: RecordId,
    ) -> Result<DroneMedication, CoreError> {
        let mut inner = self.inner.write().await;
        if !inner.drones.contains_key(serial) {
            return Err(CoreError::drone_not_found(serial));
        }
        if !inner.medications.contains_key(&medication_id) {
            return Err(CoreError::NotFound {
                entity: "Medication",
                key: medication_id.to_string(),
            });
        }
        Ok(inner.insert_load(serial, medication_id))
    }

    /// All medication records, in id order.
    pub async fn list_medications(&self) -> Vec<Medication> {
        let inner = self.inner.read().await;
        inner.medications.values().cloned().collect()
    }

    /// Medications joined through DroneMedication for one drone.
    pub async fn list_medications_for_drone(
        &self,
        serial: &str,
    ) -> Result<Vec<Medication>, CoreError> {
        let inner = self.inner.read().await;
        if !inner.drones.contains_key(serial) {
            return Err(CoreError::drone_not_found(serial));
        }
        Ok(inner
            .loads
            .iter()
            .filter(|l| l.drone_serial_number == serial)
            .filter_map(|l| inner.medications.get(&l.medication_id))
            .cloned()
            .collect())
    }

    /// Transition a drone to a new state, enforcing the transition table
    /// and the battery gate for `LOADING`.
    pub async fn set_drone_state(
        &self,
        serial: &str,
        to: DroneState,
    ) -> Result<Drone, CoreError> {
        let mut inner = self.inner.write().await;
        let current = inner
            .drones
            .get(serial)
            .ok_or_else(|| CoreError::drone_not_found(serial))?;
        drone::validate_transition(current.state, to, current.battery_capacity)?;
        let record = inner.drones.get_mut(serial).expect("checked above");
        record.state = to;
        tracing::debug!(serial, state = to.as_str(), "drone state changed");
        Ok(record.clone())
    }

    /// The loading workflow: check-then-act as one atomic unit.
    ///
    /// Under a single write guard: verify the drone is `IDLE`, verify the
    /// medication weight fits the drone's weight limit, insert the
    /// medication, insert the association, and transition the drone into
    /// `LOADING`. On any failure nothing is committed and the drone state
    /// is untouched.
    pub async fn load_medication(
        &self,
        serial: &str,
        med: ValidatedMedication,
        image: Option<Uuid>,
    ) -> Result<Medication, CoreError> {
        let mut inner = self.inner.write().await;

        let target = inner
            .drones
            .get(serial)
            .ok_or_else(|| CoreError::drone_not_found(serial))?;

        if !drone::is_loadable(target.state) {
            return Err(CoreError::InvalidState(format!(
                "drone '{serial}' is not IDLE (currently {})",
                target.state.as_str()
            )));
        }
        // Single-medication check against the full limit; prior loads are
        // not summed (see DESIGN.md).
        if med.weight > target.weight_limit {
            return Err(CoreError::CapacityExceeded {
                weight: med.weight,
                limit: target.weight_limit,
            });
        }
        // Entering LOADING engages the battery gate.
        drone::validate_transition(target.state, DroneState::Loading, target.battery_capacity)?;

        let record = inner.insert_medication(med, image);
        inner.insert_load(serial, record.id);
        inner
            .drones
            .get_mut(serial)
            .expect("checked above")
            .state = DroneState::Loading;

        tracing::info!(serial, medication_id = record.id, "medication loaded");
        Ok(record)
    }
}
