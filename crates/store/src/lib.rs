//! In-memory entity store for the drone fleet.
//!
//! Holds the Drone, Medication, and DroneMedication record sets for the
//! lifetime of the process. All business logic goes through the operations
//! on [`EntityStore`]; nothing else touches the record sets.

pub mod images;
pub mod models;
pub mod store;

pub use images::ImageVault;
pub use store::EntityStore;
