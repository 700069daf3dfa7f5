pub mod drones;
pub mod health;
pub mod medications;
