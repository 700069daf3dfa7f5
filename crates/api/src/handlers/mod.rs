pub mod drones;
pub mod medications;
