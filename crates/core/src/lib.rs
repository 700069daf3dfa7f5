//! Domain types and business rules for the drone fleet.
//!
//! This crate is pure logic: no async, no HTTP, no storage. The store and
//! API crates build on the types, state machine, and validation rules
//! defined here.

pub mod drone;
pub mod error;
pub mod medication;
pub mod types;
pub mod validation;
