//! Service layer for burdenrate
//!
//! Structural edits to categories and line items, and a service that applies
//! them (and the global settings) to a configuration.

pub mod category;
pub mod config;

pub use config::{ConfigService, FuelPatch, Section};
