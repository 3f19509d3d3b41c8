//! burdenrate - burdened labor cost and break-even billing rate calculator
//!
//! This library computes what one field technician really costs a service
//! business per year (wage, insurance, statutory payroll burden, benefits,
//! per-technician overhead, fuel and a share of company overhead) and turns
//! that into the hourly rate the business must bill to break even.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `models`: The configuration value and its parts (line items, categories, wage, fuel)
//! - `engine`: Pure calculations from a configuration to an [`engine::Estimate`]
//! - `services`: Structural edits on a configuration
//! - `export`: The JSON/YAML snapshot format and CSV export
//! - `storage`: The working snapshot file
//! - `reports` / `display`: Terminal and CSV presentation
//! - `config`: Settings directory and user settings
//! - `cli`: Command handlers for the `burdenrate` binary
//! - `error`: Custom error types
//!
//! # Example
//!
//! ```rust
//! use burdenrate::engine::compute_default;
//! use burdenrate::models::EstimatorConfig;
//!
//! let estimate = compute_default(&EstimatorConfig::default());
//! assert!(estimate.pricing.break_even_rate.is_some());
//! ```

pub mod cli;
pub mod config;
pub mod display;
pub mod engine;
pub mod error;
pub mod export;
pub mod models;
pub mod reports;
pub mod services;
pub mod storage;

pub use engine::{compute, Estimate};
pub use error::{BurdenError, BurdenResult};
pub use models::EstimatorConfig;
