//! Core data models for burdenrate
//!
//! This module contains the data structures that describe a technician cost
//! configuration: line items, categories, wage inputs, the fuel model and the
//! statutory tax policy.

pub mod category;
pub mod estimator;
pub mod ids;
pub mod line_item;
pub mod numeric;
pub mod policy;
pub mod recurrence;

pub use category::Category;
pub use estimator::{EstimatorConfig, FuelModel, RateInput, WageConfig};
pub use ids::{CategoryId, ItemId};
pub use line_item::{ItemPatch, LineItem};
pub use numeric::parse_amount;
pub use policy::TaxPolicy;
pub use recurrence::{Recurrence, ValueUnit};
