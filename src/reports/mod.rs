//! Reports module for burdenrate
//!
//! Provides the cost report (dashboard and printable form) and the scenario
//! tables. Reports only reformat figures computed by the engine.

pub mod cost_report;
pub mod scenario_report;

pub use cost_report::CostReport;
pub use scenario_report::ScenarioReport;
