//! Configuration module for burdenrate
//!
//! - Settings directory resolution
//! - User settings persistence (display preferences, tax policy)

pub mod paths;
pub mod settings;

pub use paths::BurdenPaths;
pub use settings::Settings;
