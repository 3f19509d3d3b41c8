//! User settings for burdenrate
//!
//! Display preferences and the statutory tax policy used by the cost
//! roll-up. The working configuration itself lives in the snapshot file, not
//! here.

use serde::{Deserialize, Serialize};

use super::paths::BurdenPaths;
use crate::error::BurdenError;
use crate::models::TaxPolicy;
use crate::storage::file_io::{read_json, write_json_atomic};

/// User settings for burdenrate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used in reports
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Whether exported JSON is pretty-printed
    #[serde(default = "default_pretty_json")]
    pub pretty_json: bool,

    /// Payroll tax rate and unemployment insurance table
    #[serde(default)]
    pub tax_policy: TaxPolicy,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_pretty_json() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            pretty_json: default_pretty_json(),
            tax_policy: TaxPolicy::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or default settings if the file doesn't exist
    pub fn load_or_create(paths: &BurdenPaths) -> Result<Self, BurdenError> {
        read_json(paths.settings_file()).map_err(|e| {
            BurdenError::Config(format!("Failed to load settings: {}", e))
        })
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BurdenPaths) -> Result<(), BurdenError> {
        paths.ensure_directories()?;
        write_json_atomic(paths.settings_file(), self)
    }
}
