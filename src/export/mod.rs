//! Export and import of the estimator configuration
//!
//! - JSON: the snapshot format, also used for the working file
//! - YAML: the same snapshot with a comment header
//! - CSV: a flat list of line items with their annual cost (export only)

pub mod csv;
pub mod json;
pub mod snapshot;
pub mod yaml;

use std::fmt;
use std::str::FromStr;

pub use self::csv::export_line_items_csv;
pub use json::{export_json, import_json, import_json_into, to_json_string};
pub use snapshot::{Snapshot, SNAPSHOT_VERSION};
pub use yaml::{export_yaml, import_yaml, import_yaml_into};

/// Output format for `export`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Yaml,
    Csv,
}

impl ExportFormat {
    /// Guess a format from a file extension, defaulting to JSON
    pub fn from_path(path: &std::path::Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Self::Yaml,
            Some("csv") => Self::Csv,
            _ => Self::Json,
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            "csv" => Ok(Self::Csv),
            other => Err(format!("Unknown format '{}'. Use json, yaml or csv", other)),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
            Self::Csv => write!(f, "csv"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_format_from_path() {
        assert_eq!(ExportFormat::from_path(Path::new("a.yml")), ExportFormat::Yaml);
        assert_eq!(ExportFormat::from_path(Path::new("a.CSV")), ExportFormat::Csv);
        assert_eq!(ExportFormat::from_path(Path::new("a.json")), ExportFormat::Json);
        assert_eq!(ExportFormat::from_path(Path::new("noext")), ExportFormat::Json);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("YAML".parse::<ExportFormat>().unwrap(), ExportFormat::Yaml);
        assert!("xml".parse::<ExportFormat>().is_err());
    }
}
