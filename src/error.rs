//! Custom error types for burdenrate
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions. The calculation engine itself never fails;
//! only file I/O, snapshot parsing and command-line lookups produce errors.

use thiserror::Error;

/// The main error type for burdenrate operations
#[derive(Error, Debug)]
pub enum BurdenError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// YAML serialization/deserialization errors
    #[error("YAML error: {0}")]
    Yaml(String),

    /// Validation errors for user input
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Snapshot import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Snapshot export errors
    #[error("Export error: {0}")]
    Export(String),
}

impl BurdenError {
    /// Create a "not found" error for categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for line items
    pub fn item_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Line item",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an import error
    pub fn is_import(&self) -> bool {
        matches!(self, Self::Import(_))
    }
}

impl From<std::io::Error> for BurdenError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BurdenError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for BurdenError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Yaml(err.to_string())
    }
}

/// Result type alias for burdenrate operations
pub type BurdenResult<T> = Result<T, BurdenError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BurdenError::Config("bad settings".into());
        assert_eq!(err.to_string(), "Configuration error: bad settings");
    }

    #[test]
    fn test_not_found_error() {
        let err = BurdenError::category_not_found("Trucks");
        assert_eq!(err.to_string(), "Category not found: Trucks");
        assert!(err.is_not_found());

        let err = BurdenError::item_not_found("itm-1234");
        assert_eq!(err.to_string(), "Line item not found: itm-1234");
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: BurdenError = io_err.into();
        assert!(matches!(err, BurdenError::Io(_)));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<u32>("not json").unwrap_err();
        let err: BurdenError = json_err.into();
        assert!(matches!(err, BurdenError::Json(_)));
        assert!(!err.is_import());
    }
}
