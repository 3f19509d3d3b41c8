//! Path management for burdenrate
//!
//! ## Path Resolution Order
//!
//! 1. `BURDENRATE_DIR` environment variable (if set)
//! 2. The platform config directory joined with `burdenrate`
//!    (`~/.config/burdenrate` on Linux, `%APPDATA%\burdenrate` on Windows)

use std::path::{Path, PathBuf};

use directories::BaseDirs;

use crate::error::BurdenError;

/// Environment variable overriding the settings directory
pub const DIR_ENV_VAR: &str = "BURDENRATE_DIR";

const APP_DIR_NAME: &str = "burdenrate";

/// Manages the paths used by burdenrate
#[derive(Debug, Clone)]
pub struct BurdenPaths {
    base_dir: PathBuf,
}

impl BurdenPaths {
    /// Resolve the settings directory
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, BurdenError> {
        let base_dir = match std::env::var_os(DIR_ENV_VAR) {
            Some(custom) if !custom.is_empty() => PathBuf::from(custom),
            _ => BaseDirs::new()
                .map(|dirs| dirs.config_dir().join(APP_DIR_NAME))
                .ok_or_else(|| {
                    BurdenError::Config("Could not determine a home directory".into())
                })?,
        };

        Ok(Self { base_dir })
    }

    /// Use a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Ensure the settings directory exists
    pub fn ensure_directories(&self) -> Result<(), BurdenError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| BurdenError::Io(format!("Failed to create settings directory: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BurdenPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BurdenPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();
        assert!(temp_dir.path().join("nested").is_dir());
    }
}
