//! Working-file storage
//!
//! A workspace is a single snapshot file holding the current configuration.
//! Editing commands load it, apply one change and save it back atomically.

pub mod file_io;
pub mod init;

use std::path::{Path, PathBuf};

pub use file_io::{read_json, read_text, write_atomic, write_json_atomic};
pub use init::{initialize_workspace, starter_config};

use crate::error::{BurdenError, BurdenResult};
use crate::export::json::{import_json, to_json_string};
use crate::models::EstimatorConfig;

/// Default working file name in the current directory
pub const DEFAULT_WORKSPACE_FILE: &str = "burdenrate.json";

/// A snapshot file holding the working configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    path: PathBuf,
    pretty: bool,
}

impl Workspace {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            pretty: true,
        }
    }

    /// Choose between pretty-printed and compact JSON on save
    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the configuration
    ///
    /// A missing file yields the starter configuration. The file is merged
    /// onto the starter configuration, so fields it lacks keep their defaults.
    pub fn load(&self) -> BurdenResult<EstimatorConfig> {
        let Some(contents) = read_text(&self.path)? else {
            tracing::debug!(path = %self.path.display(), "no working file; using starter configuration");
            return Ok(EstimatorConfig::default());
        };

        let snapshot = import_json(&contents).map_err(|e| {
            BurdenError::Import(format!("{} is not a valid snapshot: {}", self.path.display(), e))
        })?;

        let mut config = EstimatorConfig::default();
        let applied = snapshot.apply_to(&mut config);
        tracing::debug!(path = %self.path.display(), fields = applied, "loaded working file");
        Ok(config)
    }

    /// Save the configuration as a JSON snapshot
    pub fn save(&self, config: &EstimatorConfig) -> BurdenResult<()> {
        let json = to_json_string(config, self.pretty)?;
        write_atomic(&self.path, json.as_bytes())?;
        tracing::info!(path = %self.path.display(), "saved working file");
        Ok(())
    }

    /// Load, apply a change and save
    pub fn update<T, F>(&self, change: F) -> BurdenResult<T>
    where
        F: FnOnce(&mut EstimatorConfig) -> BurdenResult<T>,
    {
        let mut config = self.load()?;
        let result = change(&mut config)?;
        self.save(&config)?;
        Ok(result)
    }
}
