//! YAML snapshot export and import
//!
//! Same document structure as the JSON snapshot, with a comment header.

use std::io::Write;

use crate::error::{BurdenError, BurdenResult};
use crate::models::EstimatorConfig;

use super::snapshot::Snapshot;

/// Write a configuration as a YAML snapshot
pub fn export_yaml<W: Write>(config: &EstimatorConfig, writer: &mut W) -> BurdenResult<()> {
    let snapshot = Snapshot::from_config(config);

    let header = format!(
        "# burdenrate configuration snapshot\n# Generated: {}\n# App Version: {}\n#\n# Import with `burdenrate import <file>`.\n\n",
        snapshot.exported_at.as_deref().unwrap_or_default(),
        snapshot.app_version.as_deref().unwrap_or_default(),
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| BurdenError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &snapshot).map_err(|e| BurdenError::Export(e.to_string()))?;

    Ok(())
}

/// Parse a YAML snapshot
pub fn import_yaml(yaml_str: &str) -> BurdenResult<Snapshot> {
    serde_yaml::from_str(yaml_str).map_err(|e| BurdenError::Import(e.to_string()))
}

/// Parse a YAML snapshot and merge it into `config`
pub fn import_yaml_into(yaml_str: &str, config: &mut EstimatorConfig) -> BurdenResult<usize> {
    let snapshot = import_yaml(yaml_str)?;
    Ok(snapshot.apply_to(config))
}
