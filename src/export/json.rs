//! JSON snapshot export and import
//!
//! Import never touches the caller's configuration unless the whole document
//! parses.

use std::io::Write;

use crate::error::{BurdenError, BurdenResult};
use crate::models::EstimatorConfig;

use super::snapshot::Snapshot;

/// Write a configuration as a JSON snapshot
pub fn export_json<W: Write>(
    config: &EstimatorConfig,
    writer: &mut W,
    pretty: bool,
) -> BurdenResult<()> {
    let snapshot = Snapshot::from_config(config);

    if pretty {
        serde_json::to_writer_pretty(&mut *writer, &snapshot)
    } else {
        serde_json::to_writer(&mut *writer, &snapshot)
    }
    .map_err(|e| BurdenError::Export(e.to_string()))?;

    writeln!(writer).map_err(|e| BurdenError::Export(e.to_string()))?;
    Ok(())
}

/// Render a configuration as a JSON snapshot string
pub fn to_json_string(config: &EstimatorConfig, pretty: bool) -> BurdenResult<String> {
    let mut buffer = Vec::new();
    export_json(config, &mut buffer, pretty)?;
    String::from_utf8(buffer).map_err(|e| BurdenError::Export(e.to_string()))
}

/// Parse a JSON snapshot
pub fn import_json(json_str: &str) -> BurdenResult<Snapshot> {
    serde_json::from_str(json_str).map_err(|e| BurdenError::Import(e.to_string()))
}

/// Parse a JSON snapshot and merge it into `config`
///
/// Returns the number of fields applied. On a parse failure `config` is
/// left exactly as it was.
pub fn import_json_into(json_str: &str, config: &mut EstimatorConfig) -> BurdenResult<usize> {
    let snapshot = import_json(json_str)?;
    Ok(snapshot.apply_to(config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_round_trip() {
        let config = EstimatorConfig::default();
        let json = to_json_string(&config, true).unwrap();

        let mut restored = EstimatorConfig::blank();
        let applied = import_json_into(&json, &mut restored).unwrap();

        assert_eq!(applied, 13);
        assert_eq!(restored, config);
    }

    #[test]
    fn test_compact_export_is_single_line() {
        let json = to_json_string(&EstimatorConfig::blank(), false).unwrap();
        assert_eq!(json.trim_end().lines().count(), 1);
        assert!(json.contains("\"version\":\"2.0\""));
    }

    #[test]
    fn test_parse_failure_leaves_config_untouched() {
        let mut config = EstimatorConfig::default();
        let before = config.clone();

        let err = import_json_into("{ not json", &mut config).unwrap_err();
        assert!(err.is_import());
        assert_eq!(config, before);

        // structurally wrong: items must be a list
        let err = import_json_into(
            r#"{"technicianCount": 5, "fixedOverheadCategories": [{"name": "X", "items": 3}]}"#,
            &mut config,
        )
        .unwrap_err();
        assert!(err.is_import());
        assert_eq!(config, before);
    }

    #[test]
    fn test_non_object_document_is_rejected() {
        let mut config = EstimatorConfig::blank();
        assert!(import_json_into("[1, 2, 3]", &mut config).is_err());
    }
}
