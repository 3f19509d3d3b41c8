//! Working file CLI commands
//!
//! Creating the working file, exporting it in another format and merging a
//! snapshot into it.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::config::Settings;
use crate::error::{BurdenError, BurdenResult};
use crate::export::{export_json, export_line_items_csv, export_yaml, import_json, import_yaml, ExportFormat};
use crate::storage::{initialize_workspace, read_text, Workspace};

/// Handle the init command
pub fn handle_init_command(workspace: &Workspace, blank: bool) -> BurdenResult<()> {
    let config = initialize_workspace(workspace, blank)?;

    println!("Created {}", workspace.path().display());
    if blank {
        println!("Started from a blank configuration.");
    } else {
        println!();
        println!("The starter configuration includes:");
        println!("  - Benefits: {} items", config.benefits.len());
        println!(
            "  - Variable overhead: {} categories",
            config.variable_overhead.len()
        );
        println!("  - Fixed overhead: {} categories", config.fixed_overhead.len());
        println!("  - Fuel: {} miles/day", config.fuel.miles_per_working_day);
    }
    println!();
    println!("Run 'burdenrate summary' to see the break-even rate.");

    Ok(())
}

fn create_file(path: &Path) -> BurdenResult<BufWriter<File>> {
    let file = File::create(path).map_err(|e| {
        BurdenError::Export(format!("Failed to create file {}: {}", path.display(), e))
    })?;
    Ok(BufWriter::new(file))
}

/// Handle the export command
///
/// Without `--format` the format follows the output file's extension.
pub fn handle_export_command(
    workspace: &Workspace,
    settings: &Settings,
    output: PathBuf,
    format: Option<ExportFormat>,
) -> BurdenResult<()> {
    let config = workspace.load()?;
    let format = format.unwrap_or_else(|| ExportFormat::from_path(&output));
    let mut writer = create_file(&output)?;

    match format {
        ExportFormat::Json => {
            export_json(&config, &mut writer, settings.pretty_json)?;
            println!("Configuration exported to: {}", output.display());
        }
        ExportFormat::Yaml => {
            export_yaml(&config, &mut writer)?;
            println!("Configuration exported to: {}", output.display());
        }
        ExportFormat::Csv => {
            let count = export_line_items_csv(&config, &mut writer)?;
            println!("Exported {} line items to: {}", count, output.display());
        }
    }

    writer.flush()?;
    Ok(())
}

/// Handle the import command
///
/// The snapshot is parsed completely before the working file is touched, so
/// a malformed file leaves it unchanged.
pub fn handle_import_command(workspace: &Workspace, input: PathBuf) -> BurdenResult<()> {
    let contents = read_text(&input)?
        .ok_or_else(|| BurdenError::Import(format!("{} does not exist", input.display())))?;

    let snapshot = match ExportFormat::from_path(&input) {
        ExportFormat::Json => import_json(&contents)?,
        ExportFormat::Yaml => import_yaml(&contents)?,
        ExportFormat::Csv => {
            return Err(BurdenError::Import(
                "CSV files cannot be imported; use a JSON or YAML snapshot".into(),
            ))
        }
    };

    let applied = workspace.update(|config| Ok(snapshot.apply_to(config)))?;
    println!(
        "Imported {} fields from {} into {}",
        applied,
        input.display(),
        workspace.path().display()
    );

    Ok(())
}
