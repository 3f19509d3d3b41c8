//! Estimate CLI commands
//!
//! Renders the dashboard, the printable report and the scenario tables for
//! the working file.

use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use crate::config::Settings;
use crate::engine::{compute, Estimate};
use crate::error::{BurdenError, BurdenResult};
use crate::models::EstimatorConfig;
use crate::reports::{CostReport, ScenarioReport};
use crate::storage::Workspace;

fn load_estimate(
    workspace: &Workspace,
    settings: &Settings,
) -> BurdenResult<(EstimatorConfig, Estimate)> {
    let config = workspace.load()?;
    let estimate = compute(&config, &settings.tax_policy);
    Ok((config, estimate))
}

/// Handle the summary command
pub fn handle_summary_command(workspace: &Workspace, settings: &Settings) -> BurdenResult<()> {
    let (config, estimate) = load_estimate(workspace, settings)?;
    let report = CostReport::generate(&config, &estimate);
    print!("{}", report.format_dashboard(&settings.currency_symbol));
    Ok(())
}

/// Handle the report command, printing it or writing it as CSV
pub fn handle_report_command(
    workspace: &Workspace,
    settings: &Settings,
    output: Option<PathBuf>,
) -> BurdenResult<()> {
    let (config, estimate) = load_estimate(workspace, settings)?;
    let report = CostReport::generate(&config, &estimate);

    match output {
        Some(path) => {
            let file = File::create(&path).map_err(|e| {
                BurdenError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            report.export_csv(BufWriter::new(file))?;
            println!("Report exported to: {}", path.display());
        }
        None => print!("{}", report.format_terminal(&settings.currency_symbol)),
    }

    Ok(())
}

/// Handle the scenarios command
pub fn handle_scenarios_command(workspace: &Workspace, settings: &Settings) -> BurdenResult<()> {
    let (_, estimate) = load_estimate(workspace, settings)?;
    let report = ScenarioReport::generate(&estimate);
    print!("{}", report.format_terminal(&settings.currency_symbol));
    Ok(())
}
