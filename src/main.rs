use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use burdenrate::cli::{
    handle_category_command, handle_export_command, handle_fuel_command, handle_import_command,
    handle_init_command, handle_item_command, handle_report_command, handle_scenarios_command,
    handle_set_command, handle_summary_command, CategoryCommands, FuelArgs, ItemCommands, SetArgs,
};
use burdenrate::config::{BurdenPaths, Settings};
use burdenrate::export::ExportFormat;
use burdenrate::storage::{Workspace, DEFAULT_WORKSPACE_FILE};

#[derive(Parser)]
#[command(
    name = "burdenrate",
    version,
    about = "Burdened labor cost and break-even billing rate calculator",
    long_about = "burdenrate works out what one field technician costs per year \
                  (wage, insurance, payroll burden, benefits, overhead and fuel) \
                  and the hourly rate that must be billed to break even."
)]
struct Cli {
    /// Working snapshot file
    #[arg(
        short,
        long,
        global = true,
        env = "BURDENRATE_FILE",
        default_value = DEFAULT_WORKSPACE_FILE
    )]
    file: PathBuf,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the break-even dashboard
    #[command(alias = "dash")]
    Summary,

    /// Print the full cost report
    Report {
        /// Write the report as CSV to this file instead
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show utilization and headcount what-if tables
    Scenarios,

    /// Create the working file
    Init {
        /// Start with empty cost lists instead of the starter configuration
        #[arg(long)]
        blank: bool,
    },

    /// Export the configuration (json, yaml, or csv line items)
    Export {
        /// Output file path
        output: PathBuf,
        /// Export format (defaults to the file extension)
        #[arg(long)]
        format: Option<ExportFormat>,
    },

    /// Merge a JSON or YAML snapshot into the working file
    Import {
        /// Snapshot file path
        input: PathBuf,
    },

    /// Change global settings
    Set(SetArgs),

    /// Change the fuel drivers
    Fuel(FuelArgs),

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Line item management commands
    #[command(subcommand)]
    Item(ItemCommands),

    /// Show current configuration and paths
    Config,
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // Initialize paths and settings
    let paths = BurdenPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;
    let workspace = Workspace::new(&cli.file).pretty(settings.pretty_json);

    match cli.command {
        Some(Commands::Summary) => handle_summary_command(&workspace, &settings)?,
        Some(Commands::Report { output }) => handle_report_command(&workspace, &settings, output)?,
        Some(Commands::Scenarios) => handle_scenarios_command(&workspace, &settings)?,
        Some(Commands::Init { blank }) => {
            handle_init_command(&workspace, blank)?;
            if !paths.settings_file().exists() {
                settings.save(&paths)?;
            }
        }
        Some(Commands::Export { output, format }) => {
            handle_export_command(&workspace, &settings, output, format)?
        }
        Some(Commands::Import { input }) => handle_import_command(&workspace, input)?,
        Some(Commands::Set(args)) => handle_set_command(&workspace, &settings, args)?,
        Some(Commands::Fuel(args)) => handle_fuel_command(&workspace, &settings, args)?,
        Some(Commands::Category(cmd)) => handle_category_command(&workspace, &settings, cmd)?,
        Some(Commands::Item(cmd)) => handle_item_command(&workspace, &settings, cmd)?,
        Some(Commands::Config) => {
            println!("burdenrate Configuration");
            println!("========================");
            println!("Settings directory: {}", paths.base_dir().display());
            println!("Settings file:      {}", paths.settings_file().display());
            println!(
                "Working file:       {}{}",
                workspace.path().display(),
                if workspace.exists() { "" } else { " (not created yet)" }
            );
            println!();
            println!("Settings:");
            println!("  Currency symbol:  {}", settings.currency_symbol);
            println!("  Pretty JSON:      {}", settings.pretty_json);
            println!(
                "  Payroll tax rate: {:.2}%",
                settings.tax_policy.payroll_tax_rate * 100.0
            );
            println!(
                "  Unemployment:     {} (others: {})",
                settings
                    .tax_policy
                    .known_jurisdictions()
                    .iter()
                    .map(|code| format!(
                        "{} {}",
                        code,
                        settings.tax_policy.unemployment_for(code)
                    ))
                    .collect::<Vec<_>>()
                    .join(", "),
                settings.tax_policy.fallback_unemployment
            );
        }
        None => {
            println!("burdenrate - technician cost and break-even rate calculator");
            println!();
            println!("Run 'burdenrate --help' for usage information.");
            println!("Run 'burdenrate init' to create a working file.");
        }
    }

    Ok(())
}
