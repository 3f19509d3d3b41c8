//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod category;
pub mod estimate;
pub mod io;
pub mod item;
pub mod settings;

pub use category::{handle_category_command, CategoryCommands};
pub use estimate::{handle_report_command, handle_scenarios_command, handle_summary_command};
pub use io::{handle_export_command, handle_import_command, handle_init_command};
pub use item::{handle_item_command, ItemCommands};
pub use settings::{handle_fuel_command, handle_set_command, FuelArgs, SetArgs};
