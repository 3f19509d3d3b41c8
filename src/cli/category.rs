//! Category CLI commands
//!
//! Implements CLI commands for listing and editing cost categories. The
//! benefits section holds a single category; the overhead sections hold any
//! number of them.

use clap::Subcommand;

use crate::config::Settings;
use crate::display::{format_category_details, format_category_tree};
use crate::engine::rollup::valuation_context;
use crate::engine::schedule_for;
use crate::error::BurdenResult;
use crate::services::{ConfigService, Section};
use crate::storage::Workspace;

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// List categories with their items and annual totals
    List {
        /// Only list one section (benefits, variable or fixed)
        #[arg(short, long)]
        section: Option<Section>,
    },

    /// Show category details
    Show {
        /// Section (benefits, variable or fixed)
        section: Section,
        /// Category name or ID
        category: String,
    },

    /// Add an empty overhead category
    Add {
        /// Section (variable or fixed)
        section: Section,
        /// Category name
        name: String,
    },

    /// Rename a category
    Rename {
        section: Section,
        /// Category name or ID
        category: String,
        /// New name
        name: String,
    },

    /// Remove an overhead category and its items
    Remove {
        section: Section,
        /// Category name or ID
        category: String,
    },
}

/// Handle category commands
pub fn handle_category_command(
    workspace: &Workspace,
    settings: &Settings,
    cmd: CategoryCommands,
) -> BurdenResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        CategoryCommands::List { section } => {
            let mut config = workspace.load()?;
            let ctx = valuation_context(&config, &schedule_for(&config));
            let service = ConfigService::new(&mut config);

            let sections: Vec<Section> = match section {
                Some(section) => vec![section],
                None => Section::all().to_vec(),
            };
            for (i, section) in sections.iter().enumerate() {
                if i > 0 {
                    println!();
                }
                print!(
                    "{}",
                    format_category_tree(section.title(), &service.categories(*section), &ctx, symbol)
                );
            }
        }

        CategoryCommands::Show { section, category } => {
            let mut config = workspace.load()?;
            let ctx = valuation_context(&config, &schedule_for(&config));
            let service = ConfigService::new(&mut config);
            let found = service.find_category(section, &category)?;
            print!("{}", format_category_details(found, &ctx, symbol));
        }

        CategoryCommands::Add { section, name } => {
            let id = workspace.update(|config| ConfigService::new(config).add_category(section, &name))?;
            println!("Created {} category: {}", section, name.trim());
            println!("  ID: {}", id);
        }

        CategoryCommands::Rename {
            section,
            category,
            name,
        } => {
            workspace.update(|config| {
                ConfigService::new(config).rename_category(section, &category, &name)
            })?;
            println!("Renamed '{}' to '{}'", category, name.trim());
        }

        CategoryCommands::Remove { section, category } => {
            let removed = workspace
                .update(|config| ConfigService::new(config).remove_category(section, &category))?;
            println!(
                "Removed {} category: {} ({} items)",
                section,
                removed.name,
                removed.len()
            );
        }
    }

    Ok(())
}
