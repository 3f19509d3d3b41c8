//! Line item CLI commands

use clap::Subcommand;

use crate::config::Settings;
use crate::display::format_money;
use crate::engine::rollup::item_annual_cost;
use crate::engine::schedule_for;
use crate::error::{BurdenError, BurdenResult};
use crate::models::{parse_amount, ItemPatch, Recurrence, ValueUnit};
use crate::services::{ConfigService, Section};
use crate::storage::Workspace;

/// Line item subcommands
#[derive(Subcommand)]
pub enum ItemCommands {
    /// Add a line item to a category
    Add {
        /// Section (benefits, variable or fixed)
        section: Section,
        /// Item name
        name: String,
        /// Category name or ID (not needed for benefits)
        #[arg(short, long)]
        category: Option<String>,
        /// Amount (e.g., "1200" or "$1,200.00")
        #[arg(long)]
        value: Option<String>,
        /// Unit: currency, hours or days
        #[arg(short, long)]
        unit: Option<ValueUnit>,
        /// Recurrence: hourly, daily, monthly or yearly
        #[arg(short, long)]
        recurrence: Option<Recurrence>,
    },

    /// Change fields of a line item
    Update {
        section: Section,
        /// Item name or ID
        item: String,
        #[arg(short, long)]
        category: Option<String>,
        /// New name
        #[arg(short, long)]
        name: Option<String>,
        #[arg(long)]
        value: Option<String>,
        #[arg(short, long)]
        unit: Option<ValueUnit>,
        #[arg(short, long)]
        recurrence: Option<Recurrence>,
    },

    /// Remove a line item
    Remove {
        section: Section,
        /// Item name or ID
        item: String,
        #[arg(short, long)]
        category: Option<String>,
    },
}

/// Resolve the category selector, which only the overhead sections need
fn category_selector(section: Section, category: Option<String>) -> BurdenResult<String> {
    match (section, category) {
        (_, Some(category)) => Ok(category),
        (Section::Benefits, None) => Ok(String::new()),
        (section, None) => Err(BurdenError::Validation(format!(
            "--category is required for {} items",
            section
        ))),
    }
}

fn build_patch(
    name: Option<String>,
    value: Option<String>,
    unit: Option<ValueUnit>,
    recurrence: Option<Recurrence>,
) -> ItemPatch {
    ItemPatch {
        name: name.map(|n| n.trim().to_string()),
        value: value.as_deref().map(parse_amount),
        unit,
        recurrence,
    }
}

/// Handle line item commands
pub fn handle_item_command(
    workspace: &Workspace,
    settings: &Settings,
    cmd: ItemCommands,
) -> BurdenResult<()> {
    let symbol = settings.currency_symbol.as_str();

    match cmd {
        ItemCommands::Add {
            section,
            name,
            category,
            value,
            unit,
            recurrence,
        } => {
            let selector = category_selector(section, category)?;
            let patch = build_patch(Some(name), value, unit, recurrence);
            let (item, annual) = workspace.update(|config| {
                let item = ConfigService::new(config).add_item(section, &selector, &patch)?;
                let annual = item_annual_cost(&item, config, &schedule_for(config));
                Ok((item, annual))
            })?;

            println!("Added item: {}", item);
            println!("  ID: {}", item.id);
            println!("  Annual cost: {}", format_money(annual, symbol));
        }

        ItemCommands::Update {
            section,
            item,
            category,
            name,
            value,
            unit,
            recurrence,
        } => {
            let patch = build_patch(name, value, unit, recurrence);
            if patch.is_empty() {
                println!("No changes specified. Use --name, --value, --unit or --recurrence.");
                return Ok(());
            }

            let selector = category_selector(section, category)?;
            let updated = workspace.update(|config| {
                ConfigService::new(config).update_item(section, &selector, &item, &patch)
            })?;
            println!("Updated item: {}", updated);
        }

        ItemCommands::Remove {
            section,
            item,
            category,
        } => {
            let selector = category_selector(section, category)?;
            let removed = workspace
                .update(|config| ConfigService::new(config).remove_item(section, &selector, &item))?;
            println!("Removed item: {}", removed.name);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_selector() {
        assert_eq!(category_selector(Section::Benefits, None).unwrap(), "");
        assert_eq!(
            category_selector(Section::Fixed, Some("Rent".into())).unwrap(),
            "Rent"
        );

        let err = category_selector(Section::Variable, None).unwrap_err();
        assert!(matches!(err, BurdenError::Validation(_)));
    }

    #[test]
    fn test_build_patch() {
        let patch = build_patch(Some(" Tires ".into()), Some("$1,200".into()), None, None);
        assert_eq!(patch.name.as_deref(), Some("Tires"));
        assert_eq!(patch.value, Some(1200.0));
        assert!(patch.unit.is_none());

        assert!(build_patch(None, None, None, None).is_empty());
    }
}
