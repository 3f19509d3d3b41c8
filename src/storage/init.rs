//! Workspace initialization
//!
//! Handles first-run setup and the starter configuration

use crate::error::{BurdenError, BurdenResult};
use crate::models::estimator::BENEFITS_CATEGORY_NAME;
use crate::models::{Category, EstimatorConfig, FuelModel, LineItem, Recurrence};

use super::Workspace;

/// Build the starter configuration: a single service technician with a
/// typical set of benefits and overhead costs
pub fn starter_config() -> EstimatorConfig {
    use Recurrence::{Daily, Hourly, Monthly, Yearly};

    let benefits = Category::with_items(
        BENEFITS_CATEGORY_NAME,
        vec![
            LineItem::currency("Health Reimbursement", 1000.0, Monthly),
            LineItem::hours("Paid Lunch", 1.0, Daily),
            LineItem::currency("Investment Plan", 400.0, Monthly),
            LineItem::currency("Phone", 70.0, Monthly),
            LineItem::currency("Snack Bar", 19.99, Daily),
            LineItem::currency("Family Perk", 49.96, Monthly),
            LineItem::currency("Shop Upgrade Fund", 1.0, Hourly),
        ],
    );

    let variable_overhead = vec![
        Category::with_items(
            "Trucks",
            vec![
                LineItem::currency("Lease Payment", 3000.0, Yearly),
                LineItem::currency("GPS Tracker", 10.0, Monthly),
                LineItem::currency("Maintenance", 2000.0, Yearly),
                LineItem::currency("Insurance", 100.0, Monthly),
            ],
        ),
        Category::with_items(
            "Tools",
            vec![LineItem::currency("New Setup", 2000.0, Yearly)],
        ),
        Category::with_items(
            "Uniforms",
            vec![LineItem::currency("Shirts/Boots", 500.0, Yearly)],
        ),
        Category::with_items(
            "Consumables",
            vec![LineItem::currency("Zip Ties/Tape", 10.0, Daily)],
        ),
        Category::with_items(
            "Warranty",
            vec![LineItem::hours("Callback Fund", 0.5, Daily)],
        ),
        Category::with_items(
            "Training",
            vec![LineItem::currency("Certifications", 500.0, Yearly)],
        ),
        Category::with_items(
            "Advertising",
            vec![LineItem::currency("Ad Spend", 4000.0, Yearly)],
        ),
        Category::with_items(
            "Other",
            vec![
                LineItem::currency("Video Editing", 4900.0, Yearly),
                LineItem::hours("PTO Cost", 80.0, Yearly),
                LineItem::hours("Paid Holidays", 48.0, Yearly),
            ],
        ),
    ];

    let fixed_overhead = vec![
        Category::with_items(
            "Software",
            vec![
                LineItem::currency("Field Service App", 360.0, Monthly),
                LineItem::currency("Accounting", 169.0, Monthly),
                LineItem::currency("Email", 50.0, Monthly),
            ],
        ),
        Category::with_items(
            "Rent",
            vec![LineItem::currency("Shop Rent", 30000.0, Yearly)],
        ),
        Category::with_items(
            "Utilities",
            vec![LineItem::currency(
                "Gas, Electricity, Water, Wifi, Garbage",
                1000.0,
                Monthly,
            )],
        ),
        Category::with_items(
            "Professional Fees",
            vec![
                LineItem::currency("Accountant", 10000.0, Yearly),
                LineItem::currency("Bank Fees", 0.0, Yearly),
                LineItem::currency("Licensing", 1000.0, Yearly),
            ],
        ),
        Category::with_items(
            "Insurance (GL)",
            vec![LineItem::currency("General Liability", 250.0, Monthly)],
        ),
        Category::with_items(
            "Office & Janitorial",
            vec![
                LineItem::currency("Postage", 1000.0, Yearly),
                LineItem::currency("Supplies", 0.0, Yearly),
                LineItem::currency("Janitorial", 0.0, Yearly),
            ],
        ),
    ];

    EstimatorConfig {
        benefits,
        variable_overhead,
        fuel: FuelModel::default(),
        fixed_overhead,
        ..EstimatorConfig::blank()
    }
}

/// Create a new snapshot file holding the starter (or blank) configuration
///
/// Refuses to overwrite an existing file.
pub fn initialize_workspace(workspace: &Workspace, blank: bool) -> BurdenResult<EstimatorConfig> {
    let path = workspace.path();
    if workspace.exists() {
        return Err(BurdenError::Validation(format!(
            "{} already exists; remove it or pick another --file",
            path.display()
        )));
    }

    let config = if blank {
        EstimatorConfig::blank()
    } else {
        starter_config()
    };

    workspace.save(&config)?;
    tracing::info!(path = %path.display(), blank, "initialized workspace");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_starter_config_shape() {
        let config = starter_config();
        assert_eq!(config.benefits.len(), 7);
        assert_eq!(config.variable_overhead.len(), 8);
        assert_eq!(config.fixed_overhead.len(), 6);
        assert_eq!(config.variable_overhead[0].name, "Trucks");
        assert_eq!(config.fuel.annual_cost(245.0), 3920.0);
    }

    #[test]
    fn test_default_is_starter() {
        let config = EstimatorConfig::default();
        assert_eq!(config.item_count(), starter_config().item_count());
        assert_eq!(config.technician_count, 1);
        assert_eq!(config.target_billing_rate, 340.0);
    }

    #[test]
    fn test_initialize_workspace() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("shop.json");

        let config = initialize_workspace(&Workspace::new(&path), false).unwrap();
        assert!(path.exists());
        assert_eq!(config.fixed_overhead.len(), 6);

        let loaded = Workspace::new(&path).load().unwrap();
        assert_eq!(loaded.item_count(), config.item_count());
    }

    #[test]
    fn test_initialize_refuses_overwrite() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("shop.json");

        initialize_workspace(&Workspace::new(&path), true).unwrap();
        let err = initialize_workspace(&Workspace::new(&path), false).unwrap_err();
        assert!(matches!(err, BurdenError::Validation(_)));
    }
}
