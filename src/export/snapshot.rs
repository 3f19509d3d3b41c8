//! Configuration snapshot
//!
//! The snapshot is the only durable format: it is what `export` writes, what
//! `import` reads and what the working file holds. Every field is optional
//! so that importing a document replaces exactly the fields it contains.
//!
//! Older documents are accepted as well. They use different field names
//! (`numEmployees`, `gasParams`, ...) and may store a category collection as
//! a mapping from a key to an item list instead of a list of records.

use std::collections::HashSet;
use std::fmt;

use chrono::Utc;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::models::estimator::BENEFITS_CATEGORY_NAME;
use crate::models::numeric::{lenient_opt_count, lenient_opt_f64};
use crate::models::{Category, EstimatorConfig, FuelModel, ItemId, LineItem, WageConfig};

/// Version tag written on export
pub const SNAPSHOT_VERSION: &str = "2.0";

/// Versions this build knows how to read without a warning
pub const KNOWN_VERSIONS: [&str; 2] = ["1.0", SNAPSHOT_VERSION];

/// Item lists keyed by a legacy category key, in document order
#[derive(Debug, Clone, PartialEq, Default)]
pub struct KeyedItems(pub Vec<(String, Vec<LineItem>)>);

impl Serialize for KeyedItems {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (key, items) in &self.0 {
            map.serialize_entry(key, items)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for KeyedItems {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct KeyedVisitor;

        impl<'de> Visitor<'de> for KeyedVisitor {
            type Value = KeyedItems;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a mapping of category keys to item lists")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::new();
                while let Some((key, items)) = map.next_entry::<String, Vec<LineItem>>()? {
                    entries.push((key, items));
                }
                Ok(KeyedItems(entries))
            }
        }

        deserializer.deserialize_map(KeyedVisitor)
    }
}

/// A category collection as stored in a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CategoryCollection {
    /// Ordered list of category records
    List(Vec<Category>),
    /// Legacy mapping from key to item list
    Keyed(KeyedItems),
}

impl CategoryCollection {
    /// Resolve to categories; keyed entries become one category per key
    pub fn into_categories(self) -> Vec<Category> {
        match self {
            Self::List(categories) => categories,
            Self::Keyed(KeyedItems(entries)) => {
                tracing::warn!(keys = entries.len(), "converting legacy keyed categories");
                entries
                    .into_iter()
                    .map(|(key, items)| Category::from_legacy_key(&key, items))
                    .collect()
            }
        }
    }
}

/// The benefits category as stored in a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BenefitsShape {
    Record(Category),
    Items(Vec<LineItem>),
    /// Legacy mapping; the items of every key are concatenated
    Keyed(KeyedItems),
}

impl BenefitsShape {
    pub fn into_category(self) -> Category {
        match self {
            Self::Record(category) => category,
            Self::Items(items) => Category::with_items(BENEFITS_CATEGORY_NAME, items),
            Self::Keyed(KeyedItems(entries)) => {
                tracing::warn!(keys = entries.len(), "converting legacy keyed benefits");
                let mut seen = HashSet::new();
                let items = entries
                    .into_iter()
                    .flat_map(|(_, items)| items)
                    .map(|mut item| {
                        // Counter ids restart per key
                        while !seen.insert(item.id.clone()) {
                            item.id = ItemId::new();
                        }
                        item
                    })
                    .collect();
                Category::with_items(BENEFITS_CATEGORY_NAME, items)
            }
        }
    }
}

/// Serialized form of an [`EstimatorConfig`]
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exported_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,

    #[serde(
        alias = "numEmployees",
        deserialize_with = "lenient_opt_count",
        skip_serializing_if = "Option::is_none"
    )]
    pub technician_count: Option<u32>,
    #[serde(deserialize_with = "lenient_opt_f64", skip_serializing_if = "Option::is_none")]
    pub utilization_rate: Option<f64>,
    #[serde(
        alias = "workDays",
        deserialize_with = "lenient_opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub base_calendar_working_days: Option<f64>,
    #[serde(
        alias = "hoursPerDay",
        deserialize_with = "lenient_opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub hours_per_working_day: Option<f64>,
    #[serde(alias = "location", skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
    #[serde(
        alias = "targetRate",
        deserialize_with = "lenient_opt_f64",
        skip_serializing_if = "Option::is_none"
    )]
    pub target_billing_rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_fee_enabled: Option<bool>,
    #[serde(deserialize_with = "lenient_opt_f64", skip_serializing_if = "Option::is_none")]
    pub payment_fee_percentage: Option<f64>,

    #[serde(alias = "coreHourly", skip_serializing_if = "Option::is_none")]
    pub wage_config: Option<WageConfig>,
    #[serde(alias = "benefitsList", skip_serializing_if = "Option::is_none")]
    pub benefits_category: Option<BenefitsShape>,
    #[serde(alias = "variableOverhead", skip_serializing_if = "Option::is_none")]
    pub variable_overhead_categories: Option<CategoryCollection>,
    #[serde(alias = "gasParams", skip_serializing_if = "Option::is_none")]
    pub fuel_model: Option<FuelModel>,
    #[serde(alias = "fixedOverhead", skip_serializing_if = "Option::is_none")]
    pub fixed_overhead_categories: Option<CategoryCollection>,
}

impl Snapshot {
    /// Capture every field of a configuration
    pub fn from_config(config: &EstimatorConfig) -> Self {
        Self {
            version: Some(SNAPSHOT_VERSION.to_string()),
            exported_at: Some(Utc::now().to_rfc3339()),
            app_version: Some(env!("CARGO_PKG_VERSION").to_string()),
            technician_count: Some(config.technician_count),
            utilization_rate: Some(config.utilization_rate),
            base_calendar_working_days: Some(config.base_calendar_working_days),
            hours_per_working_day: Some(config.hours_per_working_day),
            jurisdiction: Some(config.jurisdiction.clone()),
            target_billing_rate: Some(config.target_billing_rate),
            payment_fee_enabled: Some(config.payment_fee_enabled),
            payment_fee_percentage: Some(config.payment_fee_percentage),
            wage_config: Some(config.wage),
            benefits_category: Some(BenefitsShape::Record(config.benefits.clone())),
            variable_overhead_categories: Some(CategoryCollection::List(
                config.variable_overhead.clone(),
            )),
            fuel_model: Some(config.fuel),
            fixed_overhead_categories: Some(CategoryCollection::List(config.fixed_overhead.clone())),
        }
    }

    /// Whether the version tag is missing or one this build knows
    pub fn is_known_version(&self) -> bool {
        self.version
            .as_deref()
            .map_or(true, |v| KNOWN_VERSIONS.contains(&v))
    }

    /// Merge into a configuration
    ///
    /// Each field present in the snapshot replaces the configuration's value;
    /// absent fields are left alone. Returns the number of fields applied.
    pub fn apply_to(self, config: &mut EstimatorConfig) -> usize {
        if !self.is_known_version() {
            tracing::warn!(version = ?self.version, "unrecognized snapshot version; importing anyway");
        }

        let mut applied = 0;
        if let Some(count) = self.technician_count {
            config.technician_count = count.max(1);
            applied += 1;
        }
        if let Some(rate) = self.utilization_rate {
            config.utilization_rate = rate;
            applied += 1;
        }
        if let Some(days) = self.base_calendar_working_days {
            config.base_calendar_working_days = days;
            applied += 1;
        }
        if let Some(hours) = self.hours_per_working_day {
            config.hours_per_working_day = hours;
            applied += 1;
        }
        if let Some(jurisdiction) = self.jurisdiction.filter(|j| !j.trim().is_empty()) {
            config.jurisdiction = jurisdiction;
            applied += 1;
        }
        if let Some(rate) = self.target_billing_rate {
            config.target_billing_rate = rate;
            applied += 1;
        }
        if let Some(enabled) = self.payment_fee_enabled {
            config.payment_fee_enabled = enabled;
            applied += 1;
        }
        if let Some(pct) = self.payment_fee_percentage {
            config.payment_fee_percentage = pct;
            applied += 1;
        }
        if let Some(wage) = self.wage_config {
            config.wage = wage;
            applied += 1;
        }
        if let Some(benefits) = self.benefits_category {
            config.benefits = benefits.into_category();
            applied += 1;
        }
        if let Some(variable) = self.variable_overhead_categories {
            config.variable_overhead = variable.into_categories();
            applied += 1;
        }
        if let Some(fuel) = self.fuel_model {
            config.fuel = fuel;
            applied += 1;
        }
        if let Some(fixed) = self.fixed_overhead_categories {
            config.fixed_overhead = fixed.into_categories();
            applied += 1;
        }

        applied
    }

    /// Build a full configuration by merging onto `base`
    pub fn into_config(self, base: EstimatorConfig) -> EstimatorConfig {
        let mut config = base;
        self.apply_to(&mut config);
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::compute_default;
    use crate::models::{Recurrence, ValueUnit};

    const LEGACY_DOCUMENT: &str = r#"{
        "version": "1.0",
        "numEmployees": 3,
        "utilizationRate": 70,
        "workDays": 250,
        "location": "IL",
        "targetRate": 300,
        "coreHourly": {
            "wage": {"value": 32, "freq": "hourly"},
            "insurance": {"value": 2, "freq": "hourly"}
        },
        "benefitsList": {
            "general": [
                {"id": 1, "name": "Health", "value": 900, "freq": "monthly", "unit": "currency"},
                {"id": 2, "name": "PTO", "value": 10, "freq": "yearly", "unit": "days"}
            ]
        },
        "variableOverhead": {
            "trucks": [{"id": 3, "name": "Lease", "value": 3000, "freq": "yearly"}],
            "tools": [{"id": 4, "name": "Setup", "value": "2,000", "freq": "yearly"}],
            "advertising": []
        },
        "gasParams": {"isOpen": false, "milesPerDay": 50, "mpg": 25, "gasPrice": 4, "annualCost": 1},
        "fixedOverhead": {
            "software": [{"id": 5, "name": "Jobber", "value": 360, "freq": "monthly"}]
        }
    }"#;

    #[test]
    fn test_legacy_document_import() {
        let snapshot: Snapshot = serde_json::from_str(LEGACY_DOCUMENT).unwrap();
        let config = snapshot.into_config(EstimatorConfig::blank());

        assert_eq!(config.technician_count, 3);
        assert_eq!(config.utilization_rate, 70.0);
        assert_eq!(config.base_calendar_working_days, 250.0);
        assert_eq!(config.jurisdiction, "IL");
        assert_eq!(config.target_billing_rate, 300.0);
        assert_eq!(config.wage.hourly_wage(), 32.0);

        assert_eq!(config.benefits.name, BENEFITS_CATEGORY_NAME);
        assert_eq!(config.benefits.items.len(), 2);
        assert_eq!(config.benefits.items[1].unit, ValueUnit::Days);

        let names: Vec<&str> = config.variable_overhead.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Trucks", "Tools", "Advertising"]);
        assert_eq!(config.variable_overhead[1].items[0].value, 2000.0);
        assert_eq!(config.fixed_overhead[0].name, "Software");
        assert_eq!(config.fixed_overhead[0].items[0].recurrence, Recurrence::Monthly);

        assert_eq!(config.fuel.miles_per_working_day, 50.0);
        assert_eq!(config.fuel.annual_cost(240.0), 8.0 * 240.0);
    }

    #[test]
    fn test_partial_import_changes_only_present_fields() {
        let mut config = EstimatorConfig::default();
        let before = config.clone();

        let snapshot: Snapshot =
            serde_json::from_str(r#"{"targetBillingRate": 199, "jurisdiction": "IL"}"#).unwrap();
        let applied = snapshot.apply_to(&mut config);

        assert_eq!(applied, 2);
        assert_eq!(config.target_billing_rate, 199.0);
        assert_eq!(config.jurisdiction, "IL");
        assert_eq!(config.technician_count, before.technician_count);
        assert_eq!(config.benefits, before.benefits);
        assert_eq!(config.variable_overhead, before.variable_overhead);
        assert_eq!(config.fixed_overhead, before.fixed_overhead);
        assert_eq!(config.fuel, before.fuel);
        assert_eq!(config.wage, before.wage);
    }

    #[test]
    fn test_empty_jurisdiction_is_skipped() {
        let mut config = EstimatorConfig::blank();
        let snapshot: Snapshot = serde_json::from_str(r#"{"location": ""}"#).unwrap();
        assert_eq!(snapshot.apply_to(&mut config), 0);
        assert_eq!(config.jurisdiction, "WI");
    }

    #[test]
    fn test_round_trip_preserves_estimate() {
        let config = EstimatorConfig::default();
        let json = serde_json::to_string(&Snapshot::from_config(&config)).unwrap();
        let restored = serde_json::from_str::<Snapshot>(&json)
            .unwrap()
            .into_config(EstimatorConfig::blank());

        assert_eq!(restored, config);
        assert_eq!(compute_default(&restored), compute_default(&config));
    }

    #[test]
    fn test_export_uses_current_field_names() {
        let json = serde_json::to_value(Snapshot::from_config(&EstimatorConfig::default())).unwrap();
        assert_eq!(json["version"], SNAPSHOT_VERSION);
        assert!(json.get("technicianCount").is_some());
        assert!(json.get("variableOverheadCategories").unwrap().is_array());
        assert!(json["benefitsCategory"].get("items").is_some());
        assert!(json["fuelModel"].get("milesPerWorkingDay").is_some());
        assert!(json.get("numEmployees").is_none());
    }

    #[test]
    fn test_benefits_as_bare_list() {
        let snapshot: Snapshot = serde_json::from_str(
            r#"{"benefitsCategory": [{"name": "Phone", "value": 70, "recurrence": "monthly"}]}"#,
        )
        .unwrap();
        let config = snapshot.into_config(EstimatorConfig::blank());
        assert_eq!(config.benefits.name, BENEFITS_CATEGORY_NAME);
        assert_eq!(config.benefits.items[0].name, "Phone");
    }

    #[test]
    fn test_keyed_benefits_concatenate_in_order() {
        let snapshot: Snapshot = serde_json::from_str(
            r#"{"benefitsList": {"b": [{"name": "First"}], "a": [{"name": "Second"}, {"name": "Third"}]}}"#,
        )
        .unwrap();
        let config = snapshot.into_config(EstimatorConfig::blank());
        let names: Vec<&str> = config.benefits.items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_keyed_benefits_get_unique_ids() {
        let snapshot: Snapshot = serde_json::from_str(
            r#"{"benefitsList": {
                "health": [{"id": 1, "name": "Dental"}, {"id": 2, "name": "Vision"}],
                "perks": [{"id": 1, "name": "Phone"}]
            }}"#,
        )
        .unwrap();
        let config = snapshot.into_config(EstimatorConfig::blank());
        let items = &config.benefits.items;

        assert_eq!(items.len(), 3);
        assert_eq!(items[0].id.as_str(), "1");
        assert_eq!(items[1].id.as_str(), "2");
        assert_eq!(items[2].name, "Phone");
        assert_ne!(items[2].id, items[0].id);
        assert_ne!(items[2].id, items[1].id);
    }

    #[test]
    fn test_unknown_tags_contribute_zero() {
        let snapshot: Snapshot = serde_json::from_str(
            r#"{"fixedOverheadCategories": [{"name": "Odd", "items": [
                {"name": "Mystery", "value": 500, "recurrence": "fortnightly"},
                {"name": "Widgets", "value": 5, "unit": "widgets", "recurrence": "yearly"}
            ]}]}"#,
        )
        .unwrap();
        let mut config = EstimatorConfig::blank();
        snapshot.apply_to(&mut config);

        assert_eq!(config.fixed_overhead[0].items[0].recurrence, Recurrence::Unknown);
        assert_eq!(config.fixed_overhead[0].items[1].unit, ValueUnit::Unknown);
        assert_eq!(compute_default(&config).costs.total_annual_fixed_cost, 0.0);
    }

    #[test]
    fn test_unknown_version_still_imports() {
        let snapshot: Snapshot =
            serde_json::from_str(r#"{"version": "9.9", "technicianCount": 4}"#).unwrap();
        assert!(!snapshot.is_known_version());
        let config = snapshot.into_config(EstimatorConfig::blank());
        assert_eq!(config.technician_count, 4);
    }

    #[test]
    fn test_zero_technicians_clamped_on_import() {
        let snapshot: Snapshot = serde_json::from_str(r#"{"numEmployees": 0}"#).unwrap();
        let config = snapshot.into_config(EstimatorConfig::blank());
        assert_eq!(config.technician_count, 1);
    }

    #[test]
    fn test_malformed_numbers_default_to_zero() {
        let snapshot: Snapshot =
            serde_json::from_str(r#"{"targetRate": "lots", "workDays": "245"}"#).unwrap();
        let config = snapshot.into_config(EstimatorConfig::blank());
        assert_eq!(config.target_billing_rate, 0.0);
        assert_eq!(config.base_calendar_working_days, 245.0);
    }
}
