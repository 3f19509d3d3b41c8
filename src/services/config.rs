//! Configuration service
//!
//! Applies edits to an [`EstimatorConfig`]: category and item changes
//! addressed by section, and the scalar global settings. Lookups by name or
//! id that find nothing are reported as `NotFound`.

use std::fmt;
use std::str::FromStr;

use crate::error::{BurdenError, BurdenResult};
use crate::models::estimator::clamp_utilization;
use crate::models::{Category, CategoryId, EstimatorConfig, ItemId, ItemPatch, LineItem, RateInput};

use super::category;

/// Part of the configuration holding categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    /// The singleton benefits category
    Benefits,
    /// Per-technician overhead
    Variable,
    /// Company-wide overhead
    Fixed,
}

impl Section {
    pub fn all() -> &'static [Section] {
        &[Self::Benefits, Self::Variable, Self::Fixed]
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Benefits => "benefits",
            Self::Variable => "variable",
            Self::Fixed => "fixed",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Benefits => "Benefits",
            Self::Variable => "Variable Overhead (per technician)",
            Self::Fixed => "Fixed Overhead (company-wide)",
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Section {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "benefits" | "benefit" => Ok(Self::Benefits),
            "variable" | "var" => Ok(Self::Variable),
            "fixed" => Ok(Self::Fixed),
            other => Err(format!(
                "Unknown section '{}'. Use benefits, variable or fixed",
                other
            )),
        }
    }
}

/// Partial update of the fuel model
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FuelPatch {
    pub miles_per_working_day: Option<f64>,
    pub miles_per_gallon: Option<f64>,
    pub price_per_gallon: Option<f64>,
}

/// Service for editing a configuration
pub struct ConfigService<'a> {
    config: &'a mut EstimatorConfig,
}

impl<'a> ConfigService<'a> {
    /// Create a new config service
    pub fn new(config: &'a mut EstimatorConfig) -> Self {
        Self { config }
    }

    /// Categories in a section, in display order
    pub fn categories(&self, section: Section) -> Vec<&Category> {
        match section {
            Section::Benefits => vec![&self.config.benefits],
            Section::Variable => self.config.variable_overhead.iter().collect(),
            Section::Fixed => self.config.fixed_overhead.iter().collect(),
        }
    }

    /// Find a category by id or case-insensitive name
    ///
    /// The benefits section has a single category, matched by any selector.
    pub fn find_category(&self, section: Section, selector: &str) -> BurdenResult<&Category> {
        match section {
            Section::Benefits => Ok(&self.config.benefits),
            Section::Variable => find_in(&self.config.variable_overhead, selector),
            Section::Fixed => find_in(&self.config.fixed_overhead, selector),
        }
    }

    /// Find an item by id or case-insensitive name within a category
    pub fn find_item(
        &self,
        section: Section,
        category_selector: &str,
        item_selector: &str,
    ) -> BurdenResult<&LineItem> {
        let category = self.find_category(section, category_selector)?;
        select_one(
            &category.items,
            item_selector,
            |item, s| item.id.matches_exactly(s),
            |item, s| item.id.matches(s),
            |item| item.name.as_str(),
        )?
        .ok_or_else(|| BurdenError::item_not_found(item_selector))
    }

    // === Category operations ===

    /// Add an empty category to an overhead section
    pub fn add_category(&mut self, section: Section, name: &str) -> BurdenResult<CategoryId> {
        let name = validate_name(name)?;
        let collection = self.collection_mut(section)?;
        let updated = category::add_category(std::mem::take(collection), name);
        let id = updated
            .last()
            .map(|c| c.id.clone())
            .ok_or_else(|| BurdenError::Validation("category was not added".into()))?;
        *collection = updated;
        tracing::info!(section = %section, name, "added category");
        Ok(id)
    }

    /// Rename a category
    pub fn rename_category(&mut self, section: Section, selector: &str, name: &str) -> BurdenResult<()> {
        let name = validate_name(name)?;
        let id = self.find_category(section, selector)?.id.clone();

        if section == Section::Benefits {
            self.config.benefits.name = name.to_string();
            return Ok(());
        }

        let collection = self.collection_mut(section)?;
        *collection = category::rename_category(std::mem::take(collection), &id, name);
        Ok(())
    }

    /// Remove a category and all of its items
    pub fn remove_category(&mut self, section: Section, selector: &str) -> BurdenResult<Category> {
        let removed = self.find_category(section, selector)?.clone();
        let collection = self.collection_mut(section)?;
        *collection = category::remove_category(std::mem::take(collection), &removed.id);
        tracing::info!(section = %section, name = %removed.name, "removed category");
        Ok(removed)
    }

    // === Item operations ===

    /// Add an item with default fields, then apply `patch` to it
    pub fn add_item(
        &mut self,
        section: Section,
        category_selector: &str,
        patch: &ItemPatch,
    ) -> BurdenResult<LineItem> {
        let item = patch.apply(&LineItem::default());
        let id = self.find_category(section, category_selector)?.id.clone();
        self.edit_category(section, &id, |c| category::push_item(c, item.clone()))?;
        Ok(item)
    }

    /// Update the specified fields of an item
    pub fn update_item(
        &mut self,
        section: Section,
        category_selector: &str,
        item_selector: &str,
        patch: &ItemPatch,
    ) -> BurdenResult<LineItem> {
        let item = self.find_item(section, category_selector, item_selector)?;
        let updated = patch.apply(item);
        let item_id = item.id.clone();
        let category_id = self.find_category(section, category_selector)?.id.clone();
        self.edit_category(section, &category_id, |c| category::update_item(c, &item_id, patch))?;
        Ok(updated)
    }

    /// Remove an item
    pub fn remove_item(
        &mut self,
        section: Section,
        category_selector: &str,
        item_selector: &str,
    ) -> BurdenResult<LineItem> {
        let removed = self
            .find_item(section, category_selector, item_selector)?
            .clone();
        let category_id = self.find_category(section, category_selector)?.id.clone();
        self.edit_category(section, &category_id, |c| category::remove_item(c, &removed.id))?;
        Ok(removed)
    }

    // === Global settings ===

    /// Set the technician count (at least 1)
    pub fn set_technician_count(&mut self, count: u32) {
        self.config.technician_count = count.max(1);
    }

    /// Set utilization, clamped to 0-100
    pub fn set_utilization(&mut self, rate: f64) {
        self.config.utilization_rate = clamp_utilization(rate);
    }

    pub fn set_working_days(&mut self, days: f64) {
        self.config.base_calendar_working_days = days.max(0.0);
    }

    pub fn set_hours_per_day(&mut self, hours: f64) {
        self.config.hours_per_working_day = hours.max(0.0);
    }

    pub fn set_jurisdiction(&mut self, code: &str) -> BurdenResult<()> {
        let code = code.trim();
        if code.is_empty() {
            return Err(BurdenError::Validation("Jurisdiction cannot be empty".into()));
        }
        self.config.jurisdiction = code.to_ascii_uppercase();
        Ok(())
    }

    pub fn set_target_rate(&mut self, rate: f64) {
        self.config.target_billing_rate = rate;
    }

    /// Turn the payment fee on or off, optionally changing its percentage
    pub fn set_payment_fee(&mut self, enabled: Option<bool>, percentage: Option<f64>) {
        if let Some(enabled) = enabled {
            self.config.payment_fee_enabled = enabled;
        }
        if let Some(percentage) = percentage {
            self.config.payment_fee_percentage = percentage;
        }
    }

    pub fn set_wage(&mut self, wage: RateInput) {
        self.config.wage.wage = wage;
    }

    pub fn set_insurance(&mut self, insurance: RateInput) {
        self.config.wage.insurance = insurance;
    }

    /// Update any of the fuel drivers
    pub fn set_fuel(&mut self, patch: FuelPatch) {
        let fuel = &mut self.config.fuel;
        if let Some(miles) = patch.miles_per_working_day {
            fuel.miles_per_working_day = miles;
        }
        if let Some(mpg) = patch.miles_per_gallon {
            fuel.miles_per_gallon = mpg;
        }
        if let Some(price) = patch.price_per_gallon {
            fuel.price_per_gallon = price;
        }
    }

    fn collection_mut(&mut self, section: Section) -> BurdenResult<&mut Vec<Category>> {
        match section {
            Section::Benefits => Err(BurdenError::Validation(
                "The benefits section is a single category; it cannot hold other categories".into(),
            )),
            Section::Variable => Ok(&mut self.config.variable_overhead),
            Section::Fixed => Ok(&mut self.config.fixed_overhead),
        }
    }

    fn edit_category<F>(&mut self, section: Section, id: &CategoryId, edit: F) -> BurdenResult<()>
    where
        F: FnOnce(Category) -> Category,
    {
        let target = match section {
            Section::Benefits => &mut self.config.benefits,
            Section::Variable | Section::Fixed => self
                .collection_mut(section)?
                .iter_mut()
                .find(|c| &c.id == id)
                .ok_or_else(|| BurdenError::category_not_found(id.as_str()))?,
        };
        let placeholder = Category::new(String::new());
        let current = std::mem::replace(target, placeholder);
        *target = edit(current);
        Ok(())
    }
}

fn find_in<'c>(categories: &'c [Category], selector: &str) -> BurdenResult<&'c Category> {
    select_one(
        categories,
        selector,
        |c, s| c.id.matches_exactly(s),
        |c, s| c.id.matches(s),
        |c| c.name.as_str(),
    )?
    .ok_or_else(|| BurdenError::category_not_found(selector))
}

/// Resolve a selector to at most one entry
///
/// An exact id wins, then an id prefix, then a case-insensitive name. A
/// prefix or name shared by several entries is an error rather than a guess.
fn select_one<'c, T>(
    entries: &'c [T],
    selector: &str,
    exact_id: impl Fn(&T, &str) -> bool,
    id_prefix: impl Fn(&T, &str) -> bool,
    name: impl Fn(&T) -> &str,
) -> BurdenResult<Option<&'c T>> {
    if let Some(entry) = entries.iter().find(|e| exact_id(*e, selector)) {
        return Ok(Some(entry));
    }

    let trimmed = selector.trim();
    let by_prefix: Vec<&T> = entries.iter().filter(|e| id_prefix(*e, selector)).collect();
    let candidates = if by_prefix.is_empty() {
        entries
            .iter()
            .filter(|e| name(*e).eq_ignore_ascii_case(trimmed))
            .collect()
    } else {
        by_prefix
    };

    match candidates.as_slice() {
        [] => Ok(None),
        [only] => Ok(Some(*only)),
        several => Err(BurdenError::Validation(format!(
            "ambiguous identifier '{}' matches {} entries; use the full ID",
            trimmed,
            several.len()
        ))),
    }
}

fn validate_name(name: &str) -> BurdenResult<&str> {
    let name = name.trim();
    if name.is_empty() {
        return Err(BurdenError::Validation("Name cannot be empty".into()));
    }
    Ok(name)
}
