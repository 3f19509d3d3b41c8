//! Cost line item model
//!
//! A line item is a single named cost inside a category: a value, the unit it
//! is denominated in, and how often it recurs.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::ItemId;
use super::numeric::lenient_f64;
use super::recurrence::{Recurrence, ValueUnit};

/// Name given to freshly added items
pub const DEFAULT_ITEM_NAME: &str = "New Item";

/// A single cost entry within a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineItem {
    /// Identifier, stable across edits and unique within the owning list
    pub id: ItemId,

    /// Free-text label
    pub name: String,

    /// Raw numeric value, interpreted through `unit`
    #[serde(deserialize_with = "lenient_f64")]
    pub value: f64,

    /// Denomination of `value`
    pub unit: ValueUnit,

    /// How often the value recurs
    #[serde(alias = "freq")]
    pub recurrence: Recurrence,
}

impl Default for LineItem {
    fn default() -> Self {
        Self {
            id: ItemId::new(),
            name: DEFAULT_ITEM_NAME.to_string(),
            value: 0.0,
            unit: ValueUnit::Currency,
            recurrence: Recurrence::Yearly,
        }
    }
}

impl LineItem {
    /// Create a new line item
    pub fn new(
        name: impl Into<String>,
        value: f64,
        unit: ValueUnit,
        recurrence: Recurrence,
    ) -> Self {
        Self {
            id: ItemId::new(),
            name: name.into(),
            value,
            unit,
            recurrence,
        }
    }

    /// A dollar-denominated item
    pub fn currency(name: impl Into<String>, value: f64, recurrence: Recurrence) -> Self {
        Self::new(name, value, ValueUnit::Currency, recurrence)
    }

    /// An item denominated in paid labor hours
    pub fn hours(name: impl Into<String>, value: f64, recurrence: Recurrence) -> Self {
        Self::new(name, value, ValueUnit::Hours, recurrence)
    }

    /// An item denominated in paid labor days (PTO, holidays)
    pub fn days(name: impl Into<String>, value: f64, recurrence: Recurrence) -> Self {
        Self::new(name, value, ValueUnit::Days, recurrence)
    }

    /// Use a specific ID instead of a random one
    pub fn with_id(mut self, id: impl Into<ItemId>) -> Self {
        self.id = id.into();
        self
    }
}

impl fmt::Display for LineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({} {}{})",
            self.name,
            self.value,
            self.unit.symbol(),
            self.recurrence.label()
        )
    }
}

/// A partial update to a line item; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub value: Option<f64>,
    pub unit: Option<ValueUnit>,
    pub recurrence: Option<Recurrence>,
}

impl ItemPatch {
    /// Check whether the patch changes anything
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.value.is_none() && self.unit.is_none() && self.recurrence.is_none()
    }

    /// Apply the specified fields to an item, keeping its identity
    pub fn apply(&self, item: &LineItem) -> LineItem {
        LineItem {
            id: item.id.clone(),
            name: self.name.clone().unwrap_or_else(|| item.name.clone()),
            value: self.value.unwrap_or(item.value),
            unit: self.unit.unwrap_or(item.unit),
            recurrence: self.recurrence.unwrap_or(item.recurrence),
        }
    }
}
