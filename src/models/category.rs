//! Cost category model
//!
//! Categories group line items under a renamable label ("Trucks",
//! "Software"). Item order is kept for display only; it never affects totals.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use super::line_item::LineItem;

/// Name given to freshly added categories
pub const DEFAULT_CATEGORY_NAME: &str = "New Category";

fn default_category_name() -> String {
    DEFAULT_CATEGORY_NAME.to_string()
}

/// A named, ordered list of line items
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Identifier, unique within the owning collection
    #[serde(default)]
    pub id: CategoryId,

    /// Display name
    #[serde(default = "default_category_name")]
    pub name: String,

    /// Items in display order
    pub items: Vec<LineItem>,
}

impl Category {
    /// Create a new empty category
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            items: Vec::new(),
        }
    }

    /// Create a category pre-filled with items
    pub fn with_items(name: impl Into<String>, items: Vec<LineItem>) -> Self {
        Self {
            id: CategoryId::new(),
            name: name.into(),
            items,
        }
    }

    /// Build a category from an older keyed-map snapshot entry
    ///
    /// The key becomes the display name with its first letter capitalized.
    pub fn from_legacy_key(key: &str, items: Vec<LineItem>) -> Self {
        Self::with_items(capitalize(key), items)
    }

    /// Number of items in this category
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Check if the category has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Uppercase the first character of a key
pub fn capitalize(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Recurrence;

    #[test]
    fn test_new_category() {
        let cat = Category::new("Trucks");
        assert_eq!(cat.name, "Trucks");
        assert!(cat.is_empty());
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("trucks"), "Trucks");
        assert_eq!(capitalize("professional"), "Professional");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("éclair"), "Éclair");
    }

    #[test]
    fn test_from_legacy_key() {
        let items = vec![LineItem::currency("Shop Rent", 30000.0, Recurrence::Yearly)];
        let cat = Category::from_legacy_key("rent", items);
        assert_eq!(cat.name, "Rent");
        assert_eq!(cat.len(), 1);
    }

    #[test]
    fn test_record_requires_items() {
        let ok: Result<Category, _> = serde_json::from_str(r#"{"name": "Tools", "items": []}"#);
        assert!(ok.is_ok());
        let missing: Result<Category, _> = serde_json::from_str(r#"{"general": []}"#);
        assert!(missing.is_err());
    }
}
