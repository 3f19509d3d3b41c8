//! Structural edits to categories and category collections
//!
//! Each operation takes a value and returns the edited value. Unknown ids
//! make the operation a no-op; callers that need to report a missing target
//! look it up first (see [`super::config::ConfigService`]).

use crate::models::{Category, CategoryId, ItemId, ItemPatch, LineItem};

/// Append a new item with default fields
pub fn add_item(category: Category) -> Category {
    push_item(category, LineItem::default())
}

/// Append a given item, keeping existing order
pub fn push_item(mut category: Category, item: LineItem) -> Category {
    category.items.push(item);
    category
}

/// Replace the specified fields of the matching item
pub fn update_item(mut category: Category, item_id: &ItemId, patch: &ItemPatch) -> Category {
    for item in category.items.iter_mut().filter(|item| &item.id == item_id) {
        *item = patch.apply(item);
    }
    category
}

/// Remove the matching item
pub fn remove_item(mut category: Category, item_id: &ItemId) -> Category {
    category.items.retain(|item| &item.id != item_id);
    category
}

/// Rename the matching category
pub fn rename_category(
    mut categories: Vec<Category>,
    category_id: &CategoryId,
    name: &str,
) -> Vec<Category> {
    for category in categories.iter_mut().filter(|c| &c.id == category_id) {
        category.name = name.to_string();
    }
    categories
}

/// Append a new empty category
pub fn add_category(mut categories: Vec<Category>, name: &str) -> Vec<Category> {
    categories.push(Category::new(name));
    categories
}

/// Remove the matching category and its items
pub fn remove_category(mut categories: Vec<Category>, category_id: &CategoryId) -> Vec<Category> {
    categories.retain(|c| &c.id != category_id);
    categories
}
