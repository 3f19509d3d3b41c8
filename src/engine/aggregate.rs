//! Category aggregation
//!
//! Sums line item valuations into annual totals. No rounding happens here.

use crate::models::{Category, LineItem};

use super::valuation::{annual_cost, ValuationContext};

/// Annual total of a list of line items
pub fn annual_total(items: &[LineItem], ctx: &ValuationContext) -> f64 {
    items.iter().map(|item| annual_cost(item, ctx)).sum()
}

/// Annual total of a single category
pub fn category_total(category: &Category, ctx: &ValuationContext) -> f64 {
    annual_total(&category.items, ctx)
}

/// Annual total across a collection of categories
pub fn collection_total(categories: &[Category], ctx: &ValuationContext) -> f64 {
    categories.iter().map(|c| category_total(c, ctx)).sum()
}

/// Annual total of one category, with per-item figures for display
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBreakdown {
    pub name: String,
    pub items: Vec<(String, f64)>,
    pub annual_total: f64,
}

/// Per-category and per-item annual figures for a collection
pub fn breakdown(categories: &[Category], ctx: &ValuationContext) -> Vec<CategoryBreakdown> {
    categories
        .iter()
        .map(|category| {
            let items: Vec<(String, f64)> = category
                .items
                .iter()
                .map(|item| (item.name.clone(), annual_cost(item, ctx)))
                .collect();
            let annual_total = items.iter().map(|(_, cost)| cost).sum();
            CategoryBreakdown {
                name: category.name.clone(),
                items,
                annual_total,
            }
        })
        .collect()
}
