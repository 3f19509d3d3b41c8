//! Category display formatting
//!
//! Formats categories and their line items as a tree with annual costs.

use crate::engine::{annual_cost, ValuationContext};
use crate::models::Category;

use super::report::format_money;

/// Format one section's categories as a tree with annual totals
pub fn format_category_tree(
    title: &str,
    categories: &[&Category],
    ctx: &ValuationContext,
    symbol: &str,
) -> String {
    let mut output = format!("{}\n", title);

    if categories.is_empty() {
        output.push_str("  (no categories)\n");
        return output;
    }

    for category in categories {
        let total: f64 = category.items.iter().map(|item| annual_cost(item, ctx)).sum();
        output.push_str(&format!(
            "  {:<40} {:>14}\n",
            format!("{} [{}]", category.name, category.id),
            format_money(total, symbol)
        ));

        if category.items.is_empty() {
            output.push_str("    (no items)\n");
            continue;
        }

        for (i, item) in category.items.iter().enumerate() {
            let is_last = i == category.items.len() - 1;
            let prefix = if is_last { "└── " } else { "├── " };
            output.push_str(&format!(
                "    {}{:<36} {:>14}  [{}]\n",
                prefix,
                item.to_string(),
                format_money(annual_cost(item, ctx), symbol),
                item.id
            ));
        }
    }

    output
}

/// Format a single category's details
pub fn format_category_details(category: &Category, ctx: &ValuationContext, symbol: &str) -> String {
    let mut output = String::new();
    output.push_str(&format!("Category: {}\n", category.name));
    output.push_str(&format!("ID:       {}\n", category.id.as_str()));
    output.push_str(&format!("Items:    {}\n", category.len()));

    let total: f64 = category.items.iter().map(|item| annual_cost(item, ctx)).sum();
    output.push_str(&format!("Annual:   {}\n", format_money(total, symbol)));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LineItem, Recurrence};

    fn ctx() -> ValuationContext {
        ValuationContext::new(30.0, 245.0, 8.0)
    }

    #[test]
    fn test_tree_lists_items_with_annual_cost() {
        let trucks = Category::with_items(
            "Trucks",
            vec![
                LineItem::currency("Lease", 3000.0, Recurrence::Yearly),
                LineItem::currency("GPS", 10.0, Recurrence::Monthly),
            ],
        );
        let output = format_category_tree("Variable", &[&trucks], &ctx(), "$");

        assert!(output.starts_with("Variable\n"));
        assert!(output.contains("Trucks ["));
        assert!(output.contains("$3,120.00"));
        assert!(output.contains("├── Lease"));
        assert!(output.contains("└── GPS"));
        assert!(output.contains("$120.00"));
    }

    #[test]
    fn test_empty_sections() {
        let output = format_category_tree("Fixed", &[], &ctx(), "$");
        assert!(output.contains("(no categories)"));

        let empty = Category::new("Tools");
        let output = format_category_tree("Fixed", &[&empty], &ctx(), "$");
        assert!(output.contains("(no items)"));
    }

    #[test]
    fn test_category_details() {
        let rent = Category::with_items(
            "Rent",
            vec![LineItem::currency("Shop", 2500.0, Recurrence::Monthly)],
        );
        let output = format_category_details(&rent, &ctx(), "$");
        assert!(output.contains("Category: Rent"));
        assert!(output.contains("Items:    1"));
        assert!(output.contains("$30,000.00"));
    }
}
