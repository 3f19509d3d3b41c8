//! CSV export of line items
//!
//! One row per line item across the benefits category and both overhead
//! collections, with the annual cost each item contributes under the
//! configuration's current schedule.

use std::io::Write;

use serde::Serialize;

use crate::engine::rollup::valuation_context;
use crate::engine::{annual_cost, schedule_for};
use crate::error::{BurdenError, BurdenResult};
use crate::models::{Category, EstimatorConfig};
use crate::services::Section;

#[derive(Debug, Serialize)]
struct LineItemRow<'a> {
    section: &'static str,
    category: &'a str,
    item: &'a str,
    value: f64,
    unit: String,
    recurrence: String,
    annual_cost: String,
}

/// Export every line item to CSV
pub fn export_line_items_csv<W: Write>(config: &EstimatorConfig, writer: W) -> BurdenResult<usize> {
    let ctx = valuation_context(config, &schedule_for(config));
    let mut csv_writer = csv::Writer::from_writer(writer);

    let sections: Vec<(Section, &Category)> = std::iter::once((Section::Benefits, &config.benefits))
        .chain(config.variable_overhead.iter().map(|c| (Section::Variable, c)))
        .chain(config.fixed_overhead.iter().map(|c| (Section::Fixed, c)))
        .collect();

    let mut rows = 0;
    for (section, category) in sections {
        for item in &category.items {
            let row = LineItemRow {
                section: section.label(),
                category: &category.name,
                item: &item.name,
                value: item.value,
                unit: item.unit.to_string(),
                recurrence: item.recurrence.to_string(),
                annual_cost: format!("{:.2}", annual_cost(item, &ctx)),
            };
            csv_writer
                .serialize(row)
                .map_err(|e| BurdenError::Export(e.to_string()))?;
            rows += 1;
        }
    }

    csv_writer
        .flush()
        .map_err(|e| BurdenError::Export(e.to_string()))?;

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LineItem, Recurrence};

    fn export_to_string(config: &EstimatorConfig) -> String {
        let mut output = Vec::new();
        export_line_items_csv(config, &mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_csv_header_and_rows() {
        let config = EstimatorConfig::default();
        let csv = export_to_string(&config);
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(
            lines[0],
            "section,category,item,value,unit,recurrence,annual_cost"
        );
        assert_eq!(lines.len(), config.item_count() + 1);
        assert!(lines[1].starts_with("benefits,Benefits,Health Reimbursement,1000"));
    }

    #[test]
    fn test_csv_annual_cost_column() {
        let mut config = EstimatorConfig::blank();
        config.fixed_overhead = vec![Category::with_items(
            "Software",
            vec![LineItem::currency("QBO, Plus", 169.0, Recurrence::Monthly)],
        )];

        let csv = export_to_string(&config);
        // names containing commas are quoted
        assert!(csv.contains("fixed,Software,\"QBO, Plus\",169.0,currency,monthly,2028.00"));
    }

    #[test]
    fn test_csv_row_count() {
        let mut output = Vec::new();
        let rows = export_line_items_csv(&EstimatorConfig::blank(), &mut output).unwrap();
        assert_eq!(rows, 0);
    }
}
