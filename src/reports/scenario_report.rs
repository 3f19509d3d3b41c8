//! Scenario Report
//!
//! Renders the utilization sensitivity and headcount scalability tables for
//! an estimate.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::display::report::{format_money_whole, format_percentage, format_rate};
use crate::engine::{Estimate, HeadcountScenario, Projections, UtilizationScenario};

#[derive(Debug, Clone, Tabled)]
struct UtilizationRow {
    #[tabled(rename = "Shift")]
    shift: String,
    #[tabled(rename = "Utilization")]
    utilization: String,
    #[tabled(rename = "Billable Hrs")]
    billable_hours: String,
    #[tabled(rename = "Break-even")]
    break_even: String,
    #[tabled(rename = "Profit/Hr")]
    profit_per_hour: String,
    #[tabled(rename = "Margin")]
    margin: String,
    #[tabled(rename = "Annual Profit")]
    annual_profit: String,
}

#[derive(Debug, Clone, Tabled)]
struct HeadcountRow {
    #[tabled(rename = "Techs")]
    technicians: u32,
    #[tabled(rename = "Fixed/Tech")]
    fixed_per_tech: String,
    #[tabled(rename = "Cost/Tech")]
    cost_per_tech: String,
    #[tabled(rename = "Break-even")]
    break_even: String,
    #[tabled(rename = "Margin")]
    margin: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Company Profit")]
    company_profit: String,
}

/// What-if tables for one estimate
#[derive(Debug, Clone)]
pub struct ScenarioReport {
    pub projections: Projections,
    pub current_technicians: u32,
    pub target_rate: f64,
}

impl ScenarioReport {
    /// Run the projections for an estimate
    pub fn generate(estimate: &Estimate) -> Self {
        Self {
            projections: estimate.projections(),
            current_technicians: estimate.costs.technician_count,
            target_rate: estimate.target_billing_rate,
        }
    }

    fn utilization_rows(&self, symbol: &str) -> Vec<UtilizationRow> {
        self.projections
            .utilization
            .iter()
            .map(|row: &UtilizationScenario| UtilizationRow {
                shift: if row.offset == 0.0 {
                    "current".to_string()
                } else {
                    format!("{:+}", row.offset)
                },
                utilization: format_percentage(row.utilization_rate),
                billable_hours: format!("{:.0}", row.billable_hours),
                break_even: format_rate(row.break_even_rate, symbol),
                profit_per_hour: format_rate(row.profit_per_hour, symbol),
                margin: format_percentage(row.profit_margin_percent),
                annual_profit: format_money_whole(row.annual_profit, symbol),
            })
            .collect()
    }

    fn headcount_rows(&self, symbol: &str) -> Vec<HeadcountRow> {
        self.projections
            .headcount
            .iter()
            .map(|row: &HeadcountScenario| HeadcountRow {
                technicians: row.technician_count,
                fixed_per_tech: format_money_whole(row.fixed_cost_per_technician, symbol),
                cost_per_tech: format_money_whole(row.total_annual_cost_per_technician, symbol),
                break_even: format_rate(row.break_even_rate, symbol),
                margin: format_percentage(row.profit_margin_percent),
                status: row.margin_band.to_string(),
                company_profit: format_money_whole(row.company_annual_profit, symbol),
            })
            .collect()
    }

    /// Minimum-utilization line
    pub fn format_min_utilization(&self) -> String {
        match self.projections.min_utilization_percent {
            None => "Minimum utilization to break even: n/a (no working hours)".to_string(),
            Some(pct) if self.projections.break_even_reachable() => format!(
                "Minimum utilization to break even: {}",
                format_percentage(pct)
            ),
            Some(pct) => format!(
                "Minimum utilization to break even: {} (unreachable; costs exceed 100% utilization)",
                format_percentage(pct)
            ),
        }
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, symbol: &str) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            "Utilization sensitivity (target {})\n",
            format_rate(Some(self.target_rate), symbol)
        ));
        let mut table = Table::new(self.utilization_rows(symbol));
        table.with(Style::rounded());
        output.push_str(&table.to_string());
        output.push_str("\n\n");

        output.push_str(&format!(
            "Headcount scalability (currently {} technician{})\n",
            self.current_technicians,
            if self.current_technicians == 1 { "" } else { "s" }
        ));
        let mut table = Table::new(self.headcount_rows(symbol));
        table.with(Style::rounded());
        output.push_str(&table.to_string());
        output.push_str("\n\n");

        output.push_str(&self.format_min_utilization());
        output.push('\n');
        output
    }
}
