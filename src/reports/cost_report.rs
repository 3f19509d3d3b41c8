//! Cost Report
//!
//! The dashboard summary and the printable report. Both render the figures
//! of a single [`Estimate`]; neither recomputes anything the engine already
//! produced.

use std::io::Write;

use crate::display::report::{
    double_separator, format_bar, format_header, format_hours, format_money,
    format_optional_money, format_percentage, format_rate, separator,
};
use crate::engine::rollup::valuation_context;
use crate::engine::{breakdown, CategoryBreakdown, Estimate};
use crate::error::{BurdenError, BurdenResult};
use crate::models::EstimatorConfig;

const REPORT_WIDTH: usize = 72;
const BAR_WIDTH: usize = 30;

/// Everything needed to print a cost report
#[derive(Debug, Clone)]
pub struct CostReport {
    pub estimate: Estimate,
    pub technician_count: u32,
    pub jurisdiction: String,
    pub hourly_wage: f64,
    pub benefits: CategoryBreakdown,
    pub variable: Vec<CategoryBreakdown>,
    pub fixed: Vec<CategoryBreakdown>,
}

impl CostReport {
    /// Collect the report for a configuration and its estimate
    pub fn generate(config: &EstimatorConfig, estimate: &Estimate) -> Self {
        let ctx = valuation_context(config, &estimate.schedule);
        let benefits = breakdown(std::slice::from_ref(&config.benefits), &ctx)
            .pop()
            .unwrap_or(CategoryBreakdown {
                name: config.benefits.name.clone(),
                items: Vec::new(),
                annual_total: 0.0,
            });

        Self {
            estimate: estimate.clone(),
            technician_count: estimate.costs.technician_count,
            jurisdiction: config.jurisdiction.clone(),
            hourly_wage: config.wage.hourly_wage(),
            benefits,
            variable: breakdown(&config.variable_overhead, &ctx),
            fixed: breakdown(&config.fixed_overhead, &ctx),
        }
    }

    /// Short dashboard of the headline figures
    pub fn format_dashboard(&self, symbol: &str) -> String {
        let e = &self.estimate;
        let money = |amount: f64| format_money(amount, symbol);
        let mut output = String::new();

        output.push_str("Technician Profitability\n");
        output.push_str(&separator(REPORT_WIDTH));
        output.push('\n');

        output.push_str(&format!(
            "{:<28} {:>14}   {:<20}\n",
            "Break-even rate",
            format_rate(e.pricing.break_even_rate, symbol),
            "(cost per billable hour)"
        ));
        output.push_str(&format!(
            "{:<28} {:>14}\n",
            "Target rate",
            format_rate(Some(e.target_billing_rate), symbol)
        ));
        if e.inputs.fee_enabled {
            output.push_str(&format!(
                "{:<28} {:>14}   ({} of target)\n",
                "Payment fee",
                format_rate(Some(e.pricing.payment_fee_per_hour), symbol),
                format_percentage(e.inputs.fee_percentage)
            ));
        }
        output.push_str(&format!(
            "{:<28} {:>14}\n",
            "Profit per hour",
            format_rate(e.pricing.profit_per_hour, symbol)
        ));
        output.push_str(&format!(
            "{:<28} {:>14}   {} {}\n",
            "Profit margin",
            format_percentage(e.pricing.profit_margin_percent),
            format_bar(e.pricing.margin_gauge_percent(), 100.0, BAR_WIDTH / 2),
            e.pricing.margin_band
        ));
        output.push_str(&format!(
            "{:<28} {:>14}\n",
            "Suggested rate (20% margin)",
            format_rate(e.pricing.suggested_rate_for_20_pct_margin, symbol)
        ));
        output.push('\n');

        output.push_str(&format!(
            "{:<28} {:>14}\n",
            "Billable hours / year",
            format_hours(e.billable_hours_rounded)
        ));
        output.push_str(&format!(
            "{:<28} {:>14}\n",
            "Cost per clock hour",
            format_rate(e.hourly.cost_per_clock_hour, symbol)
        ));
        output.push_str(&format!(
            "{:<28} {:>14}\n",
            "Annual cost per technician",
            money(e.costs.total_annual_cost_per_technician)
        ));
        output.push('\n');

        output.push_str(&self.format_composition());
        output
    }

    fn format_composition(&self) -> String {
        let c = &self.estimate.composition;
        let mut output = String::from("Cost composition\n");
        for (label, pct) in [
            ("Labor", c.labor_percent),
            ("Variable", c.variable_percent),
            ("Fixed share", c.fixed_percent),
        ] {
            output.push_str(&format!(
                "  {:<12} {} {:>6}\n",
                label,
                format_bar(pct, 100.0, BAR_WIDTH),
                format_percentage(pct)
            ));
        }
        output
    }

    /// Full printable report
    pub fn format_terminal(&self, symbol: &str) -> String {
        let e = &self.estimate;
        let costs = &e.costs;
        let money = |amount: f64| format_money(amount, symbol);
        let line = |label: &str, value: String| format!("  {:<40} {:>16}\n", label, value);
        let mut output = String::new();

        output.push_str(&double_separator(REPORT_WIDTH));
        output.push('\n');
        output.push_str(&format_header("TECHNICIAN COST REPORT", REPORT_WIDTH));
        output.push('\n');
        output.push_str(&double_separator(REPORT_WIDTH));
        output.push('\n');
        output.push_str(&format!(
            "Technicians: {}   Jurisdiction: {}   Utilization: {}\n\n",
            self.technician_count,
            self.jurisdiction,
            format_percentage(e.schedule.utilization_rate)
        ));

        output.push_str("SCHEDULE\n");
        output.push_str(&line("Net working days", format!("{}", e.schedule.net_working_days)));
        output.push_str(&line("Hours per working day", format!("{}", e.schedule.hours_per_working_day)));
        output.push_str(&line("Total annual hours", format_hours(e.schedule.total_annual_hours)));
        output.push_str(&line("Billable hours", format_hours(e.billable_hours_rounded)));
        output.push('\n');

        output.push_str("LABOR (per technician)\n");
        output.push_str(&line(
            &format!("Wage ({}/hr)", money(self.hourly_wage)),
            money(costs.annual_wage),
        ));
        output.push_str(&line("Insurance", money(costs.annual_insurance)));
        output.push_str(&line(
            &format!(
                "Payroll tax ({}/hr)",
                format_optional_money(e.hourly.payroll_tax_per_hour, symbol)
            ),
            money(costs.annual_payroll_tax),
        ));
        output.push_str(&line("Unemployment insurance", money(costs.annual_unemployment_insurance)));
        output.push_str(&line(&self.benefits.name, money(costs.annual_benefits)));
        for (name, cost) in &self.benefits.items {
            output.push_str(&format!("      {:<36} {:>16}\n", name, money(*cost)));
        }
        output.push_str(&format!("  {}\n", separator(REPORT_WIDTH - 2)));
        output.push_str(&line("Total labor", money(costs.total_annual_labor_cost)));
        output.push_str(&line("Labor burden per hour", format_rate(e.hourly.labor_burden_per_hour, symbol)));
        output.push('\n');

        output.push_str("VARIABLE OVERHEAD (per technician)\n");
        output.push_str(&format_breakdowns(&self.variable, symbol));
        output.push_str(&line("Fuel", money(costs.annual_fuel_cost)));
        output.push_str(&format!("  {}\n", separator(REPORT_WIDTH - 2)));
        output.push_str(&line("Total variable", money(costs.total_annual_variable_cost)));
        output.push('\n');

        output.push_str("FIXED OVERHEAD (company-wide)\n");
        output.push_str(&format_breakdowns(&self.fixed, symbol));
        output.push_str(&format!("  {}\n", separator(REPORT_WIDTH - 2)));
        output.push_str(&line("Total fixed", money(costs.total_annual_fixed_cost)));
        output.push_str(&line(
            &format!("Share per technician (/{})", self.technician_count),
            money(costs.fixed_cost_per_technician),
        ));
        output.push('\n');

        output.push_str(&double_separator(REPORT_WIDTH));
        output.push('\n');
        output.push_str(&line("TOTAL ANNUAL COST PER TECHNICIAN", money(costs.total_annual_cost_per_technician)));
        output.push_str(&line("Cost per clock hour", format_rate(e.hourly.cost_per_clock_hour, symbol)));
        output.push_str(&line("Break-even rate", format_rate(e.pricing.break_even_rate, symbol)));
        output.push_str(&line("Target rate", format_rate(Some(e.target_billing_rate), symbol)));
        output.push_str(&line("Profit per hour", format_rate(e.pricing.profit_per_hour, symbol)));
        output.push_str(&line(
            "Profit margin",
            format!(
                "{} ({})",
                format_percentage(e.pricing.profit_margin_percent),
                e.pricing.margin_band
            ),
        ));
        output.push_str(&line(
            "Suggested rate for 20% margin",
            format_rate(e.pricing.suggested_rate_for_20_pct_margin, symbol),
        ));
        output.push_str(&double_separator(REPORT_WIDTH));
        output.push('\n');

        output
    }

    /// Export the headline figures to CSV (metric, value)
    ///
    /// Undefined figures are written as empty cells.
    pub fn export_csv<W: Write>(&self, writer: W) -> BurdenResult<()> {
        let e = &self.estimate;
        let c = &e.costs;
        let rows: Vec<(&str, Option<f64>)> = vec![
            ("technician_count", Some(self.technician_count as f64)),
            ("net_working_days", Some(e.schedule.net_working_days)),
            ("total_annual_hours", Some(e.schedule.total_annual_hours)),
            ("billable_hours", Some(e.schedule.billable_hours)),
            ("annual_wage", Some(c.annual_wage)),
            ("annual_insurance", Some(c.annual_insurance)),
            ("annual_payroll_tax", Some(c.annual_payroll_tax)),
            ("annual_unemployment_insurance", Some(c.annual_unemployment_insurance)),
            ("annual_benefits", Some(c.annual_benefits)),
            ("total_annual_labor_cost", Some(c.total_annual_labor_cost)),
            ("annual_fuel_cost", Some(c.annual_fuel_cost)),
            ("total_annual_variable_cost", Some(c.total_annual_variable_cost)),
            ("total_annual_fixed_cost", Some(c.total_annual_fixed_cost)),
            ("fixed_cost_per_technician", Some(c.fixed_cost_per_technician)),
            ("total_annual_cost_per_technician", Some(c.total_annual_cost_per_technician)),
            ("cost_per_clock_hour", e.hourly.cost_per_clock_hour),
            ("break_even_rate", e.pricing.break_even_rate),
            ("target_billing_rate", Some(e.target_billing_rate)),
            ("payment_fee_per_hour", Some(e.pricing.payment_fee_per_hour)),
            ("profit_per_hour", e.pricing.profit_per_hour),
            ("profit_margin_percent", Some(e.pricing.profit_margin_percent)),
            ("suggested_rate_for_20_pct_margin", e.pricing.suggested_rate_for_20_pct_margin),
        ];

        let mut csv_writer = csv::Writer::from_writer(writer);
        csv_writer
            .write_record(["metric", "value"])
            .map_err(|e| BurdenError::Export(e.to_string()))?;
        for (metric, value) in rows {
            let value = value.map(|v| format!("{:.2}", v)).unwrap_or_default();
            csv_writer
                .write_record([metric, value.as_str()])
                .map_err(|e| BurdenError::Export(e.to_string()))?;
        }
        csv_writer
            .write_record(["margin_band", e.pricing.margin_band.label()])
            .map_err(|e| BurdenError::Export(e.to_string()))?;
        csv_writer
            .flush()
            .map_err(|e| BurdenError::Export(e.to_string()))?;

        Ok(())
    }
}

fn format_breakdowns(rows: &[CategoryBreakdown], symbol: &str) -> String {
    let mut output = String::new();
    for row in rows {
        output.push_str(&format!(
            "  {:<40} {:>16}\n",
            row.name,
            format_money(row.annual_total, symbol)
        ));
        for (name, cost) in &row.items {
            output.push_str(&format!("      {:<36} {:>16}\n", name, format_money(*cost, symbol)));
        }
    }
    output
}
