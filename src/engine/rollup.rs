//! Cost roll-up
//!
//! Combines labor (wage, insurance, statutory burden, benefits), variable
//! overhead (per-technician categories plus fuel) and fixed overhead
//! (company-wide categories split across technicians) into annual totals.

use serde::Serialize;

use crate::models::{EstimatorConfig, LineItem, TaxPolicy};

use super::aggregate::{annual_total, collection_total};
use super::annualize::annualize;
use super::schedule::Schedule;
use super::valuation::{annual_cost, ValuationContext};

/// Annual cost figures for one technician
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostSummary {
    pub annual_wage: f64,
    pub annual_insurance: f64,
    pub annual_payroll_tax: f64,
    pub annual_unemployment_insurance: f64,
    pub annual_benefits: f64,
    /// Sum of the five labor components above
    pub total_annual_labor_cost: f64,
    /// Fuel cost included in the variable total
    pub annual_fuel_cost: f64,
    /// Variable categories plus fuel
    pub total_annual_variable_cost: f64,
    /// Company-wide fixed overhead
    pub total_annual_fixed_cost: f64,
    pub fixed_cost_per_technician: f64,
    /// Labor + variable + fixed share
    pub total_annual_cost_per_technician: f64,
    /// Technician count the fixed overhead was divided by
    pub technician_count: u32,
}

impl CostSummary {
    /// Labor + variable cost, the part that does not dilute with headcount
    pub fn per_technician_direct_cost(&self) -> f64 {
        self.total_annual_labor_cost + self.total_annual_variable_cost
    }

    /// Total cost per technician if fixed overhead were shared by `technicians`
    pub fn cost_per_technician_at(&self, technicians: u32) -> f64 {
        self.per_technician_direct_cost() + self.total_annual_fixed_cost / technicians.max(1) as f64
    }
}

/// Valuation context for a configuration on a resolved schedule
pub fn valuation_context(config: &EstimatorConfig, schedule: &Schedule) -> ValuationContext {
    ValuationContext::new(
        config.wage.hourly_wage(),
        schedule.net_working_days,
        schedule.hours_per_working_day,
    )
}

/// Roll up every annual cost for one technician
pub fn roll_up(config: &EstimatorConfig, schedule: &Schedule, policy: &TaxPolicy) -> CostSummary {
    let ctx = valuation_context(config, schedule);
    let days = schedule.net_working_days;
    let hours = schedule.hours_per_working_day;

    let annual_wage = annualize(config.wage.wage.value, config.wage.wage.recurrence, days, hours);
    let annual_insurance = annualize(
        config.wage.insurance.value,
        config.wage.insurance.recurrence,
        days,
        hours,
    );
    let annual_payroll_tax = annual_wage * policy.payroll_tax_rate;
    let annual_unemployment_insurance = policy.unemployment_for(&config.jurisdiction);
    let annual_benefits = annual_total(&config.benefits.items, &ctx);

    let total_annual_labor_cost = annual_wage
        + annual_insurance
        + annual_payroll_tax
        + annual_unemployment_insurance
        + annual_benefits;

    let annual_fuel_cost = config.fuel.annual_cost(days);
    let total_annual_variable_cost = collection_total(&config.variable_overhead, &ctx) + annual_fuel_cost;

    let total_annual_fixed_cost = collection_total(&config.fixed_overhead, &ctx);
    let technician_count = config.effective_technician_count();
    let fixed_cost_per_technician = total_annual_fixed_cost / technician_count as f64;

    let summary = CostSummary {
        annual_wage,
        annual_insurance,
        annual_payroll_tax,
        annual_unemployment_insurance,
        annual_benefits,
        total_annual_labor_cost,
        annual_fuel_cost,
        total_annual_variable_cost,
        total_annual_fixed_cost,
        fixed_cost_per_technician,
        total_annual_cost_per_technician: total_annual_labor_cost
            + total_annual_variable_cost
            + fixed_cost_per_technician,
        technician_count,
    };

    tracing::debug!(
        labor = summary.total_annual_labor_cost,
        variable = summary.total_annual_variable_cost,
        fixed = summary.total_annual_fixed_cost,
        technicians = technician_count,
        "rolled up annual costs"
    );

    summary
}

/// Annual cost of a single item under a configuration's schedule
pub fn item_annual_cost(item: &LineItem, config: &EstimatorConfig, schedule: &Schedule) -> f64 {
    annual_cost(item, &valuation_context(config, schedule))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::schedule::resolve_schedule;
    use crate::models::{Category, FuelModel, RateInput, Recurrence, WageConfig};

    fn approx_eq(a: f64, b: f64) -> bool {
        (a - b).abs() < 0.01
    }

    fn reference_config() -> EstimatorConfig {
        let mut config = EstimatorConfig::blank();
        config.wage = WageConfig {
            wage: RateInput::hourly(50.0),
            insurance: RateInput::hourly(2.0),
        };
        config.base_calendar_working_days = 261.0;
        config.hours_per_working_day = 9.0;
        config.utilization_rate = 65.0;
        config.benefits.items = vec![LineItem::currency("Health", 1000.0, Recurrence::Monthly)];
        config
    }

    fn schedule_for(config: &EstimatorConfig) -> Schedule {
        resolve_schedule(
            config.base_calendar_working_days,
            &config.benefits.items,
            config.hours_per_working_day,
            config.utilization_rate,
        )
    }

    #[test]
    fn test_reference_labor_cost() {
        let config = reference_config();
        let summary = roll_up(&config, &schedule_for(&config), &TaxPolicy::default());

        assert_eq!(summary.annual_wage, 117_450.0);
        assert_eq!(summary.annual_insurance, 4_698.0);
        assert!(approx_eq(summary.annual_payroll_tax, 8_984.925));
        assert_eq!(summary.annual_unemployment_insurance, 430.0);
        assert_eq!(summary.annual_benefits, 12_000.0);
        assert!(approx_eq(summary.total_annual_labor_cost, 143_562.925));
        assert_eq!(summary.total_annual_variable_cost, 0.0);
        assert_eq!(summary.total_annual_fixed_cost, 0.0);
        assert!(approx_eq(
            summary.total_annual_cost_per_technician,
            summary.total_annual_labor_cost
        ));
    }

    #[test]
    fn test_fixed_overhead_is_shared() {
        let mut config = reference_config();
        config.fixed_overhead = vec![Category::with_items(
            "Rent",
            vec![LineItem::currency("Shop", 30_000.0, Recurrence::Yearly)],
        )];
        config.technician_count = 3;

        let summary = roll_up(&config, &schedule_for(&config), &TaxPolicy::default());
        assert_eq!(summary.total_annual_fixed_cost, 30_000.0);
        assert_eq!(summary.fixed_cost_per_technician, 10_000.0);
        assert_eq!(summary.technician_count, 3);
    }

    #[test]
    fn test_zero_technicians_clamped() {
        let mut config = reference_config();
        config.technician_count = 0;
        config.fixed_overhead = vec![Category::with_items(
            "Rent",
            vec![LineItem::currency("Shop", 12_000.0, Recurrence::Yearly)],
        )];

        let summary = roll_up(&config, &schedule_for(&config), &TaxPolicy::default());
        assert_eq!(summary.fixed_cost_per_technician, 12_000.0);
        assert!(summary.total_annual_cost_per_technician.is_finite());
    }

    #[test]
    fn test_fuel_tracks_working_days() {
        let mut config = reference_config();
        config.fuel = FuelModel::default();

        let before = roll_up(&config, &schedule_for(&config), &TaxPolicy::default());
        assert_eq!(before.annual_fuel_cost, 16.0 * 261.0);

        config
            .benefits
            .items
            .push(LineItem::days("PTO", 11.0, Recurrence::Yearly));
        let after = roll_up(&config, &schedule_for(&config), &TaxPolicy::default());
        assert_eq!(after.annual_fuel_cost, 16.0 * 250.0);

        config.fuel.price_per_gallon = 5.0;
        let repriced = roll_up(&config, &schedule_for(&config), &TaxPolicy::default());
        assert_eq!(repriced.annual_fuel_cost, 20.0 * 250.0);
    }

    #[test]
    fn test_pto_days_are_costed_and_removed_from_schedule() {
        let mut config = reference_config();
        config
            .benefits
            .items
            .push(LineItem::days("PTO", 10.0, Recurrence::Yearly));

        let schedule = schedule_for(&config);
        assert_eq!(schedule.net_working_days, 251.0);

        let summary = roll_up(&config, &schedule, &TaxPolicy::default());
        // 12,000 health + 10 days * $50 * 9 h
        assert_eq!(summary.annual_benefits, 12_000.0 + 4_500.0);
        assert_eq!(summary.annual_wage, 50.0 * 251.0 * 9.0);
    }

    #[test]
    fn test_jurisdiction_selects_unemployment() {
        let mut config = reference_config();
        config.jurisdiction = "IL".to_string();
        let summary = roll_up(&config, &schedule_for(&config), &TaxPolicy::default());
        assert_eq!(summary.annual_unemployment_insurance, 507.93);
    }

    #[test]
    fn test_cost_per_technician_at() {
        let mut config = reference_config();
        config.fixed_overhead = vec![Category::with_items(
            "Rent",
            vec![LineItem::currency("Shop", 20_000.0, Recurrence::Yearly)],
        )];
        let summary = roll_up(&config, &schedule_for(&config), &TaxPolicy::default());
        let direct = summary.per_technician_direct_cost();
        assert_eq!(summary.cost_per_technician_at(4), direct + 5_000.0);
        assert_eq!(summary.cost_per_technician_at(0), direct + 20_000.0);
    }
}
