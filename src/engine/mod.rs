//! Cost engine
//!
//! Pure functions from an [`EstimatorConfig`] to the derived figures. Data
//! flows one way: schedule, then cost roll-up, then pricing, then (on
//! demand) projections. Nothing is cached; every call recomputes from the
//! configuration it is given.

pub mod aggregate;
pub mod annualize;
pub mod pricing;
pub mod rollup;
pub mod scenarios;
pub mod schedule;
pub mod valuation;

use serde::Serialize;

use crate::models::{EstimatorConfig, TaxPolicy};

pub use aggregate::{annual_total, breakdown, CategoryBreakdown};
pub use annualize::annualize;
pub use pricing::{price_and_margin, MarginBand, PricingInputs, PricingSummary};
pub use rollup::{roll_up, CostSummary};
pub use scenarios::{project, HeadcountScenario, Projections, UtilizationScenario};
pub use schedule::{resolve_schedule, Schedule};
pub use valuation::{annual_cost, resolve_base_currency_value, ValuationContext};

/// Costs expressed per clock hour (not per billable hour)
///
/// Every figure is `None` when there are no working hours in the year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HourlyBreakdown {
    /// Total cost per technician over total annual hours
    pub cost_per_clock_hour: Option<f64>,
    /// Labor cost (wage plus burden plus benefits) over total annual hours
    pub labor_burden_per_hour: Option<f64>,
    pub benefits_per_hour: Option<f64>,
    pub payroll_tax_per_hour: Option<f64>,
}

/// Share of the per-technician cost taken by each cost group, in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostComposition {
    pub labor_percent: f64,
    pub variable_percent: f64,
    pub fixed_percent: f64,
}

impl CostComposition {
    fn from_costs(costs: &CostSummary) -> Self {
        let total = costs.total_annual_cost_per_technician;
        let share = |part: f64| {
            pricing::checked_ratio(part * 100.0, total).unwrap_or(0.0)
        };
        Self {
            labor_percent: share(costs.total_annual_labor_cost),
            variable_percent: share(costs.total_annual_variable_cost),
            fixed_percent: share(costs.fixed_cost_per_technician),
        }
    }
}

/// Every derived figure for one configuration
///
/// Both the dashboard and the printable report render from this value; they
/// only reformat it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Estimate {
    pub schedule: Schedule,
    pub costs: CostSummary,
    pub pricing: PricingSummary,
    pub hourly: HourlyBreakdown,
    pub composition: CostComposition,
    /// Billable hours rounded to whole hours for display
    pub billable_hours_rounded: f64,
    pub target_billing_rate: f64,
    pub inputs: PricingInputs,
}

impl Estimate {
    /// What-if projections over this estimate
    pub fn projections(&self) -> Projections {
        project(&self.costs, &self.schedule, &self.inputs)
    }

    /// Margin band of the current pricing
    pub fn margin_band(&self) -> MarginBand {
        self.pricing.margin_band
    }
}

/// Pricing inputs taken from a configuration
pub fn pricing_inputs(config: &EstimatorConfig) -> PricingInputs {
    PricingInputs::new(
        config.target_billing_rate,
        config.payment_fee_enabled,
        config.payment_fee_percentage,
    )
}

/// Schedule for a configuration
pub fn schedule_for(config: &EstimatorConfig) -> Schedule {
    resolve_schedule(
        config.base_calendar_working_days,
        &config.benefits.items,
        config.hours_per_working_day,
        config.utilization_rate,
    )
}

/// Compute every derived figure from a configuration
pub fn compute(config: &EstimatorConfig, policy: &TaxPolicy) -> Estimate {
    let schedule = schedule_for(config);
    tracing::debug!(
        net_working_days = schedule.net_working_days,
        billable_hours = schedule.billable_hours,
        "resolved schedule"
    );

    let costs = roll_up(config, &schedule, policy);
    let inputs = pricing_inputs(config);
    let pricing = price_and_margin(
        costs.total_annual_cost_per_technician,
        schedule.billable_hours,
        &inputs,
    );

    let per_clock_hour = |annual: f64| pricing::checked_ratio(annual, schedule.total_annual_hours);
    let hourly = HourlyBreakdown {
        cost_per_clock_hour: per_clock_hour(costs.total_annual_cost_per_technician),
        labor_burden_per_hour: per_clock_hour(costs.total_annual_labor_cost),
        benefits_per_hour: per_clock_hour(costs.annual_benefits),
        payroll_tax_per_hour: per_clock_hour(costs.annual_payroll_tax),
    };

    tracing::debug!(
        break_even = ?pricing.break_even_rate,
        margin = pricing.profit_margin_percent,
        "priced estimate"
    );

    Estimate {
        schedule,
        composition: CostComposition::from_costs(&costs),
        costs,
        pricing,
        hourly,
        billable_hours_rounded: schedule.billable_hours.round(),
        target_billing_rate: config.target_billing_rate,
        inputs,
    }
}

/// Compute with the built-in tax policy
pub fn compute_default(config: &EstimatorConfig) -> Estimate {
    compute(config, &TaxPolicy::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{LineItem, RateInput, Recurrence, WageConfig};

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
        config.target_billing_rate = 150.0;
        config.benefits.items = vec![LineItem::currency("Health", 1000.0, Recurrence::Monthly)];
        config
    }

    #[test]
    fn test_end_to_end_reference() {
        let estimate = compute_default(&reference_config());

        assert_eq!(estimate.schedule.total_annual_hours, 2349.0);
        assert!(approx_eq(estimate.schedule.billable_hours, 1526.85));
        assert!(approx_eq(estimate.costs.total_annual_cost_per_technician, 143_562.925));

        let break_even = estimate.pricing.break_even_rate.unwrap();
        assert!(approx_eq(break_even, 94.0256));
        assert!(approx_eq(estimate.pricing.profit_per_hour.unwrap(), 150.0 - break_even));
        assert_eq!(estimate.billable_hours_rounded, 1527.0);
        assert_eq!(estimate.margin_band(), MarginBand::Healthy);
    }

    #[test]
    fn test_hourly_breakdown() {
        let estimate = compute_default(&reference_config());
        let hourly = estimate.hourly;

        assert!(approx_eq(hourly.labor_burden_per_hour.unwrap(), 143_562.925 / 2349.0));
        assert!(approx_eq(hourly.benefits_per_hour.unwrap(), 12_000.0 / 2349.0));
        assert!(approx_eq(hourly.payroll_tax_per_hour.unwrap(), 3.825));
        assert_eq!(
            hourly.cost_per_clock_hour.unwrap(),
            estimate.costs.total_annual_cost_per_technician / 2349.0
        );
    }

    #[test]
    fn test_zero_utilization_sentinel() {
        let mut config = reference_config();
        config.utilization_rate = 0.0;
        let estimate = compute_default(&config);

        assert_eq!(estimate.schedule.billable_hours, 0.0);
        assert_eq!(estimate.pricing.break_even_rate, None);
        assert_eq!(estimate.pricing.profit_per_hour, None);
        assert_eq!(estimate.pricing.profit_margin_percent, 0.0);
        assert_eq!(estimate.margin_band(), MarginBand::Critical);
        // clock-hour figures are still defined
        assert!(estimate.hourly.cost_per_clock_hour.is_some());
    }

    #[test]
    fn test_no_working_hours_sentinel() {
        let mut config = reference_config();
        config.hours_per_working_day = 0.0;
        let estimate = compute_default(&config);

        assert_eq!(estimate.hourly.cost_per_clock_hour, None);
        assert_eq!(estimate.hourly.labor_burden_per_hour, None);
        assert_eq!(estimate.projections().min_utilization_percent, None);
    }

    #[test]
    fn test_composition_sums_to_hundred() {
        let estimate = compute_default(&EstimatorConfig::default());
        let c = estimate.composition;
        assert!(approx_eq(c.labor_percent + c.variable_percent + c.fixed_percent, 100.0));
        assert!(c.labor_percent > c.fixed_percent);
    }

    #[test]
    fn test_composition_zero_cost() {
        let mut config = EstimatorConfig::blank();
        config.wage = WageConfig {
            wage: RateInput::hourly(0.0),
            insurance: RateInput::hourly(0.0),
        };
        config.jurisdiction = "WI".to_string();
        let mut policy = TaxPolicy::default();
        policy.unemployment_by_jurisdiction.insert("WI".to_string(), 0.0);

        let estimate = compute(&config, &policy);
        assert_eq!(estimate.costs.total_annual_cost_per_technician, 0.0);
        assert_eq!(estimate.composition.labor_percent, 0.0);
        assert_eq!(estimate.composition.fixed_percent, 0.0);
    }

    #[test]
    fn test_compute_does_not_mutate_and_is_repeatable() {
        let config = EstimatorConfig::default();
        let before = config.clone();
        let first = compute_default(&config);
        let second = compute_default(&config);
        assert_eq!(config, before);
        assert_eq!(first, second);
    }

    #[test]
    fn test_projections_use_current_estimate() {
        let estimate = compute_default(&reference_config());
        let projections = estimate.projections();

        let current = projections
            .utilization
            .iter()
            .find(|row| row.offset == 0.0)
            .unwrap();
        assert_eq!(current.break_even_rate, estimate.pricing.break_even_rate);
        assert_eq!(current.profit_margin_percent, estimate.pricing.profit_margin_percent);

        let solo = &projections.headcount[0];
        assert_eq!(solo.technician_count, 1);
        assert_eq!(
            solo.total_annual_cost_per_technician,
            estimate.costs.total_annual_cost_per_technician
        );
        assert!(projections.break_even_reachable());
    }

    #[test]
    fn test_every_figure_finite() {
        let mut config = EstimatorConfig::default();
        config.fuel.miles_per_gallon = 0.0;
        config.technician_count = 0;
        config.utilization_rate = f64::NAN;
        let estimate = compute_default(&config);

        assert!(estimate.costs.total_annual_cost_per_technician.is_finite());
        assert!(estimate.pricing.profit_margin_percent.is_finite());
        assert!(estimate.composition.labor_percent.is_finite());
        assert_eq!(estimate.schedule.utilization_rate, 0.0);
    }
}
