//! What-if projections
//!
//! Recomputes pricing under shifted utilization and different headcounts.
//! Every projection works from an already computed cost summary and schedule;
//! the configuration itself is never touched.

use serde::Serialize;

use super::pricing::{
    annual_profit, break_even_rate, profit_margin_percent, MarginBand, PricingInputs,
};
use super::rollup::CostSummary;
use super::schedule::Schedule;

/// Percentage-point shifts applied to the current utilization
pub const UTILIZATION_OFFSETS: [f64; 5] = [-10.0, -5.0, 0.0, 5.0, 10.0];

/// Technician counts evaluated for fixed-overhead dilution
pub const HEADCOUNT_CANDIDATES: [u32; 7] = [1, 2, 3, 4, 5, 20, 100];

/// Pricing at one shifted utilization rate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UtilizationScenario {
    /// Shift from the configured utilization, in percentage points
    pub offset: f64,
    /// Utilization after shifting (clamped to 0-100)
    pub utilization_rate: f64,
    pub billable_hours: f64,
    pub break_even_rate: Option<f64>,
    pub profit_per_hour: Option<f64>,
    pub profit_margin_percent: f64,
    pub annual_profit: f64,
    pub margin_band: MarginBand,
}

/// Pricing if fixed overhead were shared by a different number of technicians
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeadcountScenario {
    pub technician_count: u32,
    pub fixed_cost_per_technician: f64,
    pub total_annual_cost_per_technician: f64,
    pub break_even_rate: Option<f64>,
    pub profit_per_hour: Option<f64>,
    pub profit_margin_percent: f64,
    /// Annual profit earned by one technician
    pub profit_per_technician: f64,
    /// Annual profit across all technicians
    pub company_annual_profit: f64,
    pub margin_band: MarginBand,
}

/// All projections for one configuration
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projections {
    pub utilization: Vec<UtilizationScenario>,
    pub headcount: Vec<HeadcountScenario>,
    /// Utilization needed for revenue to cover cost; `None` with no working hours
    pub min_utilization_percent: Option<f64>,
}

impl Projections {
    /// Whether break-even is reachable at 100% utilization or less
    pub fn break_even_reachable(&self) -> bool {
        matches!(self.min_utilization_percent, Some(pct) if pct <= 100.0)
    }
}

fn profit_per_hour_for(break_even: Option<f64>, inputs: &PricingInputs) -> Option<f64> {
    break_even.map(|rate| inputs.target_rate - rate - inputs.fee_per_hour())
}

/// Pricing at each utilization offset
pub fn utilization_sensitivity_with_offsets(
    costs: &CostSummary,
    schedule: &Schedule,
    inputs: &PricingInputs,
    offsets: &[f64],
) -> Vec<UtilizationScenario> {
    let annual_cost = costs.total_annual_cost_per_technician;

    offsets
        .iter()
        .map(|&offset| {
            let shifted = schedule.with_utilization(schedule.utilization_rate + offset);
            let break_even = break_even_rate(annual_cost, shifted.billable_hours);
            let profit_per_hour = profit_per_hour_for(break_even, inputs);
            let margin = profit_margin_percent(profit_per_hour, inputs.target_rate);

            UtilizationScenario {
                offset,
                utilization_rate: shifted.utilization_rate,
                billable_hours: shifted.billable_hours,
                break_even_rate: break_even,
                profit_per_hour,
                profit_margin_percent: margin,
                annual_profit: annual_profit(annual_cost, shifted.billable_hours, inputs),
                margin_band: MarginBand::from_margin(margin),
            }
        })
        .collect()
}

/// Pricing at the standard utilization offsets
pub fn utilization_sensitivity(
    costs: &CostSummary,
    schedule: &Schedule,
    inputs: &PricingInputs,
) -> Vec<UtilizationScenario> {
    utilization_sensitivity_with_offsets(costs, schedule, inputs, &UTILIZATION_OFFSETS)
}

/// Pricing for each candidate technician count
///
/// Labor and variable costs stay per technician; only fixed overhead is
/// divided by the candidate count.
pub fn headcount_scalability_with_candidates(
    costs: &CostSummary,
    schedule: &Schedule,
    inputs: &PricingInputs,
    candidates: &[u32],
) -> Vec<HeadcountScenario> {
    candidates
        .iter()
        .map(|&count| {
            let technician_count = count.max(1);
            let fixed_cost_per_technician = costs.total_annual_fixed_cost / technician_count as f64;
            let cost = costs.per_technician_direct_cost() + fixed_cost_per_technician;
            let break_even = break_even_rate(cost, schedule.billable_hours);
            let profit_per_hour = profit_per_hour_for(break_even, inputs);
            let margin = profit_margin_percent(profit_per_hour, inputs.target_rate);
            let profit_per_technician = annual_profit(cost, schedule.billable_hours, inputs);

            HeadcountScenario {
                technician_count,
                fixed_cost_per_technician,
                total_annual_cost_per_technician: cost,
                break_even_rate: break_even,
                profit_per_hour,
                profit_margin_percent: margin,
                profit_per_technician,
                company_annual_profit: profit_per_technician * technician_count as f64,
                margin_band: MarginBand::from_margin(margin),
            }
        })
        .collect()
}

/// Pricing for the standard candidate technician counts
pub fn headcount_scalability(
    costs: &CostSummary,
    schedule: &Schedule,
    inputs: &PricingInputs,
) -> Vec<HeadcountScenario> {
    headcount_scalability_with_candidates(costs, schedule, inputs, &HEADCOUNT_CANDIDATES)
}

/// Utilization percentage at which revenue at the target rate covers cost
///
/// Returns `Some(0.0)` when the target rate is not positive and `None` when
/// there are no working hours at all. The result may exceed 100.
pub fn min_utilization_to_break_even(
    total_annual_cost_per_technician: f64,
    total_potential_annual_hours: f64,
    target_rate: f64,
) -> Option<f64> {
    if target_rate <= 0.0 {
        return Some(0.0);
    }
    let required_billable_hours = total_annual_cost_per_technician / target_rate;
    break_even_rate(required_billable_hours * 100.0, total_potential_annual_hours)
}

/// Run every projection
pub fn project(costs: &CostSummary, schedule: &Schedule, inputs: &PricingInputs) -> Projections {
    let projections = Projections {
        utilization: utilization_sensitivity(costs, schedule, inputs),
        headcount: headcount_scalability(costs, schedule, inputs),
        min_utilization_percent: min_utilization_to_break_even(
            costs.total_annual_cost_per_technician,
            schedule.total_annual_hours,
            inputs.target_rate,
        ),
    };
    tracing::debug!(
        min_utilization = ?projections.min_utilization_percent,
        "computed projections"
    );
    projections
}
