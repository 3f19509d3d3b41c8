//! Pricing and margin calculation
//!
//! Turns an annual cost and a number of billable hours into a break-even
//! rate, and compares it with the target billing rate.
//!
//! Division-by-zero policy: a break-even rate on zero billable hours is
//! undefined (`None`), and so is everything derived from it per hour. Margin
//! percentages fall back to zero, which bands as critical.

use serde::Serialize;
use std::fmt;

use crate::models::numeric::finite_or_zero;

/// Margin at or above which pricing is considered healthy
pub const HEALTHY_MARGIN_PERCENT: f64 = 20.0;

/// Divisor producing the advisory rate for a 20% margin
const TWENTY_PCT_MARGIN_DIVISOR: f64 = 0.8;

/// Scale factor for the margin gauge (40% margin fills the gauge)
const MARGIN_GAUGE_SCALE: f64 = 2.5;

/// The customer-facing side of the calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricingInputs {
    pub target_rate: f64,
    pub fee_enabled: bool,
    pub fee_percentage: f64,
}

impl PricingInputs {
    pub fn new(target_rate: f64, fee_enabled: bool, fee_percentage: f64) -> Self {
        Self {
            target_rate,
            fee_enabled,
            fee_percentage,
        }
    }

    /// Payment processing fee charged per billed hour
    pub fn fee_per_hour(&self) -> f64 {
        if self.fee_enabled {
            self.target_rate * self.fee_percentage / 100.0
        } else {
            0.0
        }
    }
}

/// Three-way classification of a profit margin
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MarginBand {
    /// Margin of 20% or more
    Healthy,
    /// Positive but under 20%
    Marginal,
    /// Zero or negative
    Critical,
}

impl MarginBand {
    /// Classify a profit margin percentage
    pub fn from_margin(profit_margin_percent: f64) -> Self {
        if profit_margin_percent >= HEALTHY_MARGIN_PERCENT {
            Self::Healthy
        } else if profit_margin_percent > 0.0 {
            Self::Marginal
        } else {
            Self::Critical
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Healthy => "Healthy",
            Self::Marginal => "Marginal",
            Self::Critical => "Critical",
        }
    }
}

impl fmt::Display for MarginBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Result of the pricing calculation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricingSummary {
    /// Hourly rate that exactly recovers annual cost; `None` with no billable hours
    pub break_even_rate: Option<f64>,
    pub payment_fee_per_hour: f64,
    /// Target rate minus break-even minus fee; `None` when break-even is undefined
    pub profit_per_hour: Option<f64>,
    /// Profit as a percentage of the target rate; zero when undefined
    pub profit_margin_percent: f64,
    /// Advisory `break_even / 0.8`, deliberately not adjusted for the payment fee
    pub suggested_rate_for_20_pct_margin: Option<f64>,
    pub margin_band: MarginBand,
}

impl PricingSummary {
    /// Width (0-100) of the margin gauge
    pub fn margin_gauge_percent(&self) -> f64 {
        (self.profit_margin_percent * MARGIN_GAUGE_SCALE).clamp(0.0, 100.0)
    }
}

/// Divide, returning `None` when the result would not be a finite number
pub fn checked_ratio(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    let ratio = numerator / denominator;
    ratio.is_finite().then_some(ratio)
}

/// Annual cost divided by billable hours
pub fn break_even_rate(annual_cost: f64, billable_hours: f64) -> Option<f64> {
    checked_ratio(annual_cost, billable_hours)
}

/// Profit margin percentage, zero when there is no basis for a ratio
pub fn profit_margin_percent(profit_per_hour: Option<f64>, target_rate: f64) -> f64 {
    match profit_per_hour {
        Some(profit) if target_rate > 0.0 => finite_or_zero(profit / target_rate * 100.0),
        _ => 0.0,
    }
}

/// Annual profit at a given number of billable hours
///
/// Equals `profit_per_hour * billable_hours` and stays defined
/// (`-annual_cost`) when there are no billable hours.
pub fn annual_profit(annual_cost: f64, billable_hours: f64, inputs: &PricingInputs) -> f64 {
    (inputs.target_rate - inputs.fee_per_hour()) * billable_hours - annual_cost
}

/// Compute break-even, profit and margin for one technician
pub fn price_and_margin(
    total_annual_cost_per_technician: f64,
    billable_hours: f64,
    inputs: &PricingInputs,
) -> PricingSummary {
    let break_even = break_even_rate(total_annual_cost_per_technician, billable_hours);
    let payment_fee_per_hour = inputs.fee_per_hour();
    let profit_per_hour = break_even.map(|rate| inputs.target_rate - rate - payment_fee_per_hour);
    let margin = profit_margin_percent(profit_per_hour, inputs.target_rate);

    if break_even.is_none() {
        tracing::debug!("no billable hours; break-even rate is undefined");
    }

    PricingSummary {
        break_even_rate: break_even,
        payment_fee_per_hour,
        profit_per_hour,
        profit_margin_percent: margin,
        suggested_rate_for_20_pct_margin: break_even.map(|rate| rate / TWENTY_PCT_MARGIN_DIVISOR),
        margin_band: MarginBand::from_margin(margin),
    }
}
