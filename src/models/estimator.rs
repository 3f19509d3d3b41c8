//! The estimator configuration
//!
//! `EstimatorConfig` is the single value every calculation is derived from.
//! It holds the global settings, the wage inputs, the benefits list, both
//! overhead category collections and the fuel model. Nothing derived from it
//! is ever stored on it.

use serde::{Deserialize, Serialize};

use super::category::Category;
use super::numeric::{finite_or_zero, lenient_f64};
use super::recurrence::Recurrence;

/// Name of the singleton benefits category
pub const BENEFITS_CATEGORY_NAME: &str = "Benefits";

/// A value with a recurrence, used for wage and insurance inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RateInput {
    #[serde(deserialize_with = "lenient_f64")]
    pub value: f64,
    #[serde(alias = "freq")]
    pub recurrence: Recurrence,
}

impl Default for RateInput {
    fn default() -> Self {
        Self::hourly(0.0)
    }
}

impl RateInput {
    pub fn new(value: f64, recurrence: Recurrence) -> Self {
        Self { value, recurrence }
    }

    pub fn hourly(value: f64) -> Self {
        Self::new(value, Recurrence::Hourly)
    }
}

/// Base pay and per-hour insurance add-on
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WageConfig {
    /// Base pay; its value is also the hourly wage used to price hour/day items
    pub wage: RateInput,
    /// Insurance contribution
    pub insurance: RateInput,
}

impl Default for WageConfig {
    fn default() -> Self {
        Self {
            wage: RateInput::hourly(30.0),
            insurance: RateInput::hourly(2.0),
        }
    }
}

impl WageConfig {
    /// Hourly wage used to convert labor-hour and labor-day items to dollars
    ///
    /// This is the wage's raw value regardless of its recurrence.
    pub fn hourly_wage(&self) -> f64 {
        self.wage.value
    }
}

/// Fuel cost drivers for one technician's vehicle
///
/// The annual cost is always derived from the three drivers and the current
/// number of working days, so it can never go stale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FuelModel {
    #[serde(alias = "milesPerDay", deserialize_with = "lenient_f64")]
    pub miles_per_working_day: f64,
    #[serde(alias = "mpg", deserialize_with = "lenient_f64")]
    pub miles_per_gallon: f64,
    #[serde(alias = "gasPrice", deserialize_with = "lenient_f64")]
    pub price_per_gallon: f64,
}

impl Default for FuelModel {
    fn default() -> Self {
        Self {
            miles_per_working_day: 80.0,
            miles_per_gallon: 20.0,
            price_per_gallon: 4.00,
        }
    }
}

impl FuelModel {
    /// A fuel model that costs nothing
    pub fn none() -> Self {
        Self {
            miles_per_working_day: 0.0,
            miles_per_gallon: 0.0,
            price_per_gallon: 0.0,
        }
    }

    /// Fuel cost for one working day; zero when fuel economy is not positive
    pub fn daily_cost(&self) -> f64 {
        if self.miles_per_gallon <= 0.0 {
            return 0.0;
        }
        finite_or_zero((self.miles_per_working_day / self.miles_per_gallon) * self.price_per_gallon)
    }

    /// Fuel cost over the given number of working days
    pub fn annual_cost(&self, net_working_days: f64) -> f64 {
        finite_or_zero(self.daily_cost() * net_working_days)
    }
}

/// Complete calculator configuration
#[derive(Debug, Clone, PartialEq)]
pub struct EstimatorConfig {
    /// Number of technicians sharing fixed overhead
    pub technician_count: u32,
    /// Percentage (0-100) of working hours that are billable
    pub utilization_rate: f64,
    /// Working days per year before PTO and holidays
    pub base_calendar_working_days: f64,
    pub hours_per_working_day: f64,
    /// State code selecting the unemployment insurance amount
    pub jurisdiction: String,
    /// Hourly rate charged to customers
    pub target_billing_rate: f64,
    pub payment_fee_enabled: bool,
    /// Card processing fee as a percentage of the billed rate
    pub payment_fee_percentage: f64,
    pub wage: WageConfig,
    pub benefits: Category,
    /// Per-technician overhead categories
    pub variable_overhead: Vec<Category>,
    pub fuel: FuelModel,
    /// Company-wide overhead categories, shared across technicians
    pub fixed_overhead: Vec<Category>,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        crate::storage::init::starter_config()
    }
}

impl EstimatorConfig {
    /// The default global settings with every cost list empty and no fuel cost
    pub fn blank() -> Self {
        Self {
            technician_count: 1,
            utilization_rate: 65.0,
            base_calendar_working_days: 245.0,
            hours_per_working_day: 8.0,
            jurisdiction: "WI".to_string(),
            target_billing_rate: 340.0,
            payment_fee_enabled: false,
            payment_fee_percentage: 3.0,
            wage: WageConfig::default(),
            benefits: Category::new(BENEFITS_CATEGORY_NAME),
            variable_overhead: Vec::new(),
            fuel: FuelModel::none(),
            fixed_overhead: Vec::new(),
        }
    }

    /// Technician count used for fixed-cost allocation (never zero)
    pub fn effective_technician_count(&self) -> u32 {
        self.technician_count.max(1)
    }

    /// Utilization clamped to the 0-100 range
    pub fn effective_utilization(&self) -> f64 {
        clamp_utilization(self.utilization_rate)
    }

    /// Payment processing fee percentage, or zero when disabled
    pub fn effective_fee_percentage(&self) -> f64 {
        if self.payment_fee_enabled {
            self.payment_fee_percentage
        } else {
            0.0
        }
    }

    /// Total number of line items across every list
    pub fn item_count(&self) -> usize {
        self.benefits.len()
            + self.variable_overhead.iter().map(Category::len).sum::<usize>()
            + self.fixed_overhead.iter().map(Category::len).sum::<usize>()
    }
}

/// Clamp a utilization percentage into 0-100, treating NaN as zero
pub fn clamp_utilization(rate: f64) -> f64 {
    finite_or_zero(rate).clamp(0.0, 100.0)
}
