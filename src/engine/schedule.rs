//! Schedule resolution
//!
//! Derives net working days and annual hours from the base calendar, the
//! day-denominated benefit items (PTO, holidays) and utilization.
//!
//! A day-denominated item's value is taken as an absolute count of days per
//! year; its recurrence is ignored here. Saved configurations rely on this,
//! so it differs deliberately from how every other item is annualized.

use serde::Serialize;

use crate::models::estimator::clamp_utilization;
use crate::models::{LineItem, ValueUnit};

/// Working time available to one technician over a year
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Schedule {
    /// Base working days minus day-denominated benefits, never negative
    pub net_working_days: f64,
    /// Net working days times hours per day
    pub total_annual_hours: f64,
    /// Total hours times utilization
    pub billable_hours: f64,
    /// Utilization actually applied (clamped to 0-100)
    pub utilization_rate: f64,
    pub hours_per_working_day: f64,
}

/// Sum of the day counts of all day-denominated items
pub fn day_unit_total(benefit_items: &[LineItem]) -> f64 {
    benefit_items
        .iter()
        .filter(|item| item.unit == ValueUnit::Days)
        .map(|item| item.value)
        .sum()
}

/// Resolve the working schedule
pub fn resolve_schedule(
    base_calendar_working_days: f64,
    benefit_items: &[LineItem],
    hours_per_working_day: f64,
    utilization_rate: f64,
) -> Schedule {
    let days_off = day_unit_total(benefit_items);
    let net_working_days = (base_calendar_working_days - days_off).max(0.0);
    let total_annual_hours = net_working_days * hours_per_working_day;
    let utilization_rate = clamp_utilization(utilization_rate);

    Schedule {
        net_working_days,
        total_annual_hours,
        billable_hours: billable_hours_at(total_annual_hours, utilization_rate),
        utilization_rate,
        hours_per_working_day,
    }
}

/// Billable hours at a utilization percentage (clamped to 0-100)
pub fn billable_hours_at(total_annual_hours: f64, utilization_rate: f64) -> f64 {
    total_annual_hours * (clamp_utilization(utilization_rate) / 100.0)
}

impl Schedule {
    /// The same schedule at a different utilization rate
    pub fn with_utilization(&self, utilization_rate: f64) -> Self {
        let utilization_rate = clamp_utilization(utilization_rate);
        Self {
            billable_hours: billable_hours_at(self.total_annual_hours, utilization_rate),
            utilization_rate,
            ..*self
        }
    }
}
