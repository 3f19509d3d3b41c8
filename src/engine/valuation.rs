//! Line item valuation
//!
//! Every line item goes through the same two steps: its value is converted to
//! dollars according to its unit, then annualized according to its
//! recurrence. There is no shortcut path for any kind of item.

use crate::models::{LineItem, ValueUnit};

use super::annualize::annualize;

/// The calendar and wage figures needed to value line items
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValuationContext {
    /// Hourly wage used for labor-hour and labor-day items
    pub hourly_wage: f64,
    /// Net working days per year
    pub working_days_per_year: f64,
    pub hours_per_working_day: f64,
}

impl ValuationContext {
    pub fn new(hourly_wage: f64, working_days_per_year: f64, hours_per_working_day: f64) -> Self {
        Self {
            hourly_wage,
            working_days_per_year,
            hours_per_working_day,
        }
    }
}

/// Convert an item's raw value to a dollar amount for one recurrence period
pub fn resolve_base_currency_value(item: &LineItem, hourly_wage: f64, hours_per_working_day: f64) -> f64 {
    match item.unit {
        ValueUnit::Currency => item.value,
        ValueUnit::Hours => item.value * hourly_wage,
        ValueUnit::Days => item.value * hourly_wage * hours_per_working_day,
        ValueUnit::Unknown => 0.0,
    }
}

/// Annual dollar cost of a line item
pub fn annual_cost(item: &LineItem, ctx: &ValuationContext) -> f64 {
    let base = resolve_base_currency_value(item, ctx.hourly_wage, ctx.hours_per_working_day);
    annualize(
        base,
        item.recurrence,
        ctx.working_days_per_year,
        ctx.hours_per_working_day,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Recurrence;

    #[test]
    fn test_currency_unchanged() {
        let item = LineItem::currency("Ad Spend", 4000.0, Recurrence::Yearly);
        assert_eq!(resolve_base_currency_value(&item, 50.0, 8.0), 4000.0);
    }

    #[test]
    fn test_hours_and_days_use_wage() {
        let hours = LineItem::hours("Lunch", 1.0, Recurrence::Daily);
        assert_eq!(resolve_base_currency_value(&hours, 50.0, 8.0), 50.0);

        let days = LineItem::days("PTO", 2.0, Recurrence::Yearly);
        assert_eq!(resolve_base_currency_value(&days, 50.0, 8.0), 800.0);
    }

    #[test]
    fn test_labor_hours_daily_item() {
        // wage $50, one paid hour every working day, 245 days
        let item = LineItem::hours("Paid Lunch", 1.0, Recurrence::Daily);
        let ctx = ValuationContext::new(50.0, 245.0, 8.0);
        assert_eq!(annual_cost(&item, &ctx), 12_250.0);
    }

    #[test]
    fn test_composition_matches_direct_substitution() {
        let ctx = ValuationContext::new(42.0, 230.0, 9.0);
        for &recurrence in Recurrence::all() {
            let item = LineItem::hours("x", 1.5, recurrence);
            let direct = annualize(1.5 * 42.0, recurrence, 230.0, 9.0);
            assert_eq!(annual_cost(&item, &ctx), direct);
        }
    }

    #[test]
    fn test_unknown_unit_is_zero() {
        let mut item = LineItem::currency("Corrupt", 100.0, Recurrence::Monthly);
        item.unit = ValueUnit::Unknown;
        let ctx = ValuationContext::new(50.0, 245.0, 8.0);
        assert_eq!(annual_cost(&item, &ctx), 0.0);
    }
}
