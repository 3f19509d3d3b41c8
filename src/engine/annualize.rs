//! Frequency normalization
//!
//! Converts a value with a recurrence period into its total for one year.

use crate::models::Recurrence;

/// Months per year used for monthly recurrence
pub const MONTHS_PER_YEAR: f64 = 12.0;

/// Annualize a value given the working calendar
///
/// - hourly: `value * working_days * hours_per_day`
/// - daily: `value * working_days`
/// - monthly: `value * 12`
/// - yearly: `value`
///
/// An unrecognized recurrence contributes zero.
pub fn annualize(
    value: f64,
    recurrence: Recurrence,
    working_days_per_year: f64,
    hours_per_working_day: f64,
) -> f64 {
    match recurrence {
        Recurrence::Hourly => value * working_days_per_year * hours_per_working_day,
        Recurrence::Daily => value * working_days_per_year,
        Recurrence::Monthly => value * MONTHS_PER_YEAR,
        Recurrence::Yearly => value,
        Recurrence::Unknown => 0.0,
    }
}
