//! Global settings CLI commands
//!
//! `set` changes the scalar inputs of the working file (headcount,
//! schedule, pricing, wage) and `fuel` changes the fuel drivers.

use clap::Args;

use crate::config::Settings;
use crate::display::{format_money, format_rate};
use crate::engine::compute;
use crate::error::BurdenResult;
use crate::models::{parse_amount, RateInput, Recurrence};
use crate::services::{ConfigService, FuelPatch};
use crate::storage::Workspace;

/// Arguments for `set`; amounts accept "$1,250" style input
#[derive(Args, Debug, Default)]
pub struct SetArgs {
    /// Number of technicians sharing fixed overhead (at least 1)
    #[arg(long)]
    pub technicians: Option<u32>,

    /// Billable share of working hours, in percent (clamped to 0-100)
    #[arg(long)]
    pub utilization: Option<String>,

    /// Working days per year before PTO and holidays
    #[arg(long)]
    pub working_days: Option<String>,

    #[arg(long)]
    pub hours_per_day: Option<String>,

    /// State code selecting the unemployment insurance amount
    #[arg(long)]
    pub jurisdiction: Option<String>,

    /// Hourly rate charged to customers
    #[arg(long)]
    pub target_rate: Option<String>,

    /// Turn the card processing fee on or off
    #[arg(long)]
    pub payment_fee: Option<bool>,

    /// Card processing fee percentage
    #[arg(long)]
    pub fee_percent: Option<String>,

    /// Technician wage amount
    #[arg(long)]
    pub wage: Option<String>,

    #[arg(long)]
    pub wage_recurrence: Option<Recurrence>,

    /// Workers' compensation and similar per-technician insurance
    #[arg(long)]
    pub insurance: Option<String>,

    #[arg(long)]
    pub insurance_recurrence: Option<Recurrence>,
}

/// Arguments for `fuel`
#[derive(Args, Debug, Default)]
pub struct FuelArgs {
    /// Miles driven per working day
    #[arg(long)]
    pub miles_per_day: Option<String>,

    /// Vehicle fuel economy
    #[arg(long)]
    pub mpg: Option<String>,

    /// Fuel price per gallon
    #[arg(long)]
    pub price: Option<String>,
}

fn amount(input: &Option<String>) -> Option<f64> {
    input.as_deref().map(parse_amount)
}

fn rate_input(current: RateInput, value: Option<f64>, recurrence: Option<Recurrence>) -> Option<RateInput> {
    if value.is_none() && recurrence.is_none() {
        return None;
    }
    Some(RateInput::new(
        value.unwrap_or(current.value),
        recurrence.unwrap_or(current.recurrence),
    ))
}

fn print_break_even(workspace: &Workspace, settings: &Settings) -> BurdenResult<()> {
    let estimate = compute(&workspace.load()?, &settings.tax_policy);
    println!(
        "Break-even rate: {}",
        format_rate(estimate.pricing.break_even_rate, &settings.currency_symbol)
    );
    Ok(())
}

/// Handle the set command
pub fn handle_set_command(workspace: &Workspace, settings: &Settings, args: SetArgs) -> BurdenResult<()> {
    let changed = workspace.update(|config| {
        let wage = rate_input(config.wage.wage, amount(&args.wage), args.wage_recurrence);
        let insurance = rate_input(
            config.wage.insurance,
            amount(&args.insurance),
            args.insurance_recurrence,
        );

        let mut service = ConfigService::new(config);
        let mut changed = Vec::new();

        if let Some(count) = args.technicians {
            service.set_technician_count(count);
            changed.push("technicians");
        }
        if let Some(rate) = amount(&args.utilization) {
            service.set_utilization(rate);
            changed.push("utilization");
        }
        if let Some(days) = amount(&args.working_days) {
            service.set_working_days(days);
            changed.push("working days");
        }
        if let Some(hours) = amount(&args.hours_per_day) {
            service.set_hours_per_day(hours);
            changed.push("hours per day");
        }
        if let Some(code) = args.jurisdiction.as_deref() {
            service.set_jurisdiction(code)?;
            changed.push("jurisdiction");
        }
        if let Some(rate) = amount(&args.target_rate) {
            service.set_target_rate(rate);
            changed.push("target rate");
        }
        let fee_percent = amount(&args.fee_percent);
        if args.payment_fee.is_some() || fee_percent.is_some() {
            service.set_payment_fee(args.payment_fee, fee_percent);
            changed.push("payment fee");
        }
        if let Some(wage) = wage {
            service.set_wage(wage);
            changed.push("wage");
        }
        if let Some(insurance) = insurance {
            service.set_insurance(insurance);
            changed.push("insurance");
        }

        Ok(changed)
    })?;

    if changed.is_empty() {
        println!("No changes specified. Run 'burdenrate set --help' to see the settings.");
        return Ok(());
    }

    println!("Updated: {}", changed.join(", "));
    print_break_even(workspace, settings)
}

/// Handle the fuel command
pub fn handle_fuel_command(workspace: &Workspace, settings: &Settings, args: FuelArgs) -> BurdenResult<()> {
    let patch = FuelPatch {
        miles_per_working_day: amount(&args.miles_per_day),
        miles_per_gallon: amount(&args.mpg),
        price_per_gallon: amount(&args.price),
    };

    if patch == FuelPatch::default() {
        println!("No changes specified. Use --miles-per-day, --mpg or --price.");
        return Ok(());
    }

    let fuel = workspace.update(|config| {
        ConfigService::new(config).set_fuel(patch);
        Ok(config.fuel)
    })?;

    println!(
        "Fuel: {} miles/day, {} mpg, {}/gal ({}/day)",
        fuel.miles_per_working_day,
        fuel.miles_per_gallon,
        format_money(fuel.price_per_gallon, &settings.currency_symbol),
        format_money(fuel.daily_cost(), &settings.currency_symbol)
    );
    print_break_even(workspace, settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_input_keeps_unspecified_parts() {
        let current = RateInput::hourly(30.0);
        assert_eq!(rate_input(current, None, None), None);

        let raised = rate_input(current, Some(35.0), None).unwrap();
        assert_eq!(raised.value, 35.0);
        assert_eq!(raised.recurrence, Recurrence::Hourly);

        let yearly = rate_input(current, None, Some(Recurrence::Yearly)).unwrap();
        assert_eq!(yearly.value, 30.0);
        assert_eq!(yearly.recurrence, Recurrence::Yearly);
    }

    #[test]
    fn test_amount_parsing() {
        assert_eq!(amount(&Some("$1,250".to_string())), Some(1250.0));
        assert_eq!(amount(&Some("abc".to_string())), Some(0.0));
        assert_eq!(amount(&None), None);
    }
}
