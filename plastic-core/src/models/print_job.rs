use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{ParseDecimalError, parse_finite_decimal};
use crate::calculations::CostError;

/// The five values exactly as a user typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPrintJob {
    pub filament_cost_per_kg: String,
    pub print_weight_grams: String,
    pub estimated_print_time_hours: String,
    pub electricity_cost_per_kwh_cents: String,
    pub printer_power_rating_watts: String,
}

/// Parsed inputs for one cost calculation.
///
/// No lower bound is enforced; zero and negative values are accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintJobInput {
    /// Filament price in dollars per kilogram.
    pub filament_cost_per_kg: Decimal,
    /// Weight of the printed object in grams.
    pub print_weight_grams: Decimal,
    /// Print duration in hours.
    pub estimated_print_time_hours: Decimal,
    /// Electricity price in cents per kWh.
    pub electricity_cost_per_kwh_cents: Decimal,
    /// Printer power draw in watts.
    pub printer_power_rating_watts: Decimal,
}

impl PrintJobInput {
    /// Parses every raw field, failing on the first one that is not a finite
    /// number.
    pub fn parse(raw: &RawPrintJob) -> Result<Self, CostError> {
        Ok(Self {
            filament_cost_per_kg: parse_field("filament_cost_per_kg", &raw.filament_cost_per_kg)?,
            print_weight_grams: parse_field("print_weight_grams", &raw.print_weight_grams)?,
            estimated_print_time_hours: parse_field(
                "estimated_print_time_hours",
                &raw.estimated_print_time_hours,
            )?,
            electricity_cost_per_kwh_cents: parse_field(
                "electricity_cost_per_kwh_cents",
                &raw.electricity_cost_per_kwh_cents,
            )?,
            printer_power_rating_watts: parse_field(
                "printer_power_rating_watts",
                &raw.printer_power_rating_watts,
            )?,
        })
    }
}

fn parse_field(
    field: &'static str,
    value: &str,
) -> Result<Decimal, CostError> {
    parse_finite_decimal(value).map_err(|e| match e {
        ParseDecimalError::Invalid { input } => CostError::NonNumeric {
            field,
            value: input,
        },
        ParseDecimalError::OutOfRange { input } => CostError::InputOutOfRange {
            field,
            value: input,
        },
    })
}
