//! Print cost calculation.
//!
//! Turns filament price, print weight, electricity price, printer power draw
//! and print duration into a filament cost, an electricity cost and their sum.
//!
//! # Calculation Steps
//!
//! | Step | Description |
//! |------|-------------|
//! | 1    | Print weight in kg: grams / 1000 |
//! | 2    | Filament cost: cost per kg × Step 1 |
//! | 3    | Electricity price in dollars: cents / 100 |
//! | 4    | Printer power in kW: watts / 1000 |
//! | 5    | Electricity cost: Step 3 × Step 4 × hours |
//! | 6    | Total cost: Step 2 + Step 5 |
//!
//! All steps run at full decimal precision. Rounding to cents happens only
//! when a result is displayed or exported.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use plastic_core::calculations::compute_cost;
//! use plastic_core::models::RawPrintJob;
//!
//! let raw = RawPrintJob {
//!     filament_cost_per_kg: "25.00".to_string(),
//!     print_weight_grams: "100".to_string(),
//!     estimated_print_time_hours: "2".to_string(),
//!     electricity_cost_per_kwh_cents: "12".to_string(),
//!     printer_power_rating_watts: "300".to_string(),
//! };
//!
//! let breakdown = compute_cost(&raw).unwrap();
//!
//! assert_eq!(breakdown.result.filament_cost, dec!(2.50));
//! assert_eq!(breakdown.result.electricity_cost, dec!(0.072));
//! assert_eq!(breakdown.result.total_cost, dec!(2.572));
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::debug;

use crate::models::{CostBreakdown, CostResult, PrintJobInput, RawPrintJob};

pub const GRAMS_PER_KILOGRAM: Decimal = Decimal::ONE_THOUSAND;
pub const WATTS_PER_KILOWATT: Decimal = Decimal::ONE_THOUSAND;
pub const CENTS_PER_DOLLAR: Decimal = Decimal::ONE_HUNDRED;

/// Errors that can occur during a cost calculation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CostError {
    /// An input could not be parsed as a finite number.
    #[error("non-numeric input for {field}: '{value}'")]
    NonNumeric { field: &'static str, value: String },

    /// An input is a finite number too large (or too precise) to represent.
    #[error("input for {field} is outside the supported range: '{value}'")]
    InputOutOfRange { field: &'static str, value: String },

    /// An intermediate value does not fit in a decimal.
    #[error("input out of range while computing {0}")]
    OutOfRange(&'static str),
}

/// Stateless calculator for print costs.
#[derive(Debug, Clone, Copy, Default)]
pub struct CostCalculator;

impl CostCalculator {
    pub fn new() -> Self {
        Self
    }

    /// Calculates the filament, electricity and total cost of a print job.
    ///
    /// # Errors
    ///
    /// Returns [`CostError::OutOfRange`] if an intermediate value overflows.
    pub fn calculate(
        &self,
        input: &PrintJobInput,
    ) -> Result<CostResult, CostError> {
        let weight_kg = self.weight_kg(input.print_weight_grams);
        let filament_cost = self.filament_cost(input.filament_cost_per_kg, weight_kg)?;

        let price_dollars = self.price_dollars(input.electricity_cost_per_kwh_cents);
        let power_kw = self.power_kw(input.printer_power_rating_watts);
        let electricity_cost =
            self.electricity_cost(price_dollars, power_kw, input.estimated_print_time_hours)?;

        let total_cost = self.total_cost(filament_cost, electricity_cost)?;

        debug!(%filament_cost, %electricity_cost, %total_cost, "calculated print cost");

        Ok(CostResult {
            filament_cost,
            electricity_cost,
            total_cost,
        })
    }

    /// Converts grams to kilograms.
    fn weight_kg(
        &self,
        grams: Decimal,
    ) -> Decimal {
        grams / GRAMS_PER_KILOGRAM
    }

    /// Converts cents to dollars.
    fn price_dollars(
        &self,
        cents: Decimal,
    ) -> Decimal {
        cents / CENTS_PER_DOLLAR
    }

    /// Converts watts to kilowatts.
    fn power_kw(
        &self,
        watts: Decimal,
    ) -> Decimal {
        watts / WATTS_PER_KILOWATT
    }

    fn filament_cost(
        &self,
        cost_per_kg: Decimal,
        weight_kg: Decimal,
    ) -> Result<Decimal, CostError> {
        cost_per_kg
            .checked_mul(weight_kg)
            .ok_or(CostError::OutOfRange("filament cost"))
    }

    fn electricity_cost(
        &self,
        price_dollars: Decimal,
        power_kw: Decimal,
        hours: Decimal,
    ) -> Result<Decimal, CostError> {
        price_dollars
            .checked_mul(power_kw)
            .and_then(|kw_cost| kw_cost.checked_mul(hours))
            .ok_or(CostError::OutOfRange("electricity cost"))
    }

    fn total_cost(
        &self,
        filament_cost: Decimal,
        electricity_cost: Decimal,
    ) -> Result<Decimal, CostError> {
        filament_cost
            .checked_add(electricity_cost)
            .ok_or(CostError::OutOfRange("total cost"))
    }
}

/// Parses raw user input and calculates its cost.
///
/// Nothing is computed unless all five inputs parse.
///
/// # Errors
///
/// * [`CostError::NonNumeric`] for the first input that is not a finite number.
/// * [`CostError::OutOfRange`] if the arithmetic overflows.
pub fn compute_cost(raw: &RawPrintJob) -> Result<CostBreakdown, CostError> {
    let input = PrintJobInput::parse(raw)?;
    let result = CostCalculator::new().calculate(&input)?;
    Ok(CostBreakdown { input, result })
}
