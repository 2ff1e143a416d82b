use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calculations::common::{format_dollars, round_half_up};
use crate::models::PrintJobInput;

/// Output of one cost calculation, at full precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostResult {
    pub filament_cost: Decimal,
    pub electricity_cost: Decimal,
    /// Always `filament_cost + electricity_cost` of the unrounded values.
    pub total_cost: Decimal,
}

/// A [`CostResult`] with each value independently rounded to cents.
///
/// `total_cost` is rounded from the unrounded total, so it can differ by a
/// cent from `filament_cost + electricity_cost` here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundedCost {
    pub filament_cost: Decimal,
    pub electricity_cost: Decimal,
    pub total_cost: Decimal,
}

impl CostResult {
    pub fn rounded(&self) -> RoundedCost {
        RoundedCost {
            filament_cost: round_half_up(self.filament_cost),
            electricity_cost: round_half_up(self.electricity_cost),
            total_cost: round_half_up(self.total_cost),
        }
    }
}

impl fmt::Display for CostResult {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        writeln!(f, "Filament Cost: {}", format_dollars(self.filament_cost))?;
        writeln!(f, "Electricity Cost: {}", format_dollars(self.electricity_cost))?;
        write!(f, "Total Cost: {}", format_dollars(self.total_cost))
    }
}

/// An input together with the result computed from it.
///
/// This is what a session remembers as "the last calculation" and what a
/// report is generated from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostBreakdown {
    pub input: PrintJobInput,
    pub result: CostResult,
}
