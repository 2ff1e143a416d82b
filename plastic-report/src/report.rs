//! Content of the exported cost report.
//!
//! The report walks through the calculation the same way a person would
//! check it by hand:
//!
//! | Section | Lines |
//! |---------|-------|
//! | Inputs | filament cost per kg; print weight and its kg conversion; printer power and its kW conversion; electricity price and its dollar conversion; print time |
//! | Filament | cost per kg × weight in kg |
//! | Electricity | dollars per kWh × kW × hours |
//! | Total | rounded filament cost + rounded electricity cost |

use chrono::{Local, NaiveDateTime};
use plastic_core::calculations::common::{format_dollars, round_half_up};
use plastic_core::calculations::cost::{CENTS_PER_DOLLAR, GRAMS_PER_KILOGRAM, WATTS_PER_KILOWATT};
use plastic_core::CostBreakdown;
use rust_decimal::Decimal;

pub const REPORT_TITLE: &str = "PlasticTax Cost Report";

/// One line of the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportLine {
    Title(String),
    Text(String),
    Blank,
    Separator,
}

impl ReportLine {
    fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Plain-text form, used for terminal output.
    pub fn as_plain_text(&self) -> String {
        match self {
            Self::Title(s) | Self::Text(s) => s.clone(),
            Self::Blank => String::new(),
            Self::Separator => "-".repeat(48),
        }
    }
}

/// A cost report ready to be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostReport {
    lines: Vec<ReportLine>,
}

impl CostReport {
    /// Builds the report for `breakdown`, stamped with the current local time.
    pub fn new(breakdown: &CostBreakdown) -> Self {
        Self::generated_at(breakdown, Local::now().naive_local())
    }

    pub fn generated_at(
        breakdown: &CostBreakdown,
        generated_at: NaiveDateTime,
    ) -> Self {
        let input = &breakdown.input;
        let rounded = breakdown.result.rounded();

        let weight_kg = input.print_weight_grams / GRAMS_PER_KILOGRAM;
        let power_kw = input.printer_power_rating_watts / WATTS_PER_KILOWATT;
        let price_dollars = input.electricity_cost_per_kwh_cents / CENTS_PER_DOLLAR;
        let cost_per_kg = format_dollars(input.filament_cost_per_kg);
        let hours = input.estimated_print_time_hours;

        let lines = vec![
            ReportLine::Title(REPORT_TITLE.to_string()),
            ReportLine::text(format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M"))),
            ReportLine::Blank,
            ReportLine::text(format!("Filament Cost per kg: {cost_per_kg}")),
            ReportLine::text(format!("Weight of Print: {} grams", input.print_weight_grams)),
            ReportLine::text(format!(
                "{} grams = {} kg",
                input.print_weight_grams,
                two_places(weight_kg)
            )),
            ReportLine::text(format!(
                "Printer Power Rating: {} watts",
                input.printer_power_rating_watts
            )),
            ReportLine::text(format!(
                "{} watts = {} kW",
                input.printer_power_rating_watts,
                two_places(power_kw)
            )),
            ReportLine::text(format!(
                "Electricity Cost per kWh: {} cents",
                input.electricity_cost_per_kwh_cents
            )),
            ReportLine::text(format!(
                "{} cents = {}",
                input.electricity_cost_per_kwh_cents,
                format_dollars(price_dollars)
            )),
            ReportLine::text(format!("Estimated Print Time: {hours} hours")),
            ReportLine::Blank,
            ReportLine::text(format!(
                "Filament Cost: {cost_per_kg} * {} kg = {}",
                two_places(weight_kg),
                format_dollars(rounded.filament_cost)
            )),
            ReportLine::text(format!(
                "Electricity Cost: {} * {} kW * {hours} hours = {}",
                format_dollars(price_dollars),
                two_places(power_kw),
                format_dollars(rounded.electricity_cost)
            )),
            ReportLine::Separator,
            ReportLine::text(format!(
                "Total Cost = {} + {} = {}",
                format_dollars(rounded.filament_cost),
                format_dollars(rounded.electricity_cost),
                format_dollars(rounded.total_cost)
            )),
        ];

        Self { lines }
    }

    pub fn lines(&self) -> &[ReportLine] {
        &self.lines
    }

    pub fn to_plain_text(&self) -> String {
        self.lines
            .iter()
            .map(ReportLine::as_plain_text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn two_places(value: Decimal) -> String {
    format!("{:.2}", round_half_up(value))
}
