//! Common utility functions for cost calculations.
//!
//! This module provides the rounding and parsing helpers shared by the cost
//! calculator and the settings record formatting.

use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Error returned when a string cannot be turned into a [`Decimal`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseDecimalError {
    #[error("'{input}' is not a finite decimal number")]
    Invalid { input: String },

    /// A finite number that a 96-bit decimal cannot hold, e.g. `1e30`.
    #[error("'{input}' is outside the supported decimal range")]
    OutOfRange { input: String },
}

/// Rounds a decimal value to exactly two decimal places using half-up rounding.
///
/// Values at exactly 0.005 are rounded up to 0.01 (away from zero).
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use plastic_core::calculations::common::round_half_up;
///
/// assert_eq!(round_half_up(dec!(2.572)), dec!(2.57));
/// assert_eq!(round_half_up(dec!(0.125)), dec!(0.13));
/// assert_eq!(round_half_up(dec!(-0.125)), dec!(-0.13)); // Away from zero
/// ```
pub fn round_half_up(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Parses user-entered text into a finite [`Decimal`].
///
/// Surrounding whitespace is ignored. Both plain (`"12.5"`) and scientific
/// (`"1.25e1"`) notation are accepted. Empty input, `nan`, `inf` and anything
/// else that is not a number is rejected. Thousands separators are not
/// stripped, so `"1,000"` is an error rather than a guess.
///
/// A finite number beyond what [`Decimal`] can represent is reported as
/// [`ParseDecimalError::OutOfRange`], not as invalid text.
pub fn parse_finite_decimal(s: &str) -> Result<Decimal, ParseDecimalError> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(ParseDecimalError::Invalid {
            input: s.to_string(),
        });
    }

    trimmed
        .parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(trimmed))
        .map_err(|e| {
            tracing::debug!(input = %s, "invalid decimal: {}", e);
            let input = s.to_string();
            if trimmed.parse::<f64>().is_ok_and(f64::is_finite) {
                ParseDecimalError::OutOfRange { input }
            } else {
                ParseDecimalError::Invalid { input }
            }
        })
}

/// Formats a value as a dollar amount rounded to cents, e.g. `$2.57`.
pub fn format_dollars(value: Decimal) -> String {
    format!("${:.2}", round_half_up(value))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    // =========================================================================
    // round_half_up tests
    // =========================================================================

    #[test]
    fn round_half_up_rounds_down_below_midpoint() {
        assert_eq!(round_half_up(dec!(2.572)), dec!(2.57));
    }

    #[test]
    fn round_half_up_rounds_up_at_midpoint() {
        assert_eq!(round_half_up(dec!(0.125)), dec!(0.13));
    }

    #[test]
    fn round_half_up_handles_negative_values() {
        assert_eq!(round_half_up(dec!(-0.125)), dec!(-0.13));
    }

    #[test]
    fn round_half_up_keeps_shorter_scale() {
        // round_dp never pads, "12.0" stays "12.0"
        assert_eq!(round_half_up(dec!(12.0)).to_string(), "12.0");
    }

    #[test]
    fn round_half_up_handles_small_values() {
        assert_eq!(round_half_up(dec!(0.004)), dec!(0.00));
    }

    // =========================================================================
    // parse_finite_decimal tests
    // =========================================================================

    #[test]
    fn parse_accepts_plain_decimal() {
        assert_eq!(parse_finite_decimal("25.00").unwrap(), dec!(25.00));
    }

    #[test]
    fn parse_trims_whitespace() {
        assert_eq!(parse_finite_decimal("  300 ").unwrap(), dec!(300));
    }

    #[test]
    fn parse_accepts_negative_values() {
        assert_eq!(parse_finite_decimal("-4.5").unwrap(), dec!(-4.5));
    }

    #[test]
    fn parse_accepts_scientific_notation() {
        assert_eq!(parse_finite_decimal("1e3").unwrap(), dec!(1000));
    }

    #[test]
    fn parse_rejects_empty_input() {
        assert!(parse_finite_decimal("").is_err());
        assert!(parse_finite_decimal("   ").is_err());
    }

    #[test]
    fn parse_rejects_non_numeric_input() {
        let err = parse_finite_decimal("abc").unwrap_err();

        assert_eq!(
            err,
            ParseDecimalError::Invalid {
                input: "abc".to_string()
            }
        );
    }

    #[test]
    fn parse_reports_unrepresentable_numbers_as_out_of_range() {
        assert_eq!(
            parse_finite_decimal("1e30").unwrap_err(),
            ParseDecimalError::OutOfRange {
                input: "1e30".to_string()
            }
        );
        assert!(matches!(
            parse_finite_decimal("123456789012345678901234567890123").unwrap_err(),
            ParseDecimalError::OutOfRange { .. }
        ));
    }

    #[test]
    fn parse_rejects_non_finite_values() {
        for input in ["nan", "inf", "-infinity"] {
            assert!(
                matches!(
                    parse_finite_decimal(input),
                    Err(ParseDecimalError::Invalid { .. })
                ),
                "{input}"
            );
        }
    }

    #[test]
    fn parse_rejects_thousands_separator() {
        assert!(parse_finite_decimal("1,000").is_err());
    }

    // =========================================================================
    // format_dollars tests
    // =========================================================================

    #[test]
    fn format_dollars_pads_to_cents() {
        assert_eq!(format_dollars(dec!(2.5)), "$2.50");
        assert_eq!(format_dollars(dec!(0.072)), "$0.07");
        assert_eq!(format_dollars(dec!(2.572)), "$2.57");
    }
}
