//! Tip amount calculation.
//!
//! The tip is `bill * percent / 100`, optionally rounded up to the next whole
//! number. Both inputs arrive as free text from the screen; an empty input
//! means "not entered yet" and short-circuits to a zero tip.
//!
//! # Example
//!
//! ```
//! use tip_core::compute;
//!
//! let outcome = compute("50", "18", false).unwrap();
//! assert_eq!(outcome.tip_amount, "9.0");
//!
//! let outcome = compute("33.33", "10", true).unwrap();
//! assert_eq!(outcome.tip_amount, "4");
//! assert!(outcome.round_up);
//! ```

use std::fmt;

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::common::{
    ZERO_TIP, display_decimal, display_whole, is_unset, parse_amount, round_up_whole,
};

/// The input a calculation error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipField {
    Bill,
    Percentage,
}

impl TipField {
    /// Label used in validation messages.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Bill => "Bill amount",
            Self::Percentage => "Tip percentage",
        }
    }
}

impl fmt::Display for TipField {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Errors that can occur while calculating a tip.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TipError {
    /// The text is not a decimal number.
    #[error("{field} must be a number, got '{input}'")]
    InvalidInput { field: TipField, input: String },

    /// The value parsed but is below zero.
    #[error("{field} cannot be negative, got {value}")]
    NegativeAmount { field: TipField, value: Decimal },

    /// The product of bill and percentage does not fit in a decimal.
    #[error("tip amount is too large to calculate")]
    Overflow,
}

/// The result of a tip calculation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TipOutcome {
    /// Tip amount as shown on screen.
    pub tip_amount: String,

    /// The round-up flag after the calculation.
    ///
    /// Forced to `false` whenever either input is empty; callers holding the
    /// switch state must write this back.
    pub round_up: bool,
}

impl TipOutcome {
    fn unset() -> Self {
        Self {
            tip_amount: ZERO_TIP.to_string(),
            round_up: false,
        }
    }
}

/// Calculates the tip for a bill and percentage entered as text.
///
/// # Errors
///
/// Returns [`TipError::InvalidInput`] if either non-empty input is not a
/// number, [`TipError::NegativeAmount`] if either is below zero, and
/// [`TipError::Overflow`] if the result does not fit in a [`Decimal`].
pub fn compute(
    bill: &str,
    percent: &str,
    round_up: bool,
) -> Result<TipOutcome, TipError> {
    if is_unset(bill) || is_unset(percent) {
        return Ok(TipOutcome::unset());
    }

    let bill_value = parse_field(TipField::Bill, bill)?;
    let percent_value = parse_field(TipField::Percentage, percent)?;

    let raw = tip_for(bill_value, percent_value)?;

    let tip_amount = if round_up {
        display_whole(round_up_whole(raw))
    } else {
        display_decimal(raw)
    };

    debug!(%bill_value, %percent_value, round_up, %tip_amount, "tip recomputed");

    Ok(TipOutcome {
        tip_amount,
        round_up,
    })
}

/// Applies `bill * percent / 100` with overflow checks.
pub fn tip_for(
    bill: Decimal,
    percent: Decimal,
) -> Result<Decimal, TipError> {
    bill.checked_mul(percent)
        .and_then(|product| product.checked_div(Decimal::ONE_HUNDRED))
        .ok_or(TipError::Overflow)
}

fn parse_field(
    field: TipField,
    text: &str,
) -> Result<Decimal, TipError> {
    let value = match parse_amount(text) {
        Ok(value) => value.unwrap_or(Decimal::ZERO),
        Err(e) => {
            warn!(%field, error = %e, "rejected tip input");
            return Err(TipError::InvalidInput {
                field,
                input: text.to_string(),
            });
        }
    };

    if value.is_sign_negative() && !value.is_zero() {
        return Err(TipError::NegativeAmount { field, value });
    }

    Ok(value)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn amount(bill: &str, percent: &str, round_up: bool) -> String {
        compute(bill, percent, round_up).unwrap().tip_amount
    }

    // =========================================================================
    // Unset inputs
    // =========================================================================

    #[test]
    fn empty_bill_yields_zero_tip() {
        assert_eq!(amount("", "15", false), "0.00");
    }

    #[test]
    fn empty_percentage_yields_zero_tip() {
        assert_eq!(amount("10", "", false), "0.00");
    }

    #[test]
    fn empty_input_resets_round_up() {
        let outcome = compute("", "15", true).unwrap();

        assert_eq!(
            outcome,
            TipOutcome {
                tip_amount: "0.00".to_string(),
                round_up: false,
            }
        );
    }

    #[test]
    fn whitespace_only_input_counts_as_empty() {
        assert_eq!(amount("  ", "15", false), "0.00");
    }

    #[test]
    fn empty_input_short_circuits_before_parsing_the_other() {
        assert_eq!(amount("abc", "", false), "0.00");
    }

    // =========================================================================
    // Arithmetic
    // =========================================================================

    #[test]
    fn whole_tip_keeps_one_fractional_digit() {
        assert_eq!(amount("50", "18", false), "9.0");
    }

    #[test]
    fn fractional_tip_is_exact() {
        assert_eq!(amount("33.33", "10", false), "3.333");
    }

    #[test]
    fn round_up_takes_ceiling() {
        assert_eq!(amount("50", "18", true), "9");
        assert_eq!(amount("33.33", "10", true), "4");
    }

    #[test]
    fn round_up_keeps_flag() {
        assert!(compute("50", "18", true).unwrap().round_up);
    }

    #[test]
    fn zero_bill_yields_zero_tip() {
        assert_eq!(amount("0", "20", false), "0.0");
        assert_eq!(amount("0", "20", true), "0");
    }

    #[test]
    fn comma_separated_bill_is_accepted() {
        assert_eq!(amount("1,250", "20", false), "250.0");
    }

    #[test]
    fn negative_zero_counts_as_zero() {
        assert_eq!(amount("-0", "20", false), "0.0");
        assert_eq!(amount("50", "-0", true), "0");
    }

    #[test]
    fn oversized_bill_reports_overflow() {
        let err = compute("79228162514264337593543950335", "2", false).unwrap_err();

        assert_eq!(err, TipError::Overflow);
    }

    #[test]
    fn tip_for_applies_percentage() {
        assert_eq!(tip_for(dec!(80.00), dec!(15)).unwrap(), dec!(12));
    }

    #[test]
    fn tip_for_reports_overflow() {
        assert_eq!(tip_for(Decimal::MAX, dec!(200)), Err(TipError::Overflow));
    }

    // =========================================================================
    // Invalid inputs
    // =========================================================================

    #[test]
    fn non_numeric_bill_is_invalid_input() {
        let err = compute("ten", "15", false).unwrap_err();

        assert_eq!(
            err,
            TipError::InvalidInput {
                field: TipField::Bill,
                input: "ten".to_string(),
            }
        );
    }

    #[test]
    fn non_numeric_percentage_is_invalid_input() {
        let err = compute("10", "15%", false).unwrap_err();

        assert_eq!(
            err,
            TipError::InvalidInput {
                field: TipField::Percentage,
                input: "15%".to_string(),
            }
        );
    }

    #[test]
    fn negative_bill_is_rejected() {
        let err = compute("-10", "15", false).unwrap_err();

        assert_eq!(
            err,
            TipError::NegativeAmount {
                field: TipField::Bill,
                value: dec!(-10),
            }
        );
    }

    #[test]
    fn negative_percentage_is_rejected() {
        let err = compute("10", "-15", false).unwrap_err();

        assert_eq!(
            err,
            TipError::NegativeAmount {
                field: TipField::Percentage,
                value: dec!(-15),
            }
        );
    }

    #[test]
    fn malformed_numbers_are_invalid_input() {
        for bill in ["1,2,3", "1_000", "1e3"] {
            let err = compute(bill, "10", false).unwrap_err();

            assert_eq!(
                err,
                TipError::InvalidInput {
                    field: TipField::Bill,
                    input: bill.to_string(),
                },
                "bill {bill:?} should be rejected"
            );
        }
    }

    #[test]
    fn grouped_thousands_are_accepted() {
        assert_eq!(amount("1,000,000", "10", false), "100000.0");
    }

    #[test]
    fn invalid_input_message_names_field() {
        let err = compute("10", "x", false).unwrap_err();

        assert_eq!(err.to_string(), "Tip percentage must be a number, got 'x'");
    }
}
