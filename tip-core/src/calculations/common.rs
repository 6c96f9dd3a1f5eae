//! Common decimal helpers for tip calculations.
//!
//! Input text arrives straight from the screen's text fields, so parsing here
//! is lenient about whitespace and thousands separators but strict about
//! everything else.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;
use thiserror::Error;

/// Text shown for the tip before both inputs are entered.
pub const ZERO_TIP: &str = "0.00";

/// Optional sign, integer part either plain or grouped in threes with commas,
/// then an optional fraction. A bare trailing point is allowed so partially
/// typed input like `42.` still reads as `42`.
static PLAIN_DECIMAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d*)?$")
        .expect("decimal pattern is valid")
});

/// Error returned when a string cannot be parsed as a [`Decimal`].
#[derive(Debug, Error)]
pub enum ParseDecimalError {
    /// The text is not a plain decimal number.
    #[error("'{input}' is not a plain decimal number")]
    Malformed { input: String },

    /// The text has the right shape but does not fit in a [`Decimal`].
    #[error("invalid decimal '{input}': {source}")]
    OutOfRange {
        input: String,
        #[source]
        source: rust_decimal::Error,
    },
}

impl ParseDecimalError {
    /// The text that failed to parse.
    pub fn input(&self) -> &str {
        match self {
            Self::Malformed { input } | Self::OutOfRange { input, .. } => input,
        }
    }
}

/// Normalizes input for decimal parsing.
///
/// Trims whitespace, then checks the shape against [`PLAIN_DECIMAL`] so only
/// real thousands separators are removed. Returns `None` for malformed text.
fn normalize_decimal_input(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if !PLAIN_DECIMAL.is_match(trimmed) {
        return None;
    }
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    Some(unsigned.trim_end_matches('.').replace(',', ""))
}

/// Returns `true` when the field holds no value once whitespace is trimmed.
pub fn is_unset(s: &str) -> bool {
    s.trim().is_empty()
}

/// Parses a text field into an optional [`Decimal`].
///
/// Returns `Ok(None)` for empty or whitespace-only input and an error for
/// anything non-empty that is not a plain decimal number.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tip_core::calculations::common::parse_amount;
///
/// assert_eq!(parse_amount("1,250.50").unwrap(), Some(dec!(1250.50)));
/// assert_eq!(parse_amount("  ").unwrap(), None);
/// assert!(parse_amount("twelve").is_err());
/// ```
pub fn parse_amount(s: &str) -> Result<Option<Decimal>, ParseDecimalError> {
    if is_unset(s) {
        return Ok(None);
    }
    let normalized = normalize_decimal_input(s).ok_or_else(|| ParseDecimalError::Malformed {
        input: s.to_string(),
    })?;
    normalized
        .parse()
        .map(Some)
        .map_err(|source| ParseDecimalError::OutOfRange {
            input: s.to_string(),
            source,
        })
}

/// Rounds a value up to the next whole number.
///
/// Values that are already whole are returned unchanged.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tip_core::calculations::common::round_up_whole;
///
/// assert_eq!(round_up_whole(dec!(3.333)), dec!(4));
/// assert_eq!(round_up_whole(dec!(9.0)), dec!(9));
/// ```
pub fn round_up_whole(value: Decimal) -> Decimal {
    value.ceil().normalize()
}

/// Formats a value in its default decimal form.
///
/// Trailing zeros are dropped but at least one fractional digit is always
/// kept, so whole values read as `9.0` rather than `9`.
pub fn display_decimal(value: Decimal) -> String {
    let normalized = value.normalize();
    if normalized.scale() == 0 {
        format!("{normalized}.0")
    } else {
        normalized.to_string()
    }
}

/// Formats a whole value without a fractional part.
pub fn display_whole(value: Decimal) -> String {
    value.trunc().normalize().to_string()
}
