//! Money
//!
//! Helpers for moving between minor units, whole major units and the text forms used in
//! configuration and reservation files (`"500 AOA"`, `"15%"`).

use decimal_percentage::Percentage;
use rust_decimal::{
    Decimal, RoundingStrategy,
    prelude::{FromPrimitive, ToPrimitive},
};
use rusty_money::{
    Money,
    iso::{self, Currency},
};
use thiserror::Error;

/// Errors raised while parsing monetary text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Price text was not in the `AMOUNT CURRENCY` form, or the amount was not a number.
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Currency code is not an ISO 4217 code.
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Percentage text could not be parsed.
    #[error("Invalid percentage format: {0}")]
    InvalidPercentage(String),
}

/// Number of minor units in one major unit of `currency` (100 for AOA).
pub fn minor_per_major(currency: &Currency) -> Decimal {
    (0..currency.exponent).fold(Decimal::ONE, |acc, _| acc * Decimal::TEN)
}

/// Express `money` in major units, e.g. `50000` minor AOA becomes `500`.
pub fn to_major(money: &Money<'_, Currency>) -> Decimal {
    Decimal::from(money.to_minor_units()) / minor_per_major(money.currency())
}

/// Round an amount held in minor units to the nearest whole major unit, returning minor units.
///
/// Midpoints round away from zero.
pub fn round_to_major_unit(minor: Decimal, currency: &Currency) -> Option<i64> {
    let factor = minor_per_major(currency);

    minor
        .checked_div(factor)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .checked_mul(factor)?
        .to_i64()
}

/// Express a percentage as a plain decimal fraction (`15%` is `0.15`).
pub fn percent_to_decimal(percent: Percentage) -> Decimal {
    // decimal_percentage doesn't expose the wrapped value directly
    percent * Decimal::ONE
}

/// Calculate `percent` of an amount in minor units, rounded to the nearest minor unit.
///
/// Returns `None` if the result does not fit in an `i64`.
pub fn percent_of_minor(percent: Percentage, minor: i64) -> Option<i64> {
    let minor = Decimal::from_i64(minor)?;

    percent_to_decimal(percent)
        .checked_mul(minor)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// Parse price text such as `"500 AOA"` or `"12.50 USD"`.
///
/// # Errors
///
/// - [`ParseError::InvalidPrice`]: the text is not `AMOUNT CURRENCY` or the amount is not a
///   decimal number representable in minor units.
/// - [`ParseError::UnknownCurrency`]: the currency code is not recognised.
pub fn parse_price(s: &str) -> Result<Money<'static, Currency>, ParseError> {
    let mut parts = s.split_whitespace();

    let (Some(amount), Some(code), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(ParseError::InvalidPrice(format!(
            "Expected format 'AMOUNT CURRENCY', got: {s}"
        )));
    };

    let currency = iso::find(code).ok_or_else(|| ParseError::UnknownCurrency(code.to_string()))?;

    let minor_units = amount
        .parse::<Decimal>()
        .map_err(|_err| ParseError::InvalidPrice(s.to_string()))?
        .checked_mul(minor_per_major(currency))
        .and_then(|value| value.round_dp(0).to_i64())
        .ok_or_else(|| ParseError::InvalidPrice(s.to_string()))?;

    Ok(Money::from_minor(minor_units, currency))
}

/// Parse percentage text, either `"15%"` or the fraction `"0.15"`.
///
/// # Errors
///
/// Returns [`ParseError::InvalidPercentage`] if the text is not a decimal number.
pub fn parse_percentage(s: &str) -> Result<Percentage, ParseError> {
    let trimmed = s.trim();
    let invalid = || ParseError::InvalidPercentage(s.to_string());

    let fraction = if let Some(percent_str) = trimmed.strip_suffix('%') {
        percent_str
            .trim()
            .parse::<Decimal>()
            .map_err(|_err| invalid())?
            .checked_div(Decimal::ONE_HUNDRED)
            .ok_or_else(invalid)?
    } else {
        trimmed.parse::<Decimal>().map_err(|_err| invalid())?
    };

    Percentage::try_from(fraction.normalize().to_string().as_str()).map_err(|_err| invalid())
}
