//! Money formatting

use rusty_money::{Findable, Money, iso::Currency};
use thiserror::Error;

/// Errors raised when formatting amounts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MoneyFormatError {
    /// The currency code is not a known ISO 4217 currency.
    #[error("unknown currency \"{0}\"")]
    UnknownCurrency(String),
}

/// Look up an ISO 4217 currency by its alphabetic code.
///
/// # Errors
///
/// Returns [`MoneyFormatError::UnknownCurrency`] for unrecognised codes.
pub fn currency(code: &str) -> Result<&'static Currency, MoneyFormatError> {
    Currency::find(code).ok_or_else(|| MoneyFormatError::UnknownCurrency(code.to_string()))
}

/// Format a minor-unit amount in the given currency, e.g. `31500` USD as `$315.00`.
///
/// # Errors
///
/// Returns [`MoneyFormatError::UnknownCurrency`] for unrecognised codes.
pub fn format_minor(amount: i64, code: &str) -> Result<String, MoneyFormatError> {
    Ok(Money::from_minor(amount, currency(code)?).to_string())
}
