//! Currency-string handling.
//!
//! The backend formats every amount as a string with a leading peso glyph and
//! thousands separators (`"₱1,234.56"`). Arithmetic happens on `f64` after
//! stripping everything that is not part of the number; amounts going back to the
//! backend are re-rendered with the glyph and two decimals, no separators.

use crate::errors::{Error, Result};

/// Currency glyph applied to outgoing amounts.
pub const CURRENCY_SYMBOL: char = '₱';

/// Parses a currency-formatted string into a numeric amount.
///
/// Strips the currency glyph, thousands separators, and any other non-numeric
/// characters before parsing, so `"₱1,234.56"`, `"1234.56"`, and `"PHP 1,234.56"`
/// all yield `1234.56`.
///
/// # Errors
/// Returns [`Error::PriceParse`] when nothing numeric remains or the residue is
/// not a valid number.
pub fn parse_amount(raw: &str) -> Result<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    if cleaned.is_empty() {
        return Err(Error::PriceParse {
            raw: raw.to_string(),
        });
    }

    cleaned.parse::<f64>().map_err(|_| Error::PriceParse {
        raw: raw.to_string(),
    })
}

/// Formats an amount the way the backend expects it back: glyph, two decimals,
/// no thousands separators (`3000.0` becomes `"₱3000.00"`).
pub fn format_amount(amount: f64) -> String {
    format!("{CURRENCY_SYMBOL}{amount:.2}")
}
