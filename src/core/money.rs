//! Money helpers using `rust_decimal` for exact two-decimal arithmetic.
//!
//! Prices come in from configuration as `f64` and are converted once; all sums,
//! rounding and comparisons happen on `Decimal`.

use crate::errors::{Error, Result};
use rust_decimal::prelude::*;

/// Monetary values are rounded to cents.
pub const DECIMAL_PLACES: u32 = 2;

/// Largest unit price accepted from configuration.
const MAX_PRICE: f64 = 1_000_000.0;

/// Rounds to cents, half away from zero.
#[must_use]
pub fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
}

/// Converts a configured price into a `Decimal`, rejecting NaN, infinities,
/// negative and absurdly large values.
pub fn price_from_f64(value: f64, field_name: &str) -> Result<Decimal> {
    if !value.is_finite() {
        return Err(Error::Config {
            message: format!("{field_name} must be a finite number, got {value}"),
        });
    }
    if value < 0.0 {
        return Err(Error::Config {
            message: format!("{field_name} must be non-negative, got {value}"),
        });
    }
    if value > MAX_PRICE {
        return Err(Error::Config {
            message: format!("{field_name} exceeds maximum allowed ({MAX_PRICE}), got {value}"),
        });
    }

    Decimal::from_f64(value)
        .map(round_money)
        .ok_or_else(|| Error::Config {
            message: format!("{field_name} cannot be represented as a decimal: {value}"),
        })
}

/// Formats an amount as Brazilian reais with two decimals, e.g. `R$ 7.00`.
#[must_use]
pub fn format_brl(amount: Decimal) -> String {
    format!("R$ {:.2}", round_money(amount))
}

/// Formats an amount with exactly two decimals and no currency marker,
/// the way the `Total (R$)` column stores it.
#[must_use]
pub fn format_plain(amount: Decimal) -> String {
    format!("{:.2}", round_money(amount))
}
