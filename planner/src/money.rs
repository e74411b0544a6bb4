//! Monetary amounts are exchanged as [`Decimal`] and stored as integer cents.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;

/// Converts an amount to cents, rounding to two decimal places (banker's rounding).
/// Returns `None` when the amount does not fit in an `i64`.
pub fn to_cents(amount: Decimal) -> Option<i64> {
    amount
        .round_dp(2)
        .checked_mul(Decimal::ONE_HUNDRED)?
        .to_i64()
}

pub fn from_cents(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}
