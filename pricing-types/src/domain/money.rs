//! Exact decimal helpers for amounts and the fee markup.
//!
//! Amounts are `rust_decimal::Decimal` throughout so limit comparisons
//! at the boundary are never subject to binary floating point error.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Multiplier applied to an approved amount (a 0.1% markup).
pub const FEE_MULTIPLIER: Decimal = dec!(1.001);

/// Fractional digits carried by a request amount.
pub const AMOUNT_SCALE: u32 = 2;

/// Renders an amount with exactly two fractional digits.
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount)
}

/// Returns `amount * FEE_MULTIPLIER` without rounding.
///
/// Trailing zeros are dropped, but the result always keeps at least
/// `AMOUNT_SCALE` fractional digits.
pub fn apply_fee(amount: Decimal) -> Decimal {
    let mut price = (amount * FEE_MULTIPLIER).normalize();
    if price.scale() < AMOUNT_SCALE {
        price.rescale(AMOUNT_SCALE);
    }
    price
}

/// Number of significant fractional digits, ignoring trailing zeros.
pub fn significant_scale(amount: Decimal) -> u32 {
    amount.normalize().scale()
}
