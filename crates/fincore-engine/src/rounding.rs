//! Quantization policy for emitted monetary fields.
//!
//! All internal arithmetic runs at full `Decimal` precision. Rounding
//! happens only when a monetary field is emitted to the caller: two
//! decimal places, banker's rounding. The payment generator concentrates
//! the accumulated rounding residual into the terminal amortization so
//! emitted amortizations always sum to the principal exactly.

use rust_decimal::{Decimal, RoundingStrategy};

/// Quantizes a monetary amount to cents, half-even.
#[must_use]
pub fn to_cents(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointNearestEven)
}
