//! Late-payment adjustments for a missed installment.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use fincore_core::Date;

use crate::error::{EngineError, EngineResult};
use crate::payments::Payment;
use crate::rounding::to_cents;

const HUNDRED: Decimal = dec!(100);
const DAYS_PER_MONTH: Decimal = dec!(30);

/// Late-payment adjustments computed against a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArrearsResult {
    /// Calendar days between the due date and the reference date.
    pub days_late: i64,
    /// One-shot fee on the missed amount.
    pub late_fee: Decimal,
    /// Interest accrued on the missed amount, pro-rata over 30-day
    /// months.
    pub late_interest: Decimal,
    /// Missed amount plus fee plus late interest.
    pub total_due: Decimal,
}

/// Computes the adjustments owed on a missed payment.
///
/// The missed amount is what the servicer should have collected from
/// the borrower: amortization plus paid interest (tax is withheld from
/// the investor, not added to the debt). The fee applies once; late
/// interest is simple, pro-rata on `days / 30` months.
///
/// # Errors
///
/// Returns `EngineError::InvalidAmount` when the reference date precedes
/// the due date or a rate is negative.
///
/// # Example
///
/// ```rust
/// use fincore_engine::arrears::compute_arrears;
/// use fincore_engine::payments::Payment;
/// use fincore_core::Date;
/// use rust_decimal_macros::dec;
///
/// let missed = Payment {
///     date: Date::from_ymd(2022, 5, 9).unwrap(),
///     raw_interest: dec!(409.07),
///     paid_interest: dec!(816.48),
///     amortization: dec!(100000.00),
///     tax: dec!(0.00),
///     net: dec!(100816.48),
///     balance_after: dec!(0.00),
/// };
/// let reference = Date::from_ymd(2022, 6, 8).unwrap();
/// let arrears = compute_arrears(&missed, reference, dec!(2), dec!(1)).unwrap();
/// assert_eq!(arrears.days_late, 30);
/// assert_eq!(arrears.late_fee, dec!(2016.33));
/// assert_eq!(arrears.late_interest, dec!(1008.16));
/// ```
pub fn compute_arrears(
    missed: &Payment,
    reference_date: Date,
    late_fee_pct: Decimal,
    monthly_late_interest_pct: Decimal,
) -> EngineResult<ArrearsResult> {
    let days_late = missed.date.days_between(&reference_date);
    if days_late < 0 {
        return Err(EngineError::invalid_amount(
            Decimal::from(days_late),
            "reference date precedes the due date",
        ));
    }
    if late_fee_pct < Decimal::ZERO {
        return Err(EngineError::invalid_amount(
            late_fee_pct,
            "late fee must not be negative",
        ));
    }
    if monthly_late_interest_pct < Decimal::ZERO {
        return Err(EngineError::invalid_amount(
            monthly_late_interest_pct,
            "late interest must not be negative",
        ));
    }

    let amount = missed.amortization + missed.paid_interest;
    let late_fee = to_cents(amount * late_fee_pct / HUNDRED);
    let months_late = Decimal::from(days_late) / DAYS_PER_MONTH;
    let late_interest = to_cents(amount * monthly_late_interest_pct / HUNDRED * months_late);
    let total_due = amount + late_fee + late_interest;

    Ok(ArrearsResult {
        days_late,
        late_fee,
        late_interest,
        total_due,
    })
}
