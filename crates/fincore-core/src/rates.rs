//! Rate model: conversions between annual rates and period factors.
//!
//! All functions operate on annual percentage yields expressed as percents
//! (5.0 means 5% p.a.) and return multiplicative factors at full precision.
//! Rounding is the caller's concern; nothing is quantized here.
//!
//! Two regimes are covered:
//!
//! - **30/360**: the monthly factor is `(1 + apy/100)^(1/12)`; partial
//!   periods interpolate on the 30/360 day count with
//!   `(1 + apy/100)^(days/360)`.
//! - **BUS/252**: the daily factor for a CDI rate `r` on a business day is
//!   `(1 + (r/100) * p)^(1/252)` where `p` scales the percent-of-CDI loan
//!   parameter. Non-business days contribute no accrual.

use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use crate::error::{CoreError, CoreResult};

/// Conventional business days in a Brazilian year.
pub const BUSINESS_DAYS_PER_YEAR: Decimal = dec!(252);

/// Days per year under the 30/360 convention.
pub const DAYS_30_360_PER_YEAR: Decimal = dec!(360);

const HUNDRED: Decimal = dec!(100);
const MONTHS_PER_YEAR: Decimal = dec!(12);

/// Monthly compounding factor for an annual rate: `(1 + apy/100)^(1/12)`.
///
/// # Errors
///
/// Returns `CoreError::MathError` when `1 + apy/100` is not positive.
pub fn monthly_factor(annual_rate_pct: Decimal) -> CoreResult<Decimal> {
    pow_checked(Decimal::ONE + annual_rate_pct / HUNDRED, Decimal::ONE / MONTHS_PER_YEAR)
}

/// Compounding factor over a 30/360 day count: `(1 + apy/100)^(days/360)`.
///
/// Thirty days reproduce [`monthly_factor`]; zero days yield 1.
///
/// # Errors
///
/// Returns `CoreError::MathError` when `1 + apy/100` is not positive.
pub fn compound_factor(annual_rate_pct: Decimal, days_30_360: i64) -> CoreResult<Decimal> {
    if days_30_360 == 0 {
        return Ok(Decimal::ONE);
    }
    pow_checked(
        Decimal::ONE + annual_rate_pct / HUNDRED,
        Decimal::from(days_30_360) / DAYS_30_360_PER_YEAR,
    )
}

/// Daily factor for a CDI rate on a business day:
/// `(1 + (cdi/100) * percent_of_cdi)^(1/252)`.
///
/// `percent_of_cdi` is a decimal multiplier (1 means 100% of CDI).
///
/// # Errors
///
/// Returns `CoreError::MathError` when the scaled base is not positive.
pub fn cdi_daily_factor(cdi_rate_pct: Decimal, percent_of_cdi: Decimal) -> CoreResult<Decimal> {
    pow_checked(
        Decimal::ONE + (cdi_rate_pct / HUNDRED) * percent_of_cdi,
        Decimal::ONE / BUSINESS_DAYS_PER_YEAR,
    )
}

/// Annual rate (percent) implied by a monthly factor: `(f^12 - 1) * 100`.
#[must_use]
pub fn annual_rate_from_monthly_factor(factor: Decimal) -> Decimal {
    (factor.powi(12) - Decimal::ONE) * HUNDRED
}

/// Annual rate (percent) implied by a BUS/252 daily factor:
/// `(f^252 - 1) * 100`.
#[must_use]
pub fn annual_rate_from_daily_factor(factor: Decimal) -> Decimal {
    (factor.powi(252) - Decimal::ONE) * HUNDRED
}

/// Raises a positive base to a decimal exponent at full precision.
fn pow_checked(base: Decimal, exponent: Decimal) -> CoreResult<Decimal> {
    if base <= Decimal::ZERO {
        return Err(CoreError::math_error(format!(
            "compounding base must be positive, got {base}"
        )));
    }
    Ok(base.powd(exponent))
}
