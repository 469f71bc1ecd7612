//! Interest accrual over a period, under either rate regime.
//!
//! Prefixed operations compound in closed form on the 30/360 day count.
//! CDI operations compose daily factors pulled from the index backend
//! over the business days of the interval; non-business days contribute
//! no accrual. Both generators share this logic, which keeps their
//! cumulative interest identical by construction.

use rust_decimal::Decimal;

use fincore_core::calendars::Calendar;
use fincore_core::daycounts::{DayCount, Thirty360};
use fincore_core::rates;
use fincore_core::Date;

use crate::error::{EngineError, EngineResult};
use crate::indices::IndexBackend;
use crate::loan::RateMode;

/// Per-invocation accrual context: rate, regime, calendar and backend.
pub(crate) struct Accrual<'a> {
    pub annual_rate: Decimal,
    pub mode: RateMode,
    pub calendar: &'a dyn Calendar,
    pub backend: Option<&'a dyn IndexBackend>,
}

impl Accrual<'_> {
    /// Compounding factor over the interval `(from, to]`.
    pub fn period_factor(&self, from: Date, to: Date) -> EngineResult<Decimal> {
        match self.mode {
            RateMode::Prefixed => {
                let days = Thirty360.day_count(from, to);
                Ok(rates::compound_factor(self.annual_rate, days)?)
            }
            RateMode::Cdi { percent_of_cdi } => {
                let mut factor = Decimal::ONE;
                let mut day = from.add_days(1);
                while day <= to {
                    factor *= self.cdi_factor_on(day, percent_of_cdi)?;
                    day = day.add_days(1);
                }
                Ok(factor)
            }
        }
    }

    /// Compounding factor contributed by a single day.
    ///
    /// `prev` is the previously emitted day; under 30/360 the day-count
    /// delta between consecutive calendar days can be 0 or more than 1
    /// around month ends.
    pub fn day_factor(&self, prev: Date, day: Date) -> EngineResult<Decimal> {
        match self.mode {
            RateMode::Prefixed => {
                let days = Thirty360.day_count(prev, day);
                Ok(rates::compound_factor(self.annual_rate, days)?)
            }
            RateMode::Cdi { percent_of_cdi } => self.cdi_factor_on(day, percent_of_cdi),
        }
    }

    fn cdi_factor_on(&self, day: Date, percent_of_cdi: Decimal) -> EngineResult<Decimal> {
        if !self.calendar.is_business_day(day) {
            return Ok(Decimal::ONE);
        }
        let backend = self
            .backend
            .ok_or_else(|| EngineError::config("index backend required for CDI accrual"))?;
        let quote = backend.rate_on(day)?;
        if !quote.business_day {
            return Ok(Decimal::ONE);
        }
        Ok(rates::cdi_daily_factor(quote.rate, percent_of_cdi)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indices::ConstantBackend;
    use fincore_core::calendars::WeekendCalendar;
    use rust_decimal::MathematicalOps;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_prefixed_two_months() {
        let accrual = Accrual {
            annual_rate: dec!(5),
            mode: RateMode::Prefixed,
            calendar: &WeekendCalendar,
            backend: None,
        };
        let factor = accrual
            .period_factor(date(2022, 3, 9), date(2022, 5, 9))
            .unwrap();
        let expected = rates::compound_factor(dec!(5), 60).unwrap();
        assert_eq!(factor, expected);
    }

    #[test]
    fn test_cdi_week_composes_five_factors() {
        let backend = ConstantBackend::new(dec!(13.65));
        let accrual = Accrual {
            annual_rate: Decimal::ZERO,
            mode: RateMode::Cdi {
                percent_of_cdi: Decimal::ONE,
            },
            calendar: &WeekendCalendar,
            backend: Some(&backend),
        };

        // Mon 2022-08-15 .. Mon 2022-08-22: five business days accrue
        let factor = accrual
            .period_factor(date(2022, 8, 15), date(2022, 8, 22))
            .unwrap();
        let daily = rates::cdi_daily_factor(dec!(13.65), Decimal::ONE).unwrap();
        assert!((factor - daily.powi(5)).abs() < dec!(0.000000000000000001));
    }

    #[test]
    fn test_cdi_weekend_day_contributes_nothing() {
        let backend = ConstantBackend::new(dec!(13.65));
        let accrual = Accrual {
            annual_rate: Decimal::ZERO,
            mode: RateMode::Cdi {
                percent_of_cdi: Decimal::ONE,
            },
            calendar: &WeekendCalendar,
            backend: Some(&backend),
        };

        // Saturday
        let factor = accrual
            .day_factor(date(2022, 8, 12), date(2022, 8, 13))
            .unwrap();
        assert_eq!(factor, Decimal::ONE);
    }
}
