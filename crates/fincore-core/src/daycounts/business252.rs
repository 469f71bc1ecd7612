//! Business-days/252 day count convention.

use rust_decimal::Decimal;

use super::DayCount;
use crate::calendars::Calendar;
use crate::types::Date;

/// ACT/252 business-days day count convention.
///
/// Counts business days of the wrapped calendar in the half-open interval
/// `[start, end)` and divides by 252, the conventional number of Brazilian
/// business days in a year.
#[derive(Debug, Clone, Copy, Default)]
pub struct Business252<C: Calendar> {
    calendar: C,
}

impl<C: Calendar> Business252<C> {
    /// Creates the convention over the given calendar.
    #[must_use]
    pub fn new(calendar: C) -> Self {
        Self { calendar }
    }

    /// Returns the wrapped calendar.
    #[must_use]
    pub fn calendar(&self) -> &C {
        &self.calendar
    }
}

impl<C: Calendar> DayCount for Business252<C> {
    fn name(&self) -> &'static str {
        "BUS/252"
    }

    fn year_fraction(&self, start: Date, end: Date) -> Decimal {
        let days = self.day_count(start, end);
        Decimal::from(days) / Decimal::from(252)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        i64::from(self.calendar.business_days_between(start, end))
    }
}
