//! Business day calendars.
//!
//! This module provides:
//! - The [`Calendar`] trait: business-day tests, rolling and counting
//! - [`WeekendCalendar`]: weekends only, no holidays
//! - [`HolidayCalendar`]: weekends plus an explicit holiday set
//! - [`BrazilCalendar`]: Brazilian national holidays by rule

use std::collections::BTreeSet;

mod brazil;

pub use brazil::BrazilCalendar;

use crate::types::Date;

/// Trait for business day calendars.
///
/// Calendars determine which days are business days vs holidays and are
/// the single source of truth for every business-day judgment made by the
/// cash-flow engine.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &'static str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is a weekend or holiday.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Returns the next business day on or after the given date.
    fn next_business_day(&self, date: Date) -> Date {
        self.roll(date, 1)
    }

    /// Returns the previous business day on or before the given date.
    fn previous_business_day(&self, date: Date) -> Date {
        self.roll(date, -1)
    }

    /// Skips weekends and holidays in the given direction; a business
    /// day is its own fixed point.
    fn roll(&self, date: Date, step: i64) -> Date {
        let mut day = date;
        while self.is_holiday(day) {
            day = day.add_days(step);
        }
        day
    }

    /// Advances a date by a number of business days (negative moves back).
    fn add_business_days(&self, date: Date, days: i32) -> Date {
        let step: i64 = if days < 0 { -1 } else { 1 };
        let mut day = date;
        for _ in 0..days.abs() {
            day = self.roll(day.add_days(step), step);
        }
        day
    }

    /// Counts business days in the half-open interval `[start, end)`.
    ///
    /// Returns 0 when `end <= start`.
    fn business_days_between(&self, start: Date, end: Date) -> i32 {
        let mut count = 0;
        let mut current = start;

        while current < end {
            if self.is_business_day(current) {
                count += 1;
            }
            current = current.add_days(1);
        }

        count
    }
}

/// A simple weekend-only calendar (no holidays).
///
/// Useful for testing or when holiday data is not available.
#[derive(Debug, Clone, Copy, Default)]
pub struct WeekendCalendar;

impl Calendar for WeekendCalendar {
    fn name(&self) -> &'static str {
        "Weekend Only"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend()
    }
}

/// Calendar built from an explicit holiday list.
///
/// Business days exclude weekends and every date in the set supplied at
/// construction. Holiday data is plain data; no rules are evaluated.
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    holidays: BTreeSet<Date>,
}

impl HolidayCalendar {
    /// Creates a calendar from a list of holiday dates.
    #[must_use]
    pub fn new(holidays: impl IntoIterator<Item = Date>) -> Self {
        Self {
            holidays: holidays.into_iter().collect(),
        }
    }

    /// Returns the number of holidays in the set.
    #[must_use]
    pub fn len(&self) -> usize {
        self.holidays.len()
    }

    /// Returns true if the holiday set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.holidays.is_empty()
    }
}

impl Calendar for HolidayCalendar {
    fn name(&self) -> &'static str {
        "Holiday List"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !self.holidays.contains(&date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_weekend_calendar() {
        let cal = WeekendCalendar;

        // Monday
        assert!(cal.is_business_day(date(2022, 3, 7)));
        // Saturday
        assert!(!cal.is_business_day(date(2022, 3, 12)));
        assert!(cal.is_holiday(date(2022, 3, 12)));
    }

    #[test]
    fn test_next_and_previous_business_day() {
        let cal = WeekendCalendar;

        // Saturday rolls forward to Monday, back to Friday
        assert_eq!(cal.next_business_day(date(2022, 3, 12)), date(2022, 3, 14));
        assert_eq!(
            cal.previous_business_day(date(2022, 3, 12)),
            date(2022, 3, 11)
        );
        // Business days are fixed points
        assert_eq!(cal.next_business_day(date(2022, 3, 14)), date(2022, 3, 14));
    }

    #[test]
    fn test_add_business_days() {
        let cal = WeekendCalendar;

        // Friday + 1 business day = Monday
        assert_eq!(cal.add_business_days(date(2022, 3, 11), 1), date(2022, 3, 14));
        assert_eq!(cal.add_business_days(date(2022, 3, 14), -1), date(2022, 3, 11));
        assert_eq!(cal.add_business_days(date(2022, 3, 7), 5), date(2022, 3, 14));
    }

    #[test]
    fn test_business_days_between_half_open() {
        let cal = WeekendCalendar;

        // Mon 2022-03-07 .. Mon 2022-03-14: Mon-Fri counted, end excluded
        assert_eq!(cal.business_days_between(date(2022, 3, 7), date(2022, 3, 14)), 5);
        assert_eq!(cal.business_days_between(date(2022, 3, 7), date(2022, 3, 7)), 0);
        assert_eq!(cal.business_days_between(date(2022, 3, 14), date(2022, 3, 7)), 0);
    }

    #[test]
    fn test_holiday_calendar() {
        let cal = HolidayCalendar::new([date(2022, 4, 21)]);

        assert!(!cal.is_business_day(date(2022, 4, 21)));
        assert!(cal.is_business_day(date(2022, 4, 22)));
        assert_eq!(cal.len(), 1);

        // Thu 2022-04-21 holiday: Wed .. Mon counts Wed, Fri
        assert_eq!(cal.business_days_between(date(2022, 4, 20), date(2022, 4, 25)), 2);
    }
}
