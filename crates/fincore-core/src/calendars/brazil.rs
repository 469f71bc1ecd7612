//! Brazilian national holiday calendar.

use super::Calendar;
use crate::types::Date;

/// Brazilian national holiday calendar.
///
/// Covers the national holidays observed by the Brazilian interbank
/// market: fixed-date holidays plus the Easter-derived movable feasts
/// (Carnival Monday/Tuesday, Good Friday, Corpus Christi).
#[derive(Debug, Clone, Copy, Default)]
pub struct BrazilCalendar;

impl BrazilCalendar {
    fn is_national_holiday(date: Date) -> bool {
        let y = date.year();
        let m = date.month();
        let d = date.day();

        // Fixed-date holidays
        let fixed = matches!(
            (m, d),
            // New Year's Day
            (1, 1)
            // Tiradentes Day
            | (4, 21)
            // Labour Day
            | (5, 1)
            // Independence Day
            | (9, 7)
            // Nossa Senhora Aparecida
            | (10, 12)
            // All Souls Day
            | (11, 2)
            // Republic Day
            | (11, 15)
            // Christmas
            | (12, 25)
        );
        if fixed {
            return true;
        }

        // Black Awareness Day, national from 2024
        if m == 11 && d == 20 && y >= 2024 {
            return true;
        }

        // Movable feasts relative to Easter Sunday
        let easter = easter_sunday_ordinal(y);
        let yd = i64::from(date.day_of_year());

        // Carnival Monday and Tuesday
        yd == easter - 48
            || yd == easter - 47
            // Good Friday
            || yd == easter - 2
            // Corpus Christi
            || yd == easter + 60
    }
}

impl Calendar for BrazilCalendar {
    fn name(&self) -> &'static str {
        "Brazil"
    }

    fn is_business_day(&self, date: Date) -> bool {
        !date.is_weekend() && !Self::is_national_holiday(date)
    }
}

/// Day-of-year of Easter Sunday (Anonymous Gregorian algorithm).
fn easter_sunday_ordinal(year: i32) -> i64 {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;

    let easter = Date::from_ymd(year, month as u32, day as u32)
        .expect("computus always yields a valid March or April date");
    i64::from(easter.day_of_year())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_easter_derived_holidays_2022() {
        let cal = BrazilCalendar;

        // Easter Sunday 2022 was April 17
        assert!(!cal.is_business_day(date(2022, 2, 28))); // Carnival Monday
        assert!(!cal.is_business_day(date(2022, 3, 1))); // Carnival Tuesday
        assert!(!cal.is_business_day(date(2022, 4, 15))); // Good Friday
        assert!(!cal.is_business_day(date(2022, 6, 16))); // Corpus Christi
    }

    #[test]
    fn test_fixed_holidays() {
        let cal = BrazilCalendar;

        assert!(!cal.is_business_day(date(2022, 4, 21))); // Tiradentes
        assert!(!cal.is_business_day(date(2022, 9, 7))); // Independence Day
        assert!(!cal.is_business_day(date(2022, 11, 15))); // Republic Day

        // Black Awareness Day became national in 2024
        assert!(!cal.is_business_day(date(2024, 11, 20)));
        assert!(cal.is_business_day(date(2023, 11, 20)));
    }

    #[test]
    fn test_ordinary_business_days() {
        let cal = BrazilCalendar;

        assert!(cal.is_business_day(date(2022, 3, 9)));
        assert!(cal.is_business_day(date(2022, 5, 9)));
        assert!(!cal.is_business_day(date(2022, 5, 7))); // Saturday
    }

    #[test]
    fn test_business_days_around_holiday_week() {
        let cal = BrazilCalendar;

        // 2022-04-11 (Mon) .. 2022-04-18 (Mon): Good Friday removes Apr 15
        assert_eq!(cal.business_days_between(date(2022, 4, 11), date(2022, 4, 18)), 4);
    }
}
