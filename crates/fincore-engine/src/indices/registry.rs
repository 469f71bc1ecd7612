//! Compiled-in CDI registry.
//!
//! Rate changes and non-publication dates are embedded as static tables.
//! CDI moves on monetary policy decisions, so the rate table stores the
//! dates a new rate became effective; lookups resolve to the most recent
//! change at or before the queried date.

use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::{BTreeMap, BTreeSet};

use fincore_core::Date;

/// CDI rate changes (year, month, day, percent p.a.), effective from the
/// given date.
const CDI_RATE_CHANGES: &[(i32, u32, u32, Decimal)] = &[
    (2021, 12, 9, dec!(9.15)),
    (2022, 2, 3, dec!(10.65)),
    (2022, 3, 17, dec!(11.65)),
    (2022, 5, 5, dec!(12.65)),
    (2022, 6, 17, dec!(13.15)),
    (2022, 8, 4, dec!(13.65)),
    (2023, 8, 3, dec!(13.15)),
    (2023, 9, 21, dec!(12.65)),
    (2023, 11, 2, dec!(12.15)),
    (2023, 12, 14, dec!(11.65)),
    (2024, 2, 1, dec!(11.15)),
    (2024, 3, 21, dec!(10.65)),
    (2024, 5, 9, dec!(10.40)),
    (2024, 9, 19, dec!(10.65)),
    (2024, 11, 7, dec!(11.15)),
    (2024, 12, 12, dec!(12.15)),
];

/// Last date the bundled registry answers for.
const COVERED_THROUGH: (i32, u32, u32) = (2024, 12, 31);

/// Dates on which CDI is not published (national holidays falling on
/// weekdays are listed; weekends are handled by the weekday rule).
const CDI_IGNORED_DATES: &[(i32, u32, u32)] = &[
    // 2022
    (2022, 2, 28),
    (2022, 3, 1),
    (2022, 4, 15),
    (2022, 4, 21),
    (2022, 6, 16),
    (2022, 9, 7),
    (2022, 10, 12),
    (2022, 11, 2),
    (2022, 11, 15),
    // 2023
    (2023, 2, 20),
    (2023, 2, 21),
    (2023, 4, 7),
    (2023, 4, 21),
    (2023, 5, 1),
    (2023, 6, 8),
    (2023, 9, 7),
    (2023, 10, 12),
    (2023, 11, 2),
    (2023, 11, 15),
    (2023, 12, 25),
    // 2024
    (2024, 1, 1),
    (2024, 2, 12),
    (2024, 2, 13),
    (2024, 3, 29),
    (2024, 5, 1),
    (2024, 5, 30),
    (2024, 11, 15),
    (2024, 11, 20),
    (2024, 12, 25),
];

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).expect("registry constants are valid dates")
}

/// Rate changes keyed by effective date.
pub(crate) static RATE_CHANGES: Lazy<BTreeMap<Date, Decimal>> = Lazy::new(|| {
    CDI_RATE_CHANGES
        .iter()
        .map(|&(y, m, d, rate)| (date(y, m, d), rate))
        .collect()
});

/// Non-publication dates.
pub(crate) static IGNORED_DATES: Lazy<BTreeSet<Date>> = Lazy::new(|| {
    CDI_IGNORED_DATES
        .iter()
        .map(|&(y, m, d)| date(y, m, d))
        .collect()
});

/// Last covered date of the bundled registry.
pub(crate) fn covered_through() -> Date {
    let (y, m, d) = COVERED_THROUGH;
    date(y, m, d)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_is_ordered_and_nonempty() {
        assert!(!RATE_CHANGES.is_empty());
        assert!(RATE_CHANGES.keys().next().unwrap() < &covered_through());
    }

    #[test]
    fn test_known_rate_change() {
        let d = date(2022, 8, 4);
        assert_eq!(RATE_CHANGES.get(&d), Some(&dec!(13.65)));
    }

    #[test]
    fn test_ignored_dates_contain_good_friday_2022() {
        assert!(IGNORED_DATES.contains(&date(2022, 4, 15)));
    }
}
