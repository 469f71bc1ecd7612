//! # Fincore Core
//!
//! Core types, calendars, day counts and the rate model for the Fincore
//! cash-flow engine.
//!
//! This crate provides the foundational building blocks used by
//! `fincore-engine`:
//!
//! - **Types**: the [`types::Date`] newtype over `chrono::NaiveDate`
//! - **Calendars**: business-day calendars, including the Brazilian
//!   national calendar used for CDI accrual
//! - **Day Counts**: 30/360 US and business-days/252 conventions
//! - **Rates**: conversions between annual rates, monthly factors and
//!   daily factors under each day-count regime
//!
//! All arithmetic is `rust_decimal::Decimal`; nothing here rounds.
//!
//! ## Example
//!
//! ```rust
//! use fincore_core::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let cal = BrazilCalendar;
//! let start = Date::from_ymd(2022, 4, 11).unwrap();
//! let end = Date::from_ymd(2022, 4, 18).unwrap();
//!
//! // Good Friday 2022-04-15 is skipped
//! assert_eq!(cal.business_days_between(start, end), 4);
//!
//! let daily = fincore_core::rates::cdi_daily_factor(dec!(13.65), dec!(1)).unwrap();
//! assert!(daily > dec!(1.0005) && daily < dec!(1.00051));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod rates;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{BrazilCalendar, Calendar, HolidayCalendar, WeekendCalendar};
    pub use crate::daycounts::{Business252, DayCount, Thirty360};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::types::Date;
}

// Re-export commonly used types at crate root
pub use error::{CoreError, CoreResult};
pub use types::Date;
