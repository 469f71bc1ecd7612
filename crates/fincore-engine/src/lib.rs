//! # Fincore Engine
//!
//! Payment schedules, daily accruals and arrears for fixed income
//! credit operations.
//!
//! Given a principal, a rate and an amortization calendar, the engine
//! produces the stream of dated payments a servicer must collect and,
//! on demand, a per-day view of accrued interest. Everything is
//! deterministic and pure: no I/O beyond index-backend lookups, no
//! shared mutable state, and two invocations over the same inputs emit
//! the same records.
//!
//! - **Schedules**: [`schedule::AmortizationSchedule`] with validation
//! - **Events**: [`events::ExtraordinaryEvent`] prepayments and early
//!   settlements merged into the schedule
//! - **Index**: [`indices::IndexBackend`] answering daily CDI rates,
//!   with a bundled in-memory registry
//! - **Generators**: [`payments::Payments`] and [`daily::DailyReturns`],
//!   lazy pull-driven streams
//! - **Arrears**: [`arrears::compute_arrears`] for missed installments
//!
//! ## Example
//!
//! ```rust
//! use fincore_engine::prelude::*;
//! use rust_decimal_macros::dec;
//!
//! let schedule = AmortizationSchedule::from_entries(vec![
//!     AmortizationEntry::anchor(Date::from_ymd(2022, 3, 9).unwrap()),
//!     AmortizationEntry::new(Date::from_ymd(2022, 4, 11).unwrap(), dec!(0.8)),
//!     AmortizationEntry::new(Date::from_ymd(2022, 5, 9).unwrap(), dec!(0.2)),
//! ]);
//!
//! let loan = LoanBuilder::new()
//!     .principal(dec!(100000))
//!     .annual_rate(dec!(5))
//!     .schedule(schedule)
//!     .build()
//!     .unwrap();
//!
//! let payments: Vec<Payment> = loan
//!     .payments()
//!     .unwrap()
//!     .collect::<Result<_, _>>()
//!     .unwrap();
//!
//! assert_eq!(payments[0].amortization, dec!(80000.00));
//! assert_eq!(payments[1].amortization, dec!(20000.00));
//! assert_eq!(payments[1].balance_after, dec!(0.00));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

mod accrual;
mod timeline;

pub mod arrears;
pub mod daily;
pub mod error;
pub mod events;
pub mod indices;
pub mod loan;
pub mod payments;
pub mod rounding;
pub mod schedule;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::arrears::{compute_arrears, ArrearsResult};
    pub use crate::daily::{DailyReturn, DailyReturns};
    pub use crate::error::{EngineError, EngineResult};
    pub use crate::events::{EventKind, ExtraordinaryEvent, PrepaymentAmount};
    pub use crate::indices::{CdiDailyRate, ConstantBackend, InMemoryBackend, IndexBackend};
    pub use crate::loan::{Loan, LoanBuilder, RateMode, TaxPolicy};
    pub use crate::payments::{Payment, Payments};
    pub use crate::schedule::{AmortizationEntry, AmortizationSchedule};

    pub use fincore_core::calendars::{BrazilCalendar, Calendar, WeekendCalendar};
    pub use fincore_core::Date;
}

// Re-export commonly used types at crate root
pub use error::{EngineError, EngineResult};
pub use loan::{Loan, LoanBuilder};
