//! The loan aggregate: principal, rate, calendar of amortizations and
//! the knobs that select a rate regime, tax treatment and events.

use std::fmt;
use std::sync::Arc;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fincore_core::calendars::{BrazilCalendar, Calendar};
use fincore_core::Date;

use crate::daily::DailyReturns;
use crate::error::{EngineError, EngineResult};
use crate::events::ExtraordinaryEvent;
use crate::indices::IndexBackend;
use crate::payments::Payments;
use crate::rounding::to_cents;
use crate::schedule::AmortizationSchedule;

const HUNDRED: Decimal = rust_decimal_macros::dec!(100);

/// Rate regime of a loan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RateMode {
    /// Fixed annual rate compounding on the 30/360 day count.
    Prefixed,
    /// Floating on CDI, compounding per business day over 252.
    Cdi {
        /// Decimal multiplier on the daily CDI percent (1 = 100% of CDI).
        percent_of_cdi: Decimal,
    },
}

/// Tax applied to paid interest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TaxPolicy {
    /// No tax withheld.
    #[default]
    Exempt,
    /// Flat percentage of the paid interest.
    Flat(Decimal),
    /// Brazilian regressive income tax table on days elapsed since the
    /// accrual start: 22.5% through 180 days, 20% through 360, 17.5%
    /// through 720, 15% beyond.
    Regressive,
}

impl TaxPolicy {
    /// Tax due on a quantized interest payment made on `date` for an
    /// accrual that started on `anchor`. The result is quantized.
    #[must_use]
    pub fn assess(&self, interest: Decimal, anchor: Date, date: Date) -> Decimal {
        let rate_pct = match self {
            TaxPolicy::Exempt => return Decimal::ZERO,
            TaxPolicy::Flat(pct) => *pct,
            TaxPolicy::Regressive => {
                let days = anchor.days_between(&date);
                if days <= 180 {
                    rust_decimal_macros::dec!(22.5)
                } else if days <= 360 {
                    rust_decimal_macros::dec!(20)
                } else if days <= 720 {
                    rust_decimal_macros::dec!(17.5)
                } else {
                    rust_decimal_macros::dec!(15)
                }
            }
        };
        to_cents(interest * rate_pct / HUNDRED)
    }
}

/// A fixed income credit operation.
///
/// Built through [`LoanBuilder`]; the loan itself is immutable and its
/// generators are pure: two invocations over the same inputs emit the
/// same records.
///
/// # Example
///
/// ```rust
/// use fincore_engine::prelude::*;
/// use rust_decimal_macros::dec;
///
/// let schedule = AmortizationSchedule::bullet(
///     Date::from_ymd(2022, 3, 9).unwrap(),
///     Date::from_ymd(2022, 5, 9).unwrap(),
/// );
/// let loan = LoanBuilder::new()
///     .principal(dec!(100000))
///     .annual_rate(dec!(5))
///     .schedule(schedule)
///     .build()
///     .unwrap();
///
/// let payments: Vec<_> = loan
///     .payments()
///     .unwrap()
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(payments.len(), 1);
/// assert_eq!(payments[0].amortization, dec!(100000.00));
/// ```
#[derive(Clone)]
pub struct Loan {
    principal: Decimal,
    annual_rate: Decimal,
    schedule: AmortizationSchedule,
    mode: RateMode,
    tax: TaxPolicy,
    events: Vec<ExtraordinaryEvent>,
    calendar: Arc<dyn Calendar>,
}

impl Loan {
    /// Returns the original principal.
    #[must_use]
    pub fn principal(&self) -> Decimal {
        self.principal
    }

    /// Returns the annual rate, in percent.
    #[must_use]
    pub fn annual_rate(&self) -> Decimal {
        self.annual_rate
    }

    /// Returns the normalized amortization schedule.
    #[must_use]
    pub fn schedule(&self) -> &AmortizationSchedule {
        &self.schedule
    }

    /// Returns the rate regime.
    #[must_use]
    pub fn rate_mode(&self) -> RateMode {
        self.mode
    }

    /// Returns the tax policy.
    #[must_use]
    pub fn tax_policy(&self) -> TaxPolicy {
        self.tax
    }

    /// Returns the extraordinary events, in caller order.
    #[must_use]
    pub fn events(&self) -> &[ExtraordinaryEvent] {
        &self.events
    }

    /// Returns the business-day calendar.
    #[must_use]
    pub fn calendar(&self) -> &dyn Calendar {
        self.calendar.as_ref()
    }

    /// Lazily generates the payment stream of a prefixed loan.
    ///
    /// # Errors
    ///
    /// `EngineError::Config` for CDI loans (a backend is required);
    /// `EngineError::InvalidSchedule` when the events cannot be merged.
    pub fn payments(&self) -> EngineResult<Payments<'_>> {
        self.require_prefixed()?;
        Payments::new(self, None)
    }

    /// Lazily generates the payment stream, pulling daily factors from
    /// the given index backend when the loan is CDI-indexed.
    ///
    /// # Errors
    ///
    /// `EngineError::InvalidSchedule` when the events cannot be merged.
    pub fn payments_with<'a>(
        &'a self,
        backend: &'a dyn IndexBackend,
    ) -> EngineResult<Payments<'a>> {
        Payments::new(self, Some(backend))
    }

    /// Lazily generates the per-calendar-day accrual view of a prefixed
    /// loan.
    ///
    /// # Errors
    ///
    /// `EngineError::Config` for CDI loans (a backend is required);
    /// `EngineError::InvalidSchedule` when the events cannot be merged.
    pub fn daily_returns(&self) -> EngineResult<DailyReturns<'_>> {
        self.require_prefixed()?;
        DailyReturns::new(self, None)
    }

    /// Lazily generates the per-calendar-day accrual view, pulling daily
    /// factors from the given index backend when the loan is CDI-indexed.
    ///
    /// # Errors
    ///
    /// `EngineError::InvalidSchedule` when the events cannot be merged.
    pub fn daily_returns_with<'a>(
        &'a self,
        backend: &'a dyn IndexBackend,
    ) -> EngineResult<DailyReturns<'a>> {
        DailyReturns::new(self, Some(backend))
    }

    fn require_prefixed(&self) -> EngineResult<()> {
        match self.mode {
            RateMode::Prefixed => Ok(()),
            RateMode::Cdi { .. } => Err(EngineError::config(
                "CDI loans require an index backend; use the *_with variants",
            )),
        }
    }
}

impl fmt::Debug for Loan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Loan")
            .field("principal", &self.principal)
            .field("annual_rate", &self.annual_rate)
            .field("schedule", &self.schedule)
            .field("mode", &self.mode)
            .field("tax", &self.tax)
            .field("events", &self.events)
            .field("calendar", &self.calendar.name())
            .finish()
    }
}

/// Builder for [`Loan`].
pub struct LoanBuilder {
    principal: Option<Decimal>,
    annual_rate: Option<Decimal>,
    schedule: Option<AmortizationSchedule>,
    mode: RateMode,
    tax: TaxPolicy,
    events: Vec<ExtraordinaryEvent>,
    calendar: Arc<dyn Calendar>,
}

impl LoanBuilder {
    /// Creates a builder with defaults: prefixed regime, exempt tax, no
    /// events, Brazilian calendar.
    #[must_use]
    pub fn new() -> Self {
        Self {
            principal: None,
            annual_rate: None,
            schedule: None,
            mode: RateMode::Prefixed,
            tax: TaxPolicy::Exempt,
            events: Vec::new(),
            calendar: Arc::new(BrazilCalendar),
        }
    }

    /// Sets the principal.
    #[must_use]
    pub fn principal(mut self, principal: Decimal) -> Self {
        self.principal = Some(principal);
        self
    }

    /// Sets the annual rate, in percent. Ignored by the CDI accrual,
    /// which prices off the index; still validated as non-negative.
    #[must_use]
    pub fn annual_rate(mut self, annual_rate: Decimal) -> Self {
        self.annual_rate = Some(annual_rate);
        self
    }

    /// Sets the amortization schedule.
    #[must_use]
    pub fn schedule(mut self, schedule: AmortizationSchedule) -> Self {
        self.schedule = Some(schedule);
        self
    }

    /// Switches the loan to CDI indexing at the given percent-of-CDI
    /// multiplier (1 = 100% of CDI).
    #[must_use]
    pub fn cdi(mut self, percent_of_cdi: Decimal) -> Self {
        self.mode = RateMode::Cdi { percent_of_cdi };
        self
    }

    /// Sets the tax policy.
    #[must_use]
    pub fn tax(mut self, tax: TaxPolicy) -> Self {
        self.tax = tax;
        self
    }

    /// Appends an extraordinary event.
    #[must_use]
    pub fn event(mut self, event: ExtraordinaryEvent) -> Self {
        self.events.push(event);
        self
    }

    /// Appends several extraordinary events.
    #[must_use]
    pub fn events(mut self, events: impl IntoIterator<Item = ExtraordinaryEvent>) -> Self {
        self.events.extend(events);
        self
    }

    /// Overrides the business-day calendar.
    #[must_use]
    pub fn calendar(mut self, calendar: impl Calendar + 'static) -> Self {
        self.calendar = Arc::new(calendar);
        self
    }

    /// Validates the inputs and builds the loan.
    ///
    /// # Errors
    ///
    /// - `EngineError::Config` when a required field is missing
    /// - `EngineError::InvalidAmount` for a non-positive principal, a
    ///   negative rate or a non-positive percent-of-CDI
    /// - `EngineError::InvalidSchedule` for any structural schedule
    ///   violation, including non-business-day dates on a CDI loan
    pub fn build(self) -> EngineResult<Loan> {
        let principal = self
            .principal
            .ok_or_else(|| EngineError::config("missing field: principal"))?;
        if principal <= Decimal::ZERO {
            return Err(EngineError::invalid_amount(
                principal,
                "principal must be positive",
            ));
        }

        let annual_rate = self
            .annual_rate
            .ok_or_else(|| EngineError::config("missing field: annual_rate"))?;
        if annual_rate < Decimal::ZERO {
            return Err(EngineError::invalid_amount(
                annual_rate,
                "annual rate must not be negative",
            ));
        }

        if let RateMode::Cdi { percent_of_cdi } = self.mode {
            if percent_of_cdi <= Decimal::ZERO {
                return Err(EngineError::invalid_amount(
                    percent_of_cdi,
                    "percent of CDI must be positive",
                ));
            }
        }

        let schedule = self
            .schedule
            .ok_or_else(|| EngineError::config("missing field: schedule"))?
            .normalized()?;

        // CDI accrual skips non-business days, so amortizing on one
        // would never settle; prefixed 30/360 has no such constraint.
        if matches!(self.mode, RateMode::Cdi { .. }) {
            for entry in schedule.iter().skip(1) {
                if !self.calendar.is_business_day(entry.date) {
                    return Err(EngineError::invalid_schedule(format!(
                        "amortization on {} is not a {} business day",
                        entry.date,
                        self.calendar.name()
                    )));
                }
            }
        }

        Ok(Loan {
            principal,
            annual_rate,
            schedule,
            mode: self.mode,
            tax: self.tax,
            events: self.events,
            calendar: self.calendar,
        })
    }
}

impl Default for LoanBuilder {
    fn default() -> Self {
        Self::new()
    }
}
