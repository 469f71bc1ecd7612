//! Daily-returns generator: the per-calendar-day accrual view.
//!
//! Walks the same timeline as the payment generator but one day at a
//! time, so the two views reconcile: between consecutive scheduled
//! dates the daily increments sum to the payment's raw interest.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fincore_core::Date;

use crate::accrual::Accrual;
use crate::error::{EngineError, EngineResult};
use crate::events::PrepaymentAmount;
use crate::indices::IndexBackend;
use crate::loan::Loan;
use crate::rounding::to_cents;
use crate::timeline::{self, TimelineEntry};

/// One calendar day of the accrual view.
///
/// Interest fields carry full precision; the balance is quantized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyReturn {
    /// The calendar day.
    pub date: Date,
    /// Interest accrued on this day. Zero on non-business days under
    /// CDI; follows the 30/360 day-count delta under prefixed.
    pub interest_today: Decimal,
    /// Interest accrued since the anchor, never reset by payments.
    pub interest_cumulative: Decimal,
    /// Outstanding balance at the end of the day, in cents.
    pub balance: Decimal,
    /// Whether the day is a business day of the loan's calendar.
    pub is_business_day: bool,
    /// Whether an amortization or extraordinary event fell on this day.
    pub is_amortization_date: bool,
}

/// Lazy, pull-driven stream of [`DailyReturn`] records, dense in
/// calendar days from the anchor through the final timeline date.
pub struct DailyReturns<'a> {
    entries: Vec<TimelineEntry>,
    accrual: Accrual<'a>,
    principal: Decimal,

    entry_idx: usize,
    current: Date,
    last: Date,
    prev: Date,
    started: bool,
    balance: Decimal,
    carried: Decimal,
    cumulative: Decimal,
    done: bool,
}

impl<'a> DailyReturns<'a> {
    pub(crate) fn new(loan: &'a Loan, backend: Option<&'a dyn IndexBackend>) -> EngineResult<Self> {
        let entries = timeline::build(loan.schedule(), loan.events())?;
        let anchor = entries[0].date;
        let last = entries.last().expect("timeline is never empty").date;

        Ok(Self {
            entries,
            accrual: Accrual {
                annual_rate: loan.annual_rate(),
                mode: loan.rate_mode(),
                calendar: loan.calendar(),
                backend,
            },
            principal: loan.principal(),
            entry_idx: 1,
            current: anchor,
            last,
            prev: anchor,
            started: false,
            balance: loan.principal(),
            carried: Decimal::ZERO,
            cumulative: Decimal::ZERO,
            done: false,
        })
    }

    fn step(&mut self, day: Date) -> EngineResult<DailyReturn> {
        let factor = self.accrual.day_factor(self.prev, day)?;
        let interest_today = (self.balance + self.carried) * (factor - Decimal::ONE);
        self.carried += interest_today;
        self.cumulative += interest_today;

        let mut is_amortization_date = false;
        if self.entry_idx < self.entries.len() && self.entries[self.entry_idx].date == day {
            let entry = self.entries[self.entry_idx].clone();
            self.apply_entry(&entry)?;
            is_amortization_date = true;
            self.entry_idx += 1;
            if entry.settles || self.balance == Decimal::ZERO {
                self.last = day;
            }
        }

        self.prev = day;

        Ok(DailyReturn {
            date: day,
            interest_today,
            interest_cumulative: self.cumulative,
            balance: to_cents(self.balance),
            is_business_day: self.accrual.calendar.is_business_day(day),
            is_amortization_date,
        })
    }

    fn apply_entry(&mut self, entry: &TimelineEntry) -> EngineResult<()> {
        for amount in &entry.prepayments {
            let amount = match amount {
                PrepaymentAmount::Partial(a) => *a,
                PrepaymentAmount::Full => self.balance,
            };
            if amount > self.balance {
                return Err(EngineError::PrepaymentExceedsBalance {
                    excess: to_cents(amount - self.balance),
                });
            }
            self.balance -= amount;
        }

        let scheduled = if entry.settles {
            self.balance
        } else {
            (self.principal * entry.ratio).min(self.balance)
        };
        self.balance -= scheduled;

        if entry.amortizes_interest || !entry.prepayments.is_empty() || entry.settles {
            self.carried = Decimal::ZERO;
        }

        Ok(())
    }
}

impl Iterator for DailyReturns<'_> {
    type Item = EngineResult<DailyReturn>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        if !self.started {
            // The anchor day opens the view with no accrual.
            self.started = true;
            return Some(Ok(DailyReturn {
                date: self.current,
                interest_today: Decimal::ZERO,
                interest_cumulative: Decimal::ZERO,
                balance: to_cents(self.balance),
                is_business_day: self.accrual.calendar.is_business_day(self.current),
                is_amortization_date: false,
            }));
        }

        let day = self.current.add_days(1);
        if day > self.last {
            self.done = true;
            return None;
        }
        self.current = day;

        match self.step(day) {
            Ok(record) => {
                if day >= self.last {
                    self.done = true;
                }
                Some(Ok(record))
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
