//! Payment generator: the state machine that walks the merged timeline
//! and emits one dated [`Payment`] per entry past the accrual anchor.

use log::{debug, trace};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use fincore_core::Date;

use crate::accrual::Accrual;
use crate::error::{EngineError, EngineResult};
use crate::events::PrepaymentAmount;
use crate::indices::IndexBackend;
use crate::loan::Loan;
use crate::rounding::to_cents;
use crate::timeline::{self, TimelineEntry};

/// Half a cent: the widest residual the terminal entry may carry.
const RECONCILIATION_TOLERANCE: Decimal = dec!(0.005);

/// One collected installment of the operation.
///
/// All fields are quantized to cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Collection date.
    pub date: Date,
    /// Interest accrued over this period, whether or not it is paid.
    pub raw_interest: Decimal,
    /// Interest actually paid on this date; zero when carried forward.
    pub paid_interest: Decimal,
    /// Principal returned on this date, scheduled plus extraordinary.
    pub amortization: Decimal,
    /// Tax withheld from the paid interest.
    pub tax: Decimal,
    /// Net movement: paid interest plus amortization minus tax.
    pub net: Decimal,
    /// Outstanding balance after this payment.
    pub balance_after: Decimal,
}

/// Lazy, pull-driven stream of [`Payment`] records.
///
/// The first schedule entry anchors accrual and produces no payment. A
/// mid-iteration failure is yielded as the final `Err` item; after it
/// (or after the terminal payment) the stream is fused.
pub struct Payments<'a> {
    entries: Vec<TimelineEntry>,
    accrual: Accrual<'a>,
    tax: crate::loan::TaxPolicy,
    principal: Decimal,
    principal_cents: Decimal,
    anchor: Date,

    idx: usize,
    cursor: Date,
    balance: Decimal,
    carried: Decimal,
    emitted_amortization: Decimal,
    done: bool,
}

impl<'a> Payments<'a> {
    pub(crate) fn new(loan: &'a Loan, backend: Option<&'a dyn IndexBackend>) -> EngineResult<Self> {
        let entries = timeline::build(loan.schedule(), loan.events())?;
        let anchor = entries[0].date;

        Ok(Self {
            entries,
            accrual: Accrual {
                annual_rate: loan.annual_rate(),
                mode: loan.rate_mode(),
                calendar: loan.calendar(),
                backend,
            },
            tax: loan.tax_policy(),
            principal: loan.principal(),
            principal_cents: to_cents(loan.principal()),
            anchor,
            idx: 1,
            cursor: anchor,
            balance: loan.principal(),
            carried: Decimal::ZERO,
            emitted_amortization: Decimal::ZERO,
            done: false,
        })
    }

    /// Number of entries remaining, an upper bound on emitted payments.
    #[must_use]
    pub fn remaining_entries(&self) -> usize {
        self.entries.len().saturating_sub(self.idx)
    }

    fn step(&mut self, entry: &TimelineEntry) -> EngineResult<Payment> {
        // 1. Bring accrual current over (cursor, date]. Interest
        //    compounds on the balance plus any carried interest, which
        //    keeps a carried split equivalent to a bullet.
        let factor = self.accrual.period_factor(self.cursor, entry.date)?;
        let raw = (self.balance + self.carried) * (factor - Decimal::ONE);
        self.carried += raw;

        // 2. Prepayments, in caller order, ahead of the scheduled
        //    amortization of the same date.
        let mut prepaid = Decimal::ZERO;
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
            prepaid += amount;
        }

        // 3. Scheduled amortization, ratio of the original principal,
        //    capped at the remaining balance. A settling entry closes
        //    the balance outright.
        let scheduled = if entry.settles {
            self.balance
        } else {
            (self.principal * entry.ratio).min(self.balance)
        };
        self.balance -= scheduled;
        let amortized = prepaid + scheduled;

        // 4. Interest split. Any principal return settles the carried
        //    interest along with it.
        let pays_interest =
            entry.amortizes_interest || !entry.prepayments.is_empty() || entry.settles;
        let paid = if pays_interest {
            std::mem::take(&mut self.carried)
        } else {
            Decimal::ZERO
        };

        let terminal = self.idx + 1 == self.entries.len() || self.balance == Decimal::ZERO;

        // 5.-7. Quantize for emission; the terminal amortization folds
        //    the rounding residual so the emitted balance closes at zero.
        let raw_interest = to_cents(raw);
        let paid_interest = to_cents(paid);
        let amortization = if terminal {
            self.principal_cents - self.emitted_amortization
        } else {
            to_cents(amortized)
        };
        self.emitted_amortization += amortization;
        let balance_after = self.principal_cents - self.emitted_amortization;
        let tax = self.tax.assess(paid_interest, self.anchor, entry.date);
        let net = paid_interest + amortization - tax;

        if terminal {
            if self.balance.abs() > RECONCILIATION_TOLERANCE {
                return Err(EngineError::Reconciliation {
                    residual: self.balance,
                });
            }
            self.done = true;
            debug!(
                "schedule closed on {}: {} emitted over {} entries",
                entry.date,
                self.emitted_amortization,
                self.idx
            );
        }

        trace!(
            "payment on {}: interest {raw_interest} ({paid_interest} paid), amortization {amortization}, balance {balance_after}",
            entry.date
        );

        self.cursor = entry.date;
        self.idx += 1;

        Ok(Payment {
            date: entry.date,
            raw_interest,
            paid_interest,
            amortization,
            tax,
            net,
            balance_after,
        })
    }
}

impl Iterator for Payments<'_> {
    type Item = EngineResult<Payment>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done || self.idx >= self.entries.len() {
            return None;
        }
        let entry = self.entries[self.idx].clone();
        match self.step(&entry) {
            Ok(payment) => Some(Ok(payment)),
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.done {
            (0, Some(0))
        } else {
            (0, Some(self.remaining_entries()))
        }
    }
}
