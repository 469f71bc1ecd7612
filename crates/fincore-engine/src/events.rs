//! Extraordinary events: prepayments and early settlements.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fincore_core::Date;

/// Principal portion returned by a prepayment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrepaymentAmount {
    /// A fixed monetary amount.
    Partial(Decimal),
    /// The whole outstanding balance at the event date.
    Full,
}

/// Kind of extraordinary event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventKind {
    /// An unscheduled principal return; the loan continues on the
    /// remaining balance.
    Prepayment(PrepaymentAmount),
    /// Closes the operation: the remaining balance is amortized and all
    /// later scheduled entries are discarded.
    EarlySettlement,
}

/// An unplanned event applied on top of the amortization calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtraordinaryEvent {
    /// Date the event takes effect.
    pub date: Date,
    /// What the event does.
    pub kind: EventKind,
}

impl ExtraordinaryEvent {
    /// Creates a partial prepayment of the given amount.
    #[must_use]
    pub fn prepayment(date: Date, amount: Decimal) -> Self {
        Self {
            date,
            kind: EventKind::Prepayment(PrepaymentAmount::Partial(amount)),
        }
    }

    /// Creates a prepayment of the whole outstanding balance.
    #[must_use]
    pub fn full_prepayment(date: Date) -> Self {
        Self {
            date,
            kind: EventKind::Prepayment(PrepaymentAmount::Full),
        }
    }

    /// Creates an early settlement.
    #[must_use]
    pub fn early_settlement(date: Date) -> Self {
        Self {
            date,
            kind: EventKind::EarlySettlement,
        }
    }
}
