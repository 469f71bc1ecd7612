//! Amortization schedule model and validation.
//!
//! A schedule is the user-supplied ordered list of dated amortization
//! entries. The first entry never amortizes: it anchors the start of
//! interest accrual. Every other entry carries a ratio of the *original*
//! principal to amortize on its date, and a flag deciding whether the
//! interest accrued so far is paid out or carried forward.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use fincore_core::Date;

use crate::error::{EngineError, EngineResult};

/// Tolerance for the ratio-sum invariant (ten decimal places).
const RATIO_SUM_TOLERANCE: Decimal = dec!(0.0000000001);

/// One planned amortization event in the contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationEntry {
    /// Date of the event.
    pub date: Date,
    /// Fraction of the original principal amortized on this date, in [0, 1].
    pub ratio: Decimal,
    /// Whether the interest accrued up to this date is paid out.
    pub amortizes_interest: bool,
}

impl AmortizationEntry {
    /// Creates an entry that amortizes principal and pays accrued interest.
    #[must_use]
    pub fn new(date: Date, ratio: Decimal) -> Self {
        Self {
            date,
            ratio,
            amortizes_interest: true,
        }
    }

    /// Creates the schedule anchor: ratio zero, interest carried.
    ///
    /// The anchor marks the start of interest accrual and must be the
    /// first entry of every schedule.
    #[must_use]
    pub fn anchor(date: Date) -> Self {
        Self {
            date,
            ratio: Decimal::ZERO,
            amortizes_interest: false,
        }
    }

    /// Overrides the interest-amortization flag.
    #[must_use]
    pub fn with_amortizes_interest(mut self, amortizes_interest: bool) -> Self {
        self.amortizes_interest = amortizes_interest;
        self
    }
}

/// The ordered amortization calendar of a loan.
///
/// # Example
///
/// ```rust
/// use fincore_engine::schedule::{AmortizationEntry, AmortizationSchedule};
/// use fincore_core::Date;
/// use rust_decimal_macros::dec;
///
/// let schedule = AmortizationSchedule::from_entries(vec![
///     AmortizationEntry::anchor(Date::from_ymd(2022, 3, 9).unwrap()),
///     AmortizationEntry::new(Date::from_ymd(2022, 4, 11).unwrap(), dec!(0.8)),
///     AmortizationEntry::new(Date::from_ymd(2022, 5, 9).unwrap(), dec!(0.2)),
/// ]);
/// assert!(schedule.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    entries: Vec<AmortizationEntry>,
}

impl AmortizationSchedule {
    /// Creates a schedule from a list of entries.
    #[must_use]
    pub fn from_entries(entries: Vec<AmortizationEntry>) -> Self {
        Self { entries }
    }

    /// Creates a bullet schedule: a single amortization at maturity.
    #[must_use]
    pub fn bullet(start: Date, maturity: Date) -> Self {
        Self {
            entries: vec![
                AmortizationEntry::anchor(start),
                AmortizationEntry::new(maturity, Decimal::ONE),
            ],
        }
    }

    /// Creates a level schedule: equal ratios on the given dates.
    ///
    /// The last entry absorbs the division remainder so the ratios sum
    /// to exactly one.
    #[must_use]
    pub fn level(start: Date, dates: Vec<Date>) -> Self {
        let n = dates.len();
        let mut entries = Vec::with_capacity(n + 1);
        entries.push(AmortizationEntry::anchor(start));

        if n == 0 {
            return Self { entries };
        }

        let share = Decimal::ONE / Decimal::from(n as u64);
        let mut assigned = Decimal::ZERO;
        for (i, date) in dates.into_iter().enumerate() {
            let ratio = if i + 1 == n {
                Decimal::ONE - assigned
            } else {
                assigned += share;
                share
            };
            entries.push(AmortizationEntry::new(date, ratio));
        }

        Self { entries }
    }

    /// Returns the entries as a slice.
    #[must_use]
    pub fn entries(&self) -> &[AmortizationEntry] {
        &self.entries
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if the schedule has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over the entries.
    pub fn iter(&self) -> impl Iterator<Item = &AmortizationEntry> {
        self.entries.iter()
    }

    /// Returns the accrual anchor date (first entry).
    #[must_use]
    pub fn anchor_date(&self) -> Option<Date> {
        self.entries.first().map(|e| e.date)
    }

    /// Returns the maturity date (last entry).
    #[must_use]
    pub fn maturity_date(&self) -> Option<Date> {
        self.entries.last().map(|e| e.date)
    }

    /// Returns the sum of all amortization ratios.
    #[must_use]
    pub fn total_ratio(&self) -> Decimal {
        self.entries.iter().map(|e| e.ratio).sum()
    }

    /// Checks every structural rule of the schedule.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::InvalidSchedule` when the schedule has fewer
    /// than two entries, dates are not strictly increasing, the first
    /// entry amortizes principal or interest, any ratio falls outside
    /// [0, 1], or the ratios do not sum to one within ten decimal places.
    pub fn validate(&self) -> EngineResult<()> {
        if self.entries.len() < 2 {
            return Err(EngineError::invalid_schedule(format!(
                "at least 2 entries required, got {}",
                self.entries.len()
            )));
        }

        for pair in self.entries.windows(2) {
            if pair[1].date <= pair[0].date {
                return Err(EngineError::invalid_schedule(format!(
                    "dates must be strictly increasing: {} then {}",
                    pair[0].date, pair[1].date
                )));
            }
        }

        let first = &self.entries[0];
        if first.ratio != Decimal::ZERO || first.amortizes_interest {
            return Err(EngineError::invalid_schedule(
                "first entry must have ratio 0 and carry interest",
            ));
        }

        for entry in &self.entries {
            if entry.ratio < Decimal::ZERO || entry.ratio > Decimal::ONE {
                return Err(EngineError::invalid_schedule(format!(
                    "ratio {} on {} is outside [0, 1]",
                    entry.ratio, entry.date
                )));
            }
        }

        let total = self.total_ratio();
        if (total - Decimal::ONE).abs() > RATIO_SUM_TOLERANCE {
            return Err(EngineError::invalid_schedule(format!(
                "ratios sum to {total}, expected 1"
            )));
        }

        Ok(())
    }

    /// Validates and returns a copy with the ratio-sum residue absorbed
    /// into the last entry, so the ratios sum to exactly one.
    ///
    /// # Errors
    ///
    /// Propagates every [`validate`](Self::validate) failure.
    pub fn normalized(&self) -> EngineResult<Self> {
        self.validate()?;

        let mut entries = self.entries.clone();
        let residue = Decimal::ONE - entries.iter().map(|e| e.ratio).sum::<Decimal>();
        if residue != Decimal::ZERO {
            let last = entries.last_mut().expect("validated schedule has entries");
            last.ratio += residue;
        }

        Ok(Self { entries })
    }
}

impl<'a> IntoIterator for &'a AmortizationSchedule {
    type Item = &'a AmortizationEntry;
    type IntoIter = std::slice::Iter<'a, AmortizationEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
