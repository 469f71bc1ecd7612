//! CDI index backend: daily floating-rate lookups.
//!
//! The engine consumes the index through the single-method
//! [`IndexBackend`] capability. Two implementations are provided:
//! [`InMemoryBackend`], seeded either from the compiled-in registry or
//! from caller data, and [`ConstantBackend`] for synthetic scenarios.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use fincore_core::Date;

use crate::error::{EngineError, EngineResult};

mod registry;

/// One day's CDI observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CdiDailyRate {
    /// The observation date.
    pub date: Date,
    /// The annualized rate, in percent (13.65 means 13.65% p.a.).
    pub rate: Decimal,
    /// Whether CDI published on this date. Non-publication days
    /// contribute no accrual.
    pub business_day: bool,
}

/// Capability that answers the CDI rate for a date.
pub trait IndexBackend: Send + Sync {
    /// Returns the CDI observation for the given date.
    ///
    /// # Errors
    ///
    /// Returns `EngineError::MissingIndexData` when the backend has no
    /// knowledge of the date.
    fn rate_on(&self, date: Date) -> EngineResult<CdiDailyRate>;
}

/// In-memory backend over a table of rate changes.
///
/// Lookups inside the covered range answer the most recent recorded rate
/// at or before the date (last-known-good); weekends and ignored dates
/// are flagged as non-publication days; dates outside the covered range
/// are `MissingIndexData`.
#[derive(Debug, Clone)]
pub struct InMemoryBackend {
    rates: BTreeMap<Date, Decimal>,
    ignored: BTreeSet<Date>,
    covered_through: Date,
}

impl InMemoryBackend {
    /// Creates the backend bundled with the compiled-in CDI registry.
    #[must_use]
    pub fn bundled() -> Self {
        Self {
            rates: registry::RATE_CHANGES.clone(),
            ignored: registry::IGNORED_DATES.clone(),
            covered_through: registry::covered_through(),
        }
    }

    /// Creates a backend from caller-supplied rate changes.
    ///
    /// Coverage ends at the latest change date unless extended with
    /// [`covered_through`](Self::covered_through).
    #[must_use]
    pub fn from_rates(rates: impl IntoIterator<Item = (Date, Decimal)>) -> Self {
        let rates: BTreeMap<Date, Decimal> = rates.into_iter().collect();
        let covered_through = rates
            .keys()
            .next_back()
            .copied()
            .unwrap_or_else(|| Date::from_ymd(1970, 1, 1).expect("epoch is valid"));
        Self {
            rates,
            ignored: BTreeSet::new(),
            covered_through,
        }
    }

    /// Extends the covered range through the given date.
    #[must_use]
    pub fn covered_through(mut self, date: Date) -> Self {
        self.covered_through = date;
        self
    }

    /// Marks dates as non-publication days.
    #[must_use]
    pub fn with_ignored(mut self, dates: impl IntoIterator<Item = Date>) -> Self {
        self.ignored.extend(dates);
        self
    }
}

impl IndexBackend for InMemoryBackend {
    fn rate_on(&self, date: Date) -> EngineResult<CdiDailyRate> {
        let first = self
            .rates
            .keys()
            .next()
            .copied()
            .ok_or(EngineError::MissingIndexData { date })?;
        if date < first || date > self.covered_through {
            return Err(EngineError::MissingIndexData { date });
        }

        if date.is_weekend() || self.ignored.contains(&date) {
            return Ok(CdiDailyRate {
                date,
                rate: Decimal::ZERO,
                business_day: false,
            });
        }

        let rate = self
            .rates
            .range(..=date)
            .next_back()
            .map(|(_, r)| *r)
            .ok_or(EngineError::MissingIndexData { date })?;

        Ok(CdiDailyRate {
            date,
            rate,
            business_day: true,
        })
    }
}

/// Synthetic backend answering one rate on every weekday.
///
/// Useful for tests and for composing factors against a known constant.
#[derive(Debug, Clone, Copy)]
pub struct ConstantBackend {
    rate: Decimal,
}

impl ConstantBackend {
    /// Creates a backend that always answers the given rate (percent p.a.).
    #[must_use]
    pub fn new(rate: Decimal) -> Self {
        Self { rate }
    }
}

impl IndexBackend for ConstantBackend {
    fn rate_on(&self, date: Date) -> EngineResult<CdiDailyRate> {
        Ok(CdiDailyRate {
            date,
            rate: self.rate,
            business_day: !date.is_weekend(),
        })
    }
}
