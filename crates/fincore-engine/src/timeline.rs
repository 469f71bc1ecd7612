//! Event timeline: the merge of scheduled amortizations and
//! extraordinary events into one monotone sequence.

use log::debug;
use rust_decimal::Decimal;

use fincore_core::Date;

use crate::error::{EngineError, EngineResult};
use crate::events::{EventKind, ExtraordinaryEvent, PrepaymentAmount};
use crate::schedule::AmortizationSchedule;

/// One dated step of the merged timeline.
///
/// Prepayments apply before the scheduled amortization of the same date;
/// the scheduled ratio stays relative to the original principal. A
/// settling entry closes whatever balance remains after its prepayments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TimelineEntry {
    pub date: Date,
    /// Scheduled amortization ratio of the original principal.
    pub ratio: Decimal,
    pub amortizes_interest: bool,
    /// Extraordinary principal returns on this date, in caller order.
    pub prepayments: Vec<PrepaymentAmount>,
    /// Whether this entry closes the remaining balance.
    pub settles: bool,
}

impl TimelineEntry {
    fn scheduled(date: Date, ratio: Decimal, amortizes_interest: bool) -> Self {
        Self {
            date,
            ratio,
            amortizes_interest,
            prepayments: Vec::new(),
            settles: false,
        }
    }

    fn event_only(date: Date) -> Self {
        Self {
            date,
            ratio: Decimal::ZERO,
            amortizes_interest: false,
            prepayments: Vec::new(),
            settles: false,
        }
    }
}

/// Merges a normalized schedule with extraordinary events.
///
/// Events must be ordered by date, fall strictly after the accrual anchor
/// and not after maturity. An early settlement truncates the timeline;
/// nothing may follow it.
pub(crate) fn build(
    schedule: &AmortizationSchedule,
    events: &[ExtraordinaryEvent],
) -> EngineResult<Vec<TimelineEntry>> {
    let anchor = schedule
        .anchor_date()
        .ok_or_else(|| EngineError::invalid_schedule("schedule has no entries"))?;
    let maturity = schedule
        .maturity_date()
        .expect("schedule with an anchor has a maturity");

    let mut timeline: Vec<TimelineEntry> = schedule
        .iter()
        .map(|e| TimelineEntry::scheduled(e.date, e.ratio, e.amortizes_interest))
        .collect();

    let mut settled_at: Option<Date> = None;
    let mut previous_date: Option<Date> = None;

    for event in events {
        if let Some(prev) = previous_date {
            if event.date < prev {
                return Err(EngineError::invalid_schedule(format!(
                    "events must be ordered by date: {} after {prev}",
                    event.date
                )));
            }
        }
        previous_date = Some(event.date);

        if let Some(at) = settled_at {
            return Err(EngineError::invalid_schedule(format!(
                "event on {} follows the early settlement on {at}",
                event.date
            )));
        }
        if event.date <= anchor {
            return Err(EngineError::invalid_schedule(format!(
                "event on {} is not after the accrual start {anchor}",
                event.date
            )));
        }
        if event.date > maturity {
            return Err(EngineError::invalid_schedule(format!(
                "event on {} is after maturity {maturity}",
                event.date
            )));
        }

        let slot = entry_at(&mut timeline, event.date);
        match event.kind {
            EventKind::Prepayment(amount) => timeline[slot].prepayments.push(amount),
            EventKind::EarlySettlement => {
                timeline[slot].settles = true;
                timeline.truncate(slot + 1);
                settled_at = Some(event.date);
            }
        }
    }

    debug!(
        "timeline built: {} entries, {} event(s), anchor {anchor}",
        timeline.len(),
        events.len()
    );

    Ok(timeline)
}

/// Returns the index of the entry at `date`, inserting one if absent.
fn entry_at(timeline: &mut Vec<TimelineEntry>, date: Date) -> usize {
    match timeline.binary_search_by_key(&date, |e| e.date) {
        Ok(idx) => idx,
        Err(idx) => {
            timeline.insert(idx, TimelineEntry::event_only(date));
            idx
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::AmortizationEntry;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    fn three_month_schedule() -> AmortizationSchedule {
        AmortizationSchedule::from_entries(vec![
            AmortizationEntry::anchor(date(2022, 3, 9)),
            AmortizationEntry::new(date(2022, 4, 11), dec!(0.5)),
            AmortizationEntry::new(date(2022, 5, 9), dec!(0.5)),
        ])
        .normalized()
        .unwrap()
    }

    #[test]
    fn test_plain_schedule_passes_through() {
        let timeline = build(&three_month_schedule(), &[]).unwrap();
        assert_eq!(timeline.len(), 3);
        assert!(timeline.iter().all(|e| e.prepayments.is_empty() && !e.settles));
    }

    #[test]
    fn test_prepayment_between_dates_inserts_entry() {
        let events = [ExtraordinaryEvent::prepayment(date(2022, 4, 20), dec!(100))];
        let timeline = build(&three_month_schedule(), &events).unwrap();

        assert_eq!(timeline.len(), 4);
        assert_eq!(timeline[2].date, date(2022, 4, 20));
        assert_eq!(timeline[2].ratio, Decimal::ZERO);
        assert_eq!(timeline[2].prepayments.len(), 1);
    }

    #[test]
    fn test_prepayment_on_scheduled_date_merges() {
        let events = [ExtraordinaryEvent::prepayment(date(2022, 4, 11), dec!(100))];
        let timeline = build(&three_month_schedule(), &events).unwrap();

        assert_eq!(timeline.len(), 3);
        assert_eq!(timeline[1].prepayments.len(), 1);
        assert_eq!(timeline[1].ratio, dec!(0.5));
    }

    #[test]
    fn test_same_date_events_keep_caller_order() {
        let events = [
            ExtraordinaryEvent::prepayment(date(2022, 4, 20), dec!(100)),
            ExtraordinaryEvent::prepayment(date(2022, 4, 20), dec!(200)),
        ];
        let timeline = build(&three_month_schedule(), &events).unwrap();
        let entry = timeline.iter().find(|e| e.date == date(2022, 4, 20)).unwrap();

        assert_eq!(
            entry.prepayments,
            vec![
                PrepaymentAmount::Partial(dec!(100)),
                PrepaymentAmount::Partial(dec!(200))
            ]
        );
    }

    #[test]
    fn test_early_settlement_truncates() {
        let events = [ExtraordinaryEvent::early_settlement(date(2022, 4, 20))];
        let timeline = build(&three_month_schedule(), &events).unwrap();

        assert_eq!(timeline.len(), 3);
        let last = timeline.last().unwrap();
        assert_eq!(last.date, date(2022, 4, 20));
        assert!(last.settles);
    }

    #[test]
    fn test_event_before_anchor_rejected() {
        let events = [ExtraordinaryEvent::prepayment(date(2022, 3, 1), dec!(100))];
        assert!(build(&three_month_schedule(), &events).is_err());
    }

    #[test]
    fn test_event_after_maturity_rejected() {
        let events = [ExtraordinaryEvent::prepayment(date(2022, 6, 1), dec!(100))];
        assert!(build(&three_month_schedule(), &events).is_err());
    }

    #[test]
    fn test_event_after_settlement_rejected() {
        let events = [
            ExtraordinaryEvent::early_settlement(date(2022, 4, 20)),
            ExtraordinaryEvent::prepayment(date(2022, 4, 25), dec!(100)),
        ];
        assert!(build(&three_month_schedule(), &events).is_err());
    }

    #[test]
    fn test_unordered_events_rejected() {
        let events = [
            ExtraordinaryEvent::prepayment(date(2022, 4, 25), dec!(100)),
            ExtraordinaryEvent::prepayment(date(2022, 4, 20), dec!(100)),
        ];
        assert!(build(&three_month_schedule(), &events).is_err());
    }
}
