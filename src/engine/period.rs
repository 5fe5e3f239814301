// src/engine/period.rs

use super::EngineError;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::Serialize;
use utoipa::ToSchema;

/// A Monday–Saturday pay period. Sunday is the cutoff day and never a member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct PayPeriod {
    /// Monday.
    pub start_date: NaiveDate,
    /// Saturday (= start + 5 days).
    pub end_date: NaiveDate,
    /// The following Sunday (= end + 1 day).
    pub cutoff_date: NaiveDate,
}

impl PayPeriod {
    pub fn new(start_date: NaiveDate) -> Result<Self, EngineError> {
        if start_date.weekday() != Weekday::Mon {
            return Err(EngineError::PeriodNotMonday { date: start_date });
        }
        Ok(Self {
            start_date,
            end_date: start_date + Days::new(5),
            cutoff_date: start_date + Days::new(6),
        })
    }

    /// The period a business-local date belongs to. A Sunday maps to the
    /// period that just ended (it is that period's cutoff day).
    pub fn containing(date: NaiveDate) -> Self {
        let days_from_monday = date.weekday().num_days_from_monday() as u64;
        let monday = date - Days::new(days_from_monday);
        // monday is a Monday by construction
        Self::new(monday).expect("weekday arithmetic produced a non-Monday")
    }

    /// The most recent period whose Sunday cutoff has already passed,
    /// relative to a business-local date.
    pub fn last_closed(today: NaiveDate) -> Self {
        let current = Self::containing(today);
        if today >= current.cutoff_date {
            current
        } else {
            Self::containing(current.start_date - Days::new(7))
        }
    }

    /// Membership test used by the aggregator's defensive filter. A Sunday is
    /// never a member even when the range arithmetic would admit it.
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date && date.weekday() != Weekday::Sun
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn period_spans_monday_to_saturday_with_sunday_cutoff() {
        let period = PayPeriod::new(d(2025, 6, 2)).unwrap();
        assert_eq!(period.end_date, d(2025, 6, 7));
        assert_eq!(period.cutoff_date, d(2025, 6, 8));
    }

    #[test]
    fn rejects_non_monday_start() {
        assert_eq!(
            PayPeriod::new(d(2025, 6, 3)),
            Err(EngineError::PeriodNotMonday {
                date: d(2025, 6, 3)
            })
        );
    }

    #[test]
    fn containing_maps_every_weekday_to_its_monday() {
        let monday = d(2025, 6, 2);
        for offset in 0..6 {
            let date = monday + Days::new(offset);
            assert_eq!(PayPeriod::containing(date).start_date, monday);
        }
        // Sunday belongs to the week it closes.
        assert_eq!(PayPeriod::containing(d(2025, 6, 8)).start_date, monday);
    }

    #[test]
    fn last_closed_rolls_back_while_period_is_open() {
        // Wednesday mid-period: the previous week is the last closed one.
        assert_eq!(
            PayPeriod::last_closed(d(2025, 6, 4)).start_date,
            d(2025, 5, 26)
        );
        // On the cutoff Sunday the current week has closed.
        assert_eq!(
            PayPeriod::last_closed(d(2025, 6, 8)).start_date,
            d(2025, 6, 2)
        );
    }

    #[test]
    fn contains_excludes_sundays_and_out_of_range_dates() {
        let period = PayPeriod::new(d(2025, 6, 2)).unwrap();
        assert!(period.contains(d(2025, 6, 2)));
        assert!(period.contains(d(2025, 6, 7)));
        assert!(!period.contains(d(2025, 6, 8)));
        assert!(!period.contains(d(2025, 6, 1)));
        assert!(!period.contains(d(2025, 6, 9)));
    }
}
