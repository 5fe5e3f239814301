// src/engine/clock.rs

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveTime, Utc, Weekday};

/// The single place where UTC instants become business-local time.
///
/// All stored instants are UTC; every local-time decision (the 09:30 late
/// cutoff, the 17:00 overtime gate, the lunch window, Sunday checks) converts
/// through this one fixed offset. The host timezone is never consulted.
#[derive(Debug, Clone, Copy)]
pub struct BusinessClock {
    offset: FixedOffset,
}

impl BusinessClock {
    /// Offset in whole hours east of UTC, e.g. 8 for Asia/Manila.
    pub fn from_offset_hours(hours: i32) -> Option<Self> {
        FixedOffset::east_opt(hours * 3600).map(|offset| Self { offset })
    }

    pub fn local(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        instant.with_timezone(&self.offset)
    }

    pub fn local_date(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.local(instant).date_naive()
    }

    pub fn local_time(&self, instant: DateTime<Utc>) -> NaiveTime {
        self.local(instant).time()
    }

    pub fn is_sunday(&self, instant: DateTime<Utc>) -> bool {
        self.local_date(instant).weekday() == Weekday::Sun
    }

    /// The UTC instant corresponding to a business-local date and time.
    /// Fixed offsets have no gaps, so the conversion always succeeds.
    pub fn to_utc(&self, date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
        date.and_time(time)
            .and_local_timezone(self.offset)
            .unwrap()
            .with_timezone(&Utc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn manila() -> BusinessClock {
        BusinessClock::from_offset_hours(8).unwrap()
    }

    #[test]
    fn converts_utc_to_business_local() {
        // 2025-06-02 00:00 UTC is 08:00 in Manila.
        let instant = Utc.with_ymd_and_hms(2025, 6, 2, 0, 0, 0).unwrap();
        let clock = manila();
        assert_eq!(
            clock.local_time(instant),
            NaiveTime::from_hms_opt(8, 0, 0).unwrap()
        );
        assert_eq!(
            clock.local_date(instant),
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap()
        );
    }

    #[test]
    fn sunday_check_uses_local_date_not_utc() {
        // Saturday 23:00 UTC is already Sunday 07:00 in Manila.
        let instant = Utc.with_ymd_and_hms(2025, 6, 7, 23, 0, 0).unwrap();
        assert!(manila().is_sunday(instant));
    }

    #[test]
    fn rejects_out_of_range_offsets() {
        assert!(BusinessClock::from_offset_hours(26).is_none());
    }
}
