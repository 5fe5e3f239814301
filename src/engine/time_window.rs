// src/engine/time_window.rs

use super::{clock::BusinessClock, EngineError};
use chrono::{DateTime, Timelike, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Lunch window, business-local seconds-of-day: [12:00, 13:00).
const LUNCH_START_SECS: i64 = 12 * 3600;
const LUNCH_END_SECS: i64 = 13 * 3600;

/// Hours worked between two instants on the same business day, with the
/// overlap between the work interval and the fixed lunch window deducted.
///
/// Intervals that do not touch the lunch window lose nothing; an interval
/// lying entirely inside it nets to zero. A time-out at or before time-in is
/// a caller error surfaced as [`EngineError::InvalidInterval`].
pub fn worked_hours(
    clock: &BusinessClock,
    time_in: DateTime<Utc>,
    time_out: DateTime<Utc>,
) -> Result<Decimal, EngineError> {
    if time_out <= time_in {
        return Err(EngineError::InvalidInterval { time_in, time_out });
    }

    let total_secs = (time_out - time_in).num_seconds();
    let in_secs = i64::from(clock.local_time(time_in).num_seconds_from_midnight());
    let out_secs = in_secs + total_secs;

    let overlap = (out_secs.min(LUNCH_END_SECS) - in_secs.max(LUNCH_START_SECS)).max(0);
    let net_secs = (total_secs - overlap).max(0);

    Ok(Decimal::from(net_secs) / dec!(3600))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn clock() -> BusinessClock {
        BusinessClock::from_offset_hours(8).unwrap()
    }

    /// A UTC instant whose business-local clock reads `h:m` on 2025-06-02.
    fn at(h: u32, m: u32) -> DateTime<Utc> {
        clock().to_utc(
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            NaiveTime::from_hms_opt(h, m, 0).unwrap(),
        )
    }

    #[test]
    fn full_shift_loses_exactly_the_lunch_hour() {
        // 08:00–17:00 is nine hours on the clock, eight paid.
        let hours = worked_hours(&clock(), at(8, 0), at(17, 0)).unwrap();
        assert_eq!(hours, dec!(8));
    }

    #[test]
    fn interval_outside_lunch_is_untouched() {
        let morning = worked_hours(&clock(), at(8, 0), at(11, 30)).unwrap();
        assert_eq!(morning, dec!(3.5));
        let afternoon = worked_hours(&clock(), at(13, 0), at(17, 0)).unwrap();
        assert_eq!(afternoon, dec!(4));
    }

    #[test]
    fn partial_overlap_deducts_only_the_overlap() {
        // 08:00–12:30 overlaps the window by 30 minutes.
        let hours = worked_hours(&clock(), at(8, 0), at(12, 30)).unwrap();
        assert_eq!(hours, dec!(4));
    }

    #[test]
    fn interval_inside_lunch_nets_to_zero() {
        let hours = worked_hours(&clock(), at(12, 10), at(12, 50)).unwrap();
        assert_eq!(hours, dec!(0));
    }

    #[test]
    fn late_arrival_shift_matches_expected_hours() {
        // 09:31–17:00 minus lunch = 6h29m.
        let hours = worked_hours(&clock(), at(9, 31), at(17, 0)).unwrap();
        assert_eq!(hours.round_dp(3), dec!(6.483));
    }

    #[test]
    fn reversed_interval_is_rejected() {
        let err = worked_hours(&clock(), at(17, 0), at(8, 0)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInterval { .. }));
    }

    #[test]
    fn zero_length_interval_is_rejected() {
        let err = worked_hours(&clock(), at(8, 0), at(8, 0)).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInterval { .. }));
    }
}
