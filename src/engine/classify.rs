// src/engine/classify.rs

use super::{clock::BusinessClock, time_window::worked_hours, EngineError};
use crate::models::{DayType, TimeInStatus};
use chrono::{DateTime, Timelike, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Arrivals after 09:30 business-local are late.
const LATE_CUTOFF_SECS: u32 = 9 * 3600 + 30 * 60;
/// Overtime pay requires a manual time-out at or after 17:00 business-local.
const OVERTIME_EARLIEST_OUT_SECS: u32 = 17 * 3600;

/// Minimum hours for any paid day.
pub const HALF_DAY_MIN_HOURS: Decimal = dec!(4);
/// At or above this, a day is a full day.
pub const FULL_DAY_MIN_HOURS: Decimal = dec!(6.5);
/// The standard working day; hours beyond it are overtime candidates.
pub const STANDARD_DAY_HOURS: Decimal = dec!(8);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayClassification {
    pub day_type: DayType,
    pub time_in_status: TimeInStatus,
    /// Lunch-adjusted hours; zero for an open shift.
    pub worked_hours: Decimal,
    pub reason: String,
}

/// Applies the ordered day-type rules to one attendance pair.
///
/// Rule order is fixed: lateness is decided from the time-in alone, then the
/// hour buckets decide the day type (< 4 invalid, < 6.5 half, ≤ 8 full,
/// > 8 overtime). Boundary hours fall into the lower bucket. Hours beyond 8
/// only count as overtime when the shift was closed manually at or after
/// 17:00; otherwise the day stays a full day and the excess is unpaid.
pub fn classify(
    clock: &BusinessClock,
    time_in: DateTime<Utc>,
    time_out: Option<DateTime<Utc>>,
    auto_closed: bool,
) -> Result<DayClassification, EngineError> {
    let time_in_status = if clock.local_time(time_in).num_seconds_from_midnight() > LATE_CUTOFF_SECS
    {
        TimeInStatus::Late
    } else {
        TimeInStatus::OnTime
    };

    let Some(time_out) = time_out else {
        return Ok(DayClassification {
            day_type: DayType::Incomplete,
            time_in_status,
            worked_hours: Decimal::ZERO,
            reason: "No time-out recorded; shift still open".to_string(),
        });
    };

    let hours = worked_hours(clock, time_in, time_out)?;

    if hours < HALF_DAY_MIN_HOURS {
        return Ok(DayClassification {
            day_type: DayType::Invalid,
            time_in_status,
            worked_hours: hours,
            reason: format!(
                "Insufficient hours worked ({:.2} hours, minimum {} required)",
                hours, HALF_DAY_MIN_HOURS
            ),
        });
    }

    if hours < FULL_DAY_MIN_HOURS {
        return Ok(DayClassification {
            day_type: DayType::HalfDay,
            time_in_status,
            worked_hours: hours,
            reason: match time_in_status {
                TimeInStatus::Late => {
                    "Arrived after 9:30 AM and worked under 6.5 hours".to_string()
                }
                TimeInStatus::OnTime => "Worked under 6.5 hours".to_string(),
            },
        });
    }

    if hours <= STANDARD_DAY_HOURS {
        return Ok(DayClassification {
            day_type: DayType::FullDay,
            time_in_status,
            worked_hours: hours,
            reason: "Worked a standard full day".to_string(),
        });
    }

    // Beyond 8 hours: overtime only for a manual time-out at or after 17:00.
    let out_secs = clock.local_time(time_out).num_seconds_from_midnight();
    if auto_closed {
        Ok(DayClassification {
            day_type: DayType::FullDay,
            time_in_status,
            worked_hours: hours,
            reason: "Auto-closed shift; excess hours not payable as overtime".to_string(),
        })
    } else if out_secs >= OVERTIME_EARLIEST_OUT_SECS {
        Ok(DayClassification {
            day_type: DayType::Overtime,
            time_in_status,
            worked_hours: hours,
            reason: "Manual time-out after 5:00 PM with more than 8 hours worked".to_string(),
        })
    } else {
        Ok(DayClassification {
            day_type: DayType::FullDay,
            time_in_status,
            worked_hours: hours,
            reason: "Time-out before 5:00 PM; excess hours not payable as overtime".to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveTime};

    fn clock() -> BusinessClock {
        BusinessClock::from_offset_hours(8).unwrap()
    }

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        clock().to_utc(
            NaiveDate::from_ymd_opt(2025, 6, 2).unwrap(),
            NaiveTime::from_hms_opt(h, m, 0).unwrap(),
        )
    }

    fn classify_at(
        in_hm: (u32, u32),
        out_hm: (u32, u32),
        auto_closed: bool,
    ) -> DayClassification {
        classify(
            &clock(),
            at(in_hm.0, in_hm.1),
            Some(at(out_hm.0, out_hm.1)),
            auto_closed,
        )
        .unwrap()
    }

    #[test]
    fn open_shift_is_incomplete() {
        let c = classify(&clock(), at(8, 0), None, false).unwrap();
        assert_eq!(c.day_type, DayType::Incomplete);
        assert_eq!(c.worked_hours, Decimal::ZERO);
    }

    #[test]
    fn nine_thirty_exactly_is_on_time() {
        let c = classify_at((9, 30), (17, 0), false);
        assert_eq!(c.time_in_status, TimeInStatus::OnTime);
    }

    #[test]
    fn nine_thirty_one_is_late() {
        let c = classify_at((9, 31), (17, 0), false);
        assert_eq!(c.time_in_status, TimeInStatus::Late);
    }

    #[test]
    fn under_four_hours_is_invalid_even_when_on_time() {
        let c = classify_at((8, 0), (11, 0), false);
        assert_eq!(c.day_type, DayType::Invalid);
        assert_eq!(c.time_in_status, TimeInStatus::OnTime);
    }

    #[test]
    fn exactly_four_hours_is_a_half_day() {
        // 08:00–12:00 avoids lunch entirely.
        let c = classify_at((8, 0), (12, 0), false);
        assert_eq!(c.day_type, DayType::HalfDay);
        assert_eq!(c.worked_hours, dec!(4));
    }

    #[test]
    fn late_arrival_working_into_evening_is_a_half_day() {
        // 09:31–17:00 nets about 6.48 hours, under the 6.5 full-day floor.
        let c = classify_at((9, 31), (17, 0), false);
        assert_eq!(c.day_type, DayType::HalfDay);
        assert_eq!(c.time_in_status, TimeInStatus::Late);
    }

    #[test]
    fn six_and_a_half_hours_is_a_full_day() {
        // 09:30–17:00 nets exactly 6.5.
        let c = classify_at((9, 30), (17, 0), false);
        assert_eq!(c.day_type, DayType::FullDay);
        assert_eq!(c.worked_hours, dec!(6.5));
    }

    #[test]
    fn exactly_eight_hours_is_a_full_day_not_overtime() {
        let c = classify_at((8, 0), (17, 0), false);
        assert_eq!(c.day_type, DayType::FullDay);
        assert_eq!(c.worked_hours, dec!(8));
    }

    #[test]
    fn long_shift_with_evening_timeout_is_overtime() {
        let c = classify_at((8, 0), (19, 0), false);
        assert_eq!(c.day_type, DayType::Overtime);
        assert_eq!(c.worked_hours, dec!(10));
    }

    #[test]
    fn long_shift_ending_before_five_pm_stays_a_full_day() {
        // 06:00–16:00 nets 9 hours but the 16:00 time-out blocks overtime.
        let c = classify_at((6, 0), (16, 0), false);
        assert_eq!(c.day_type, DayType::FullDay);
        assert_eq!(c.worked_hours, dec!(9));
    }

    #[test]
    fn auto_closed_long_shift_never_earns_overtime() {
        let c = classify_at((8, 0), (19, 0), true);
        assert_eq!(c.day_type, DayType::FullDay);
    }

    #[test]
    fn reversed_scan_propagates_invalid_interval() {
        let err = classify(&clock(), at(17, 0), Some(at(8, 0)), false).unwrap_err();
        assert!(matches!(err, EngineError::InvalidInterval { .. }));
    }
}
