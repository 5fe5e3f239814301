// src/engine/aggregate.rs

use super::period::PayPeriod;
use crate::models::{AttendanceRecord, DayType};
use rust_decimal::Decimal;

/// Monday–Saturday totals for one employee.
///
/// Pay fields sum only valid days (half/full/overtime); invalid and
/// incomplete days are counted for attendance reporting but contribute
/// nothing to pay or hours.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeeklyTotals {
    /// Full-day equivalents: full/overtime 1.0, half 0.5.
    pub days_worked: Decimal,
    pub hours_worked: Decimal,
    /// Hours beyond the 8-hour day, including unpaid excess on capped full
    /// days (pre-17:00 or auto-closed time-outs). A reporting figure: pay
    /// comes only from `overtime_pay`.
    pub overtime_hours: Decimal,
    pub basic_salary: Decimal,
    pub overtime_pay: Decimal,
    pub full_days: u32,
    pub half_days: u32,
    pub overtime_days: u32,
    pub invalid_days: u32,
    pub incomplete_days: u32,
}

impl WeeklyTotals {
    pub fn gross(&self) -> Decimal {
        self.basic_salary + self.overtime_pay
    }
}

/// Sums classified records over one pay period.
///
/// The date filter is defensive: records outside [start, end] and any
/// Sunday-dated record are dropped here regardless of how they got into
/// storage, rather than trusting the caller's query.
pub fn aggregate_week(period: &PayPeriod, records: &[AttendanceRecord]) -> WeeklyTotals {
    let mut totals = WeeklyTotals::default();

    for record in records {
        if !period.contains(record.date) {
            continue;
        }

        match record.day_type {
            DayType::FullDay => totals.full_days += 1,
            DayType::HalfDay => totals.half_days += 1,
            DayType::Overtime => totals.overtime_days += 1,
            DayType::Invalid => totals.invalid_days += 1,
            DayType::Incomplete => totals.incomplete_days += 1,
        }

        if !record.day_type.is_valid_day() {
            continue;
        }

        totals.days_worked += record.day_type.day_credit();
        totals.hours_worked += record.actual_hours_worked;
        totals.overtime_hours += record.overtime_hours;
        totals.basic_salary += record.day_salary;
        totals.overtime_pay += record.overtime_pay;
    }

    totals
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TimeInStatus;
    use chrono::{NaiveDate, Utc};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, day).unwrap()
    }

    fn record(date: NaiveDate, day_type: DayType, hours: Decimal, salary: Decimal) -> AttendanceRecord {
        AttendanceRecord {
            id: Uuid::new_v4(),
            employee_id: "EMP-001".to_string(),
            date,
            time_in: None,
            time_out: None,
            day_type,
            time_in_status: Some(TimeInStatus::OnTime),
            actual_hours_worked: hours,
            overtime_hours: Decimal::ZERO,
            day_salary: salary,
            overtime_pay: Decimal::ZERO,
            total_pay: salary,
            is_valid_day: day_type.is_valid_day(),
            auto_closed: false,
            validation_reason: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    // Week of Monday 2025-06-02 through Saturday 2025-06-07.
    fn period() -> PayPeriod {
        PayPeriod::new(d(2)).unwrap()
    }

    #[test]
    fn sums_day_credits_hours_and_pay() {
        let records = vec![
            record(d(2), DayType::FullDay, dec!(8), dec!(550.00)),
            record(d(3), DayType::HalfDay, dec!(5), dec!(275.00)),
            record(d(4), DayType::FullDay, dec!(7.5), dec!(550.00)),
        ];
        let totals = aggregate_week(&period(), &records);
        assert_eq!(totals.days_worked, dec!(2.5));
        assert_eq!(totals.hours_worked, dec!(20.5));
        assert_eq!(totals.basic_salary, dec!(1375.00));
        assert_eq!(totals.full_days, 2);
        assert_eq!(totals.half_days, 1);
    }

    #[test]
    fn overtime_day_counts_one_full_day_plus_separate_hours() {
        let mut ot = record(d(5), DayType::Overtime, dec!(10), dec!(550.00));
        ot.overtime_hours = dec!(2.00);
        ot.overtime_pay = dec!(171.88);
        let totals = aggregate_week(&period(), &[ot]);
        assert_eq!(totals.days_worked, dec!(1));
        assert_eq!(totals.overtime_hours, dec!(2.00));
        assert_eq!(totals.overtime_pay, dec!(171.88));
        assert_eq!(totals.gross(), dec!(721.88));
    }

    #[test]
    fn capped_full_day_reports_excess_hours_without_pay() {
        // A 9-hour shift closed before 17:00 stays a full day: the excess
        // hour shows in the totals but never in the money columns.
        let mut capped = record(d(5), DayType::FullDay, dec!(9), dec!(550.00));
        capped.overtime_hours = dec!(1.00);
        let totals = aggregate_week(&period(), &[capped]);
        assert_eq!(totals.overtime_hours, dec!(1.00));
        assert_eq!(totals.overtime_pay, Decimal::ZERO);
        assert_eq!(totals.gross(), totals.basic_salary);
    }

    #[test]
    fn invalid_and_incomplete_days_count_for_reporting_only() {
        let records = vec![
            record(d(2), DayType::Invalid, dec!(2), Decimal::ZERO),
            record(d(3), DayType::Incomplete, Decimal::ZERO, Decimal::ZERO),
        ];
        let totals = aggregate_week(&period(), &records);
        assert_eq!(totals.days_worked, Decimal::ZERO);
        assert_eq!(totals.basic_salary, Decimal::ZERO);
        assert_eq!(totals.invalid_days, 1);
        assert_eq!(totals.incomplete_days, 1);
    }

    #[test]
    fn stray_sunday_record_is_excluded() {
        // 2025-06-08 is the cutoff Sunday; a record slipped into storage
        // anyway and must not reach the totals.
        let records = vec![
            record(d(7), DayType::FullDay, dec!(8), dec!(550.00)),
            record(d(8), DayType::FullDay, dec!(8), dec!(550.00)),
        ];
        let totals = aggregate_week(&period(), &records);
        assert_eq!(totals.days_worked, dec!(1));
        assert_eq!(totals.basic_salary, dec!(550.00));
    }

    #[test]
    fn records_outside_the_period_are_excluded() {
        let records = vec![
            record(d(1), DayType::FullDay, dec!(8), dec!(550.00)),
            record(d(9), DayType::FullDay, dec!(8), dec!(550.00)),
        ];
        let totals = aggregate_week(&period(), &records);
        assert_eq!(totals, WeeklyTotals::default());
    }
}
