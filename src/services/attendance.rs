// src/services/attendance.rs
//
// Scan workflow: first scan of the day opens the record with a time-in,
// the second scan finalizes it through the classification engine, a third
// scan is a business rejection. Finalization is a conditional update keyed
// on `time_out IS NULL`, so two racing time-out scans cannot both win.

use crate::{
    engine::{classify, day_pay, DayPay},
    errors::{AppError, AppResult},
    models::{
        AttendanceRecord, AutoCloseReport, DayType, Employee, EmployeeRateCard, ScanAction,
        ScanResponse, TimeInStatus,
    },
    state::AppState,
};
use chrono::{DateTime, NaiveTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};
use tracing::{info, warn};
use uuid::Uuid;

/// Shifts left open overnight are closed at this business-local time of the
/// shift's own date, with overtime pay suppressed.
const AUTO_CLOSE_TIME: (u32, u32) = (18, 0);

fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

async fn find_employee(state: &AppState, employee_id: &str) -> AppResult<Employee> {
    sqlx::query_as::<_, Employee>(
        "SELECT * FROM employees WHERE employee_id = $1 AND is_active = TRUE",
    )
    .bind(employee_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::EmployeeNotFound(employee_id.to_string()))
}

/// The rate card in effect today, if any. Missing cards do not block the
/// scan; the day is recorded attendance-only with zero pay.
async fn current_rate_card(
    state: &AppState,
    employee_id: &str,
) -> AppResult<Option<EmployeeRateCard>> {
    let card = sqlx::query_as::<_, EmployeeRateCard>(
        "SELECT * FROM rate_cards
         WHERE employee_id = $1 AND effective_from <= $2
         ORDER BY effective_from DESC
         LIMIT 1",
    )
    .bind(employee_id)
    .bind(state.clock.local_date(Utc::now()))
    .fetch_optional(&state.db)
    .await?;
    Ok(card)
}

/// The record today's scan should finalize. `None` means no record exists
/// yet and the scan opens a new shift; a record that already has both scans
/// is a business rejection, left untouched.
fn shift_to_finalize(
    existing: Option<AttendanceRecord>,
) -> AppResult<Option<AttendanceRecord>> {
    match existing {
        Some(record) if record.time_out.is_some() => Err(AppError::AlreadyCompleted),
        other => Ok(other),
    }
}

/// Maps the conditional finalize update's row back to a result. Zero rows
/// means a concurrent scan finalized the record first.
fn require_finalized(updated: Option<AttendanceRecord>) -> AppResult<AttendanceRecord> {
    updated.ok_or(AppError::AlreadyCompleted)
}

/// Handles one fingerprint scan for an employee at the current instant.
pub async fn record_scan(state: &AppState, employee_id: &str) -> AppResult<ScanResponse> {
    let clock = state.clock;
    let now = Utc::now();

    if clock.is_sunday(now) {
        return Err(AppError::Validation(
            "Attendance is not recorded on Sunday; the work week is Monday-Saturday".to_string(),
        ));
    }

    let employee = find_employee(state, employee_id).await?;
    let today = clock.local_date(now);

    let existing = sqlx::query_as::<_, AttendanceRecord>(
        "SELECT * FROM attendance_records WHERE employee_id = $1 AND date = $2",
    )
    .bind(&employee.employee_id)
    .bind(today)
    .fetch_optional(&state.db)
    .await?;

    match shift_to_finalize(existing)? {
        None => open_shift(state, &employee, now).await,
        Some(record) => finalize_shift(state, record, now, false).await,
    }
}

/// First scan: insert the open record with its time-in.
async fn open_shift(
    state: &AppState,
    employee: &Employee,
    now: DateTime<Utc>,
) -> AppResult<ScanResponse> {
    let clock = state.clock;
    // Classifying with no time-out yields Incomplete plus the lateness
    // verdict, which drives the real-time warning on the scanner display.
    let classification = classify(&clock, now, None, false)?;

    let record = sqlx::query_as::<_, AttendanceRecord>(
        "INSERT INTO attendance_records
            (id, employee_id, date, time_in, day_type, time_in_status, validation_reason)
         VALUES ($1, $2, $3, $4, $5, $6, $7)
         RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(&employee.employee_id)
    .bind(clock.local_date(now))
    .bind(now)
    .bind(DayType::Incomplete)
    .bind(classification.time_in_status)
    .bind(&classification.reason)
    .fetch_one(&state.db)
    .await?;

    let message = match classification.time_in_status {
        TimeInStatus::OnTime => "Time-in recorded. Have a good shift.".to_string(),
        TimeInStatus::Late => {
            "Arrived after 9:30 AM; the day will be paid as a half day if at least \
             4 hours are worked."
                .to_string()
        }
    };

    info!(
        employee_id = %employee.employee_id,
        status = ?classification.time_in_status,
        "time-in recorded"
    );

    Ok(ScanResponse {
        action: ScanAction::TimeIn,
        message,
        record,
    })
}

/// Second scan: classify, price, and finalize atomically.
async fn finalize_shift(
    state: &AppState,
    record: AttendanceRecord,
    time_out: DateTime<Utc>,
    auto_closed: bool,
) -> AppResult<ScanResponse> {
    let clock = state.clock;
    let time_in = record
        .time_in
        .ok_or_else(|| AppError::Internal(format!("attendance record {} has no time-in", record.id)))?;

    let classification = classify(&clock, time_in, Some(time_out), auto_closed)?;

    let rate_card = current_rate_card(state, &record.employee_id).await?;
    let (pay, reason) = match &rate_card {
        Some(rates) => (
            day_pay(&classification, rates, state.config.half_day_proration),
            classification.reason.clone(),
        ),
        None => {
            warn!(
                employee_id = %record.employee_id,
                "no rate card configured; recording attendance with zero pay"
            );
            (
                DayPay::zero(),
                format!(
                    "{}; no rate card configured, recorded attendance-only pending admin correction",
                    classification.reason
                ),
            )
        }
    };

    let updated = sqlx::query_as::<_, AttendanceRecord>(
        "UPDATE attendance_records SET
            time_out = $2,
            day_type = $3,
            time_in_status = $4,
            actual_hours_worked = $5,
            overtime_hours = $6,
            day_salary = $7,
            overtime_pay = $8,
            total_pay = $9,
            is_valid_day = $10,
            auto_closed = $11,
            validation_reason = $12,
            updated_at = NOW()
         WHERE id = $1 AND time_out IS NULL
         RETURNING *",
    )
    .bind(record.id)
    .bind(time_out)
    .bind(classification.day_type)
    .bind(classification.time_in_status)
    .bind(round2(classification.worked_hours))
    .bind(pay.overtime_hours)
    .bind(pay.day_salary)
    .bind(pay.overtime_pay)
    .bind(pay.total_pay)
    .bind(classification.day_type.is_valid_day())
    .bind(auto_closed)
    .bind(&reason)
    .fetch_optional(&state.db)
    .await?;
    let updated = require_finalized(updated)?;

    info!(
        employee_id = %updated.employee_id,
        day_type = ?updated.day_type,
        hours = %updated.actual_hours_worked,
        total_pay = %updated.total_pay,
        "time-out recorded"
    );

    Ok(ScanResponse {
        action: ScanAction::TimeOut,
        message: format!(
            "Time-out recorded: {:?}, {} hours, total pay {}",
            updated.day_type, updated.actual_hours_worked, updated.total_pay
        ),
        record: updated,
    })
}

/// End-of-day sweep: closes every open shift dated before today at 18:00 of
/// its own date. Auto-closed shifts never earn overtime pay.
pub async fn auto_close_open_shifts(state: &AppState) -> AppResult<AutoCloseReport> {
    let clock = state.clock;
    let today = clock.local_date(Utc::now());

    let open_shifts = sqlx::query_as::<_, AttendanceRecord>(
        "SELECT * FROM attendance_records
         WHERE time_in IS NOT NULL AND time_out IS NULL AND date < $1",
    )
    .bind(today)
    .fetch_all(&state.db)
    .await?;

    let mut report = AutoCloseReport { closed: 0, failed: 0 };
    let close_time = NaiveTime::from_hms_opt(AUTO_CLOSE_TIME.0, AUTO_CLOSE_TIME.1, 0)
        .expect("valid auto-close time");

    for shift in open_shifts {
        let time_out = clock.to_utc(shift.date, close_time);
        let employee_id = shift.employee_id.clone();
        match finalize_shift(state, shift, time_out, true).await {
            Ok(_) => report.closed += 1,
            Err(err) => {
                // A time-in after 18:00 cannot be closed at the standard
                // time; leave it for manual correction.
                warn!(employee_id = %employee_id, %err, "auto-close failed");
                report.failed += 1;
            }
        }
    }

    info!(closed = report.closed, failed = report.failed, "auto-close sweep finished");
    Ok(report)
}
