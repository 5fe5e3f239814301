// src/services/payroll_run.rs
//
// Batch payroll assembly for one closed period. Each employee aggregates
// independently; re-running the same period is idempotent because existing
// records are skipped and inserts are guarded by the (employee, period)
// uniqueness constraint.

use crate::{
    engine::{aggregate_week, assemble, PayPeriod},
    errors::AppResult,
    models::{
        AttendanceRecord, CashAdvanceRequest, Employee, MandatoryDeduction, PayrollRecord,
        PayrollRunReport,
    },
    state::AppState,
};
use tracing::{error, info, warn};

/// Assembles payroll records for every active employee over `period`.
///
/// An employee with an open shift inside the period is excluded from the run
/// and flagged for manual review: their hours are not final, and assembling
/// them would understate the week.
pub async fn generate_for_period(state: &AppState, period: PayPeriod) -> AppResult<PayrollRunReport> {
    info!(
        start = %period.start_date,
        end = %period.end_date,
        "payroll run started"
    );

    let employees = sqlx::query_as::<_, Employee>(
        "SELECT * FROM employees WHERE is_active = TRUE ORDER BY employee_id",
    )
    .fetch_all(&state.db)
    .await?;

    let mandatory = sqlx::query_as::<_, MandatoryDeduction>(
        "SELECT * FROM mandatory_deductions WHERE is_active = TRUE",
    )
    .fetch_all(&state.db)
    .await?;

    let mut report = PayrollRunReport {
        period_start: Some(period.start_date),
        ..PayrollRunReport::default()
    };

    for employee in &employees {
        match assemble_one(state, &period, employee, &mandatory, &mut report).await {
            Ok(()) => {}
            Err(err) => {
                error!(employee_id = %employee.employee_id, %err, "payroll assembly failed");
                report.failed += 1;
            }
        }
    }

    info!(
        generated = report.generated,
        skipped = report.skipped_existing,
        flagged = report.flagged_for_review.len(),
        failed = report.failed,
        "payroll run finished"
    );
    Ok(report)
}

async fn assemble_one(
    state: &AppState,
    period: &PayPeriod,
    employee: &Employee,
    mandatory: &[MandatoryDeduction],
    report: &mut PayrollRunReport,
) -> AppResult<()> {
    let existing: Option<(uuid::Uuid,)> = sqlx::query_as(
        "SELECT id FROM payroll_records WHERE employee_id = $1 AND period_start = $2",
    )
    .bind(&employee.employee_id)
    .bind(period.start_date)
    .fetch_optional(&state.db)
    .await?;

    if existing.is_some() {
        report.skipped_existing += 1;
        return Ok(());
    }

    let records = sqlx::query_as::<_, AttendanceRecord>(
        "SELECT * FROM attendance_records
         WHERE employee_id = $1 AND date >= $2 AND date <= $3",
    )
    .bind(&employee.employee_id)
    .bind(period.start_date)
    .bind(period.end_date)
    .fetch_all(&state.db)
    .await?;

    let has_open_shift = records
        .iter()
        .any(|r| r.time_in.is_some() && r.time_out.is_none());
    if has_open_shift {
        warn!(
            employee_id = %employee.employee_id,
            "open shift at cutoff; excluded from run pending manual review"
        );
        report.flagged_for_review.push(employee.employee_id.clone());
        return Ok(());
    }

    let totals = aggregate_week(period, &records);

    let advances = sqlx::query_as::<_, CashAdvanceRequest>(
        "SELECT * FROM cash_advances
         WHERE employee_id = $1 AND status = 'approved' AND remaining_balance > 0",
    )
    .bind(&employee.employee_id)
    .fetch_all(&state.db)
    .await?;

    let record = assemble(period, &employee.employee_id, &totals, &advances, mandatory);
    insert_payroll_record(state, &record).await?;

    info!(
        employee_id = %employee.employee_id,
        net_salary = %record.net_salary,
        days_worked = %record.days_worked,
        "payroll record generated"
    );
    report.generated += 1;
    Ok(())
}

async fn insert_payroll_record(state: &AppState, record: &PayrollRecord) -> AppResult<()> {
    sqlx::query(
        "INSERT INTO payroll_records (
            id, employee_id, period_start, period_end,
            days_worked, hours_worked, overtime_hours,
            basic_salary, overtime_pay, gross_salary,
            cash_advance_deduction, mandatory_deduction, net_salary,
            status, created_at, updated_at
        ) VALUES ($1,$2,$3,$4,$5,$6,$7,$8,$9,$10,$11,$12,$13,$14,$15,$16)",
    )
    .bind(record.id)
    .bind(&record.employee_id)
    .bind(record.period_start)
    .bind(record.period_end)
    .bind(record.days_worked)
    .bind(record.hours_worked)
    .bind(record.overtime_hours)
    .bind(record.basic_salary)
    .bind(record.overtime_pay)
    .bind(record.gross_salary)
    .bind(record.cash_advance_deduction)
    .bind(record.mandatory_deduction)
    .bind(record.net_salary)
    .bind(record.status)
    .bind(record.created_at)
    .bind(record.updated_at)
    .execute(&state.db)
    .await?;
    Ok(())
}
