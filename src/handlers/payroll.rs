// src/handlers/payroll.rs

use crate::{
    engine::{transition_status, PayPeriod},
    errors::{AppError, AppResult},
    models::{PayrollQuery, PayrollRecord, PayrollRunReport, RunPayrollRequest, TransitionRequest},
    services::payroll_run::generate_for_period,
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use chrono::Utc;
use tracing::info;
use uuid::Uuid;

/// Assemble payroll for a closed period, one record per active employee.
/// Re-running is idempotent: existing records are skipped.
#[utoipa::path(
    post,
    path = "/api/v1/payroll/run",
    request_body = RunPayrollRequest,
    responses(
        (status = 200, description = "Run report", body = PayrollRunReport),
        (status = 400, description = "Period is not a Monday-start week or has not closed yet"),
    ),
    tag = "Payroll"
)]
pub async fn run_payroll(
    State(state): State<AppState>,
    Json(body): Json<RunPayrollRequest>,
) -> AppResult<Json<PayrollRunReport>> {
    let today = state.clock.local_date(Utc::now());

    let period = match body.period_start {
        Some(start) => PayPeriod::new(start)?,
        None => PayPeriod::last_closed(today),
    };

    // Assembly only runs once the Sunday cutoff has passed.
    if today < period.cutoff_date {
        return Err(AppError::Validation(format!(
            "Pay period {} to {} has not reached its cutoff yet",
            period.start_date, period.end_date
        )));
    }

    let report = generate_for_period(&state, period).await?;
    Ok(Json(report))
}

/// List payroll records, optionally filtered by employee and period.
#[utoipa::path(
    get,
    path = "/api/v1/payroll",
    params(PayrollQuery),
    responses((status = 200, description = "Payroll records", body = Vec<PayrollRecord>)),
    tag = "Payroll"
)]
pub async fn list_payroll(
    State(state): State<AppState>,
    Query(query): Query<PayrollQuery>,
) -> AppResult<Json<Vec<PayrollRecord>>> {
    let records = sqlx::query_as::<_, PayrollRecord>(
        "SELECT * FROM payroll_records
         WHERE ($1::text IS NULL OR employee_id = $1)
           AND ($2::date IS NULL OR period_start = $2)
         ORDER BY period_start DESC, employee_id",
    )
    .bind(query.employee_id)
    .bind(query.period_start)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(records))
}

/// Fetch one payroll record.
#[utoipa::path(
    get,
    path = "/api/v1/payroll/{payroll_id}",
    params(("payroll_id" = Uuid, Path, description = "Payroll record ID")),
    responses(
        (status = 200, description = "Payroll record", body = PayrollRecord),
        (status = 404, description = "Record not found"),
    ),
    tag = "Payroll"
)]
pub async fn get_payroll(
    State(state): State<AppState>,
    Path(payroll_id): Path<Uuid>,
) -> AppResult<Json<PayrollRecord>> {
    let record = sqlx::query_as::<_, PayrollRecord>(
        "SELECT * FROM payroll_records WHERE id = $1",
    )
    .bind(payroll_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Payroll record {payroll_id} not found")))?;

    Ok(Json(record))
}

/// Advance a payroll record one step through its status machine:
/// Pending → Processed → Approved → Paid. Marking a record Paid settles the
/// cash advances that were deducted from it.
#[utoipa::path(
    patch,
    path = "/api/v1/payroll/{payroll_id}/status",
    params(("payroll_id" = Uuid, Path, description = "Payroll record ID")),
    request_body = TransitionRequest,
    responses(
        (status = 200, description = "Status advanced", body = PayrollRecord),
        (status = 404, description = "Record not found"),
        (status = 422, description = "Transition would skip or reverse a step"),
    ),
    tag = "Payroll"
)]
pub async fn transition_payroll(
    State(state): State<AppState>,
    Path(payroll_id): Path<Uuid>,
    Json(body): Json<TransitionRequest>,
) -> AppResult<Json<PayrollRecord>> {
    let record = sqlx::query_as::<_, PayrollRecord>(
        "SELECT * FROM payroll_records WHERE id = $1",
    )
    .bind(payroll_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::NotFound(format!("Payroll record {payroll_id} not found")))?;

    let next = transition_status(record.status, body.status)?;

    // Conditional on the old status: a concurrent transition loses cleanly.
    let updated = sqlx::query_as::<_, PayrollRecord>(
        "UPDATE payroll_records SET status = $3, updated_at = NOW()
         WHERE id = $1 AND status = $2
         RETURNING *",
    )
    .bind(payroll_id)
    .bind(record.status)
    .bind(next)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::Conflict("Payroll status changed concurrently".to_string()))?;

    info!(
        payroll_id = %payroll_id,
        employee_id = %updated.employee_id,
        from = ?record.status,
        to = ?updated.status,
        "payroll status advanced"
    );

    if updated.status == crate::models::PayrollStatus::Paid {
        settle_period_advances(&state, &updated).await?;
    }

    Ok(Json(updated))
}

/// Once wages are paid out, the advances deducted from them are settled.
async fn settle_period_advances(state: &AppState, record: &PayrollRecord) -> AppResult<()> {
    let result = sqlx::query(
        "UPDATE cash_advances
         SET remaining_balance = 0, status = 'paid', updated_at = NOW()
         WHERE employee_id = $1
           AND status = 'approved'
           AND remaining_balance > 0
           AND request_date >= $2 AND request_date <= $3",
    )
    .bind(&record.employee_id)
    .bind(record.period_start)
    .bind(record.period_end)
    .execute(&state.db)
    .await?;

    if result.rows_affected() > 0 {
        info!(
            employee_id = %record.employee_id,
            settled = result.rows_affected(),
            "cash advances settled against paid payroll"
        );
    }
    Ok(())
}
