// src/handlers/advances.rs

use crate::{
    engine::{aggregate_week, advance::evaluate, AdvanceContext, PayPeriod},
    errors::{AppError, AppResult},
    models::{
        AttendanceRecord, CashAdvanceRequest, CashAdvanceStatus, CreateAdvanceRequest,
        DecideAdvanceRequest, EmployeeRateCard,
    },
    state::AppState,
};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use chrono::Utc;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

/// Request a cash advance against wages earned in the current, open period.
///
/// The eligibility gate runs here, at request time, against the in-progress
/// week — not as part of any payroll run. Approval creates a Pending request
/// that still needs an admin decision.
#[utoipa::path(
    post,
    path = "/api/v1/cash-advances",
    request_body = CreateAdvanceRequest,
    responses(
        (status = 201, description = "Pending request created", body = CashAdvanceRequest),
        (status = 404, description = "Unknown employee"),
        (status = 422, description = "Rejected, with a structured reason"),
    ),
    tag = "Cash Advances"
)]
pub async fn request_advance(
    State(state): State<AppState>,
    Json(body): Json<CreateAdvanceRequest>,
) -> AppResult<(StatusCode, Json<CashAdvanceRequest>)> {
    if body.amount <= Decimal::ZERO {
        return Err(AppError::Validation(
            "Cash advance amount must be positive".to_string(),
        ));
    }

    let employee_exists: Option<(Uuid,)> = sqlx::query_as(
        "SELECT id FROM employees WHERE employee_id = $1 AND is_active = TRUE",
    )
    .bind(&body.employee_id)
    .fetch_optional(&state.db)
    .await?;
    if employee_exists.is_none() {
        return Err(AppError::EmployeeNotFound(body.employee_id));
    }

    let rates = sqlx::query_as::<_, EmployeeRateCard>(
        "SELECT * FROM rate_cards WHERE employee_id = $1
         ORDER BY effective_from DESC LIMIT 1",
    )
    .bind(&body.employee_id)
    .fetch_optional(&state.db)
    .await?
    .ok_or_else(|| AppError::RateCardMissing(body.employee_id.clone()))?;

    let today = state.clock.local_date(Utc::now());

    let (has_pending,): (bool,) = sqlx::query_as(
        "SELECT EXISTS(SELECT 1 FROM cash_advances WHERE employee_id = $1 AND status = 'pending')",
    )
    .bind(&body.employee_id)
    .fetch_one(&state.db)
    .await?;

    let (outstanding,): (Decimal,) = sqlx::query_as(
        "SELECT COALESCE(SUM(remaining_balance), 0) FROM cash_advances
         WHERE employee_id = $1 AND status = 'approved'",
    )
    .bind(&body.employee_id)
    .fetch_one(&state.db)
    .await?;

    // Classified attendance for the current, in-progress week.
    let period = PayPeriod::containing(today);
    let records = sqlx::query_as::<_, AttendanceRecord>(
        "SELECT * FROM attendance_records
         WHERE employee_id = $1 AND date >= $2 AND date <= $3",
    )
    .bind(&body.employee_id)
    .bind(period.start_date)
    .bind(period.end_date)
    .fetch_all(&state.db)
    .await?;
    let week_so_far = aggregate_week(&period, &records);

    let ctx = AdvanceContext {
        request_date: today,
        has_pending,
        outstanding_balance: outstanding,
        week_so_far: &week_so_far,
        rates: &rates,
    };
    evaluate(body.amount, &ctx, &state.advance_policy).map_err(AppError::AdvanceRejected)?;

    let request = sqlx::query_as::<_, CashAdvanceRequest>(
        "INSERT INTO cash_advances
            (id, employee_id, amount, remaining_balance, request_date, status)
         VALUES ($1, $2, $3, $3, $4, 'pending')
         RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(&body.employee_id)
    .bind(body.amount)
    .bind(today)
    .fetch_one(&state.db)
    .await?;

    info!(
        employee_id = %request.employee_id,
        amount = %request.amount,
        "cash advance request accepted, awaiting approval"
    );

    Ok((StatusCode::CREATED, Json(request)))
}

/// Admin decision on a Pending request.
#[utoipa::path(
    patch,
    path = "/api/v1/cash-advances/{advance_id}",
    params(("advance_id" = Uuid, Path, description = "Cash advance ID")),
    request_body = DecideAdvanceRequest,
    responses(
        (status = 200, description = "Decision applied", body = CashAdvanceRequest),
        (status = 404, description = "Request not found"),
        (status = 409, description = "Request is no longer pending"),
    ),
    tag = "Cash Advances"
)]
pub async fn decide_advance(
    State(state): State<AppState>,
    Path(advance_id): Path<Uuid>,
    Json(body): Json<DecideAdvanceRequest>,
) -> AppResult<Json<CashAdvanceRequest>> {
    let status = if body.approve {
        CashAdvanceStatus::Approved
    } else {
        CashAdvanceStatus::Rejected
    };

    // Conditional on Pending so a second decision cannot overwrite the first.
    let updated = sqlx::query_as::<_, CashAdvanceRequest>(
        "UPDATE cash_advances
         SET status = $2, decision_notes = $3, updated_at = NOW()
         WHERE id = $1 AND status = 'pending'
         RETURNING *",
    )
    .bind(advance_id)
    .bind(status)
    .bind(body.notes)
    .fetch_optional(&state.db)
    .await?;

    match updated {
        Some(request) => {
            info!(advance_id = %advance_id, status = ?request.status, "cash advance decided");
            Ok(Json(request))
        }
        None => {
            let exists: Option<(Uuid,)> =
                sqlx::query_as("SELECT id FROM cash_advances WHERE id = $1")
                    .bind(advance_id)
                    .fetch_optional(&state.db)
                    .await?;
            if exists.is_some() {
                Err(AppError::Conflict(
                    "Cash advance request has already been decided".to_string(),
                ))
            } else {
                Err(AppError::NotFound(format!(
                    "Cash advance {advance_id} not found"
                )))
            }
        }
    }
}

/// List cash advance requests for one employee, newest first.
#[utoipa::path(
    get,
    path = "/api/v1/employees/{employee_id}/cash-advances",
    params(("employee_id" = String, Path, description = "Business employee ID")),
    responses((status = 200, description = "Requests", body = Vec<CashAdvanceRequest>)),
    tag = "Cash Advances"
)]
pub async fn list_advances(
    State(state): State<AppState>,
    Path(employee_id): Path<String>,
) -> AppResult<Json<Vec<CashAdvanceRequest>>> {
    let advances = sqlx::query_as::<_, CashAdvanceRequest>(
        "SELECT * FROM cash_advances WHERE employee_id = $1 ORDER BY created_at DESC",
    )
    .bind(employee_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(advances))
}
