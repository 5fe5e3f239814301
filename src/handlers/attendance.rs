// src/handlers/attendance.rs

use crate::{
    errors::AppResult,
    models::{AttendanceQuery, AttendanceRecord, AutoCloseReport, ScanRequest, ScanResponse},
    services::attendance::{auto_close_open_shifts, record_scan},
    state::AppState,
};
use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};

/// Record a fingerprint scan. The first scan of the day is a time-in, the
/// second finalizes the day, a third is rejected.
#[utoipa::path(
    post,
    path = "/api/v1/attendance/scan",
    request_body = ScanRequest,
    responses(
        (status = 201, description = "Scan recorded", body = ScanResponse),
        (status = 400, description = "Invalid scan (Sunday, or time-out not after time-in)"),
        (status = 404, description = "Unknown employee"),
        (status = 409, description = "Both scans already recorded for today"),
    ),
    tag = "Attendance"
)]
pub async fn scan(
    State(state): State<AppState>,
    Json(body): Json<ScanRequest>,
) -> AppResult<(StatusCode, Json<ScanResponse>)> {
    let response = record_scan(&state, &body.employee_id).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// List attendance records, optionally filtered by employee and date range.
#[utoipa::path(
    get,
    path = "/api/v1/attendance",
    params(AttendanceQuery),
    responses((status = 200, description = "Attendance records", body = Vec<AttendanceRecord>)),
    tag = "Attendance"
)]
pub async fn list_attendance(
    State(state): State<AppState>,
    Query(query): Query<AttendanceQuery>,
) -> AppResult<Json<Vec<AttendanceRecord>>> {
    let records = sqlx::query_as::<_, AttendanceRecord>(
        "SELECT * FROM attendance_records
         WHERE ($1::text IS NULL OR employee_id = $1)
           AND ($2::date IS NULL OR date >= $2)
           AND ($3::date IS NULL OR date <= $3)
         ORDER BY date DESC, employee_id",
    )
    .bind(query.employee_id)
    .bind(query.from)
    .bind(query.to)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(records))
}

/// Close every shift left open before today at 18:00 of its own date.
/// Intended for the end-of-day cron; safe to call repeatedly.
#[utoipa::path(
    post,
    path = "/api/v1/attendance/auto-close",
    responses((status = 200, description = "Sweep summary", body = AutoCloseReport)),
    tag = "Attendance"
)]
pub async fn auto_close(State(state): State<AppState>) -> AppResult<Json<AutoCloseReport>> {
    let report = auto_close_open_shifts(&state).await?;
    Ok(Json(report))
}
